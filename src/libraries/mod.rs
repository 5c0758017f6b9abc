pub mod round_generator;
pub mod scoring;
