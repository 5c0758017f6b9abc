use rand::Rng;
use std::f64::consts::PI;

use crate::models::game::Round;
use crate::models::location::Coordinate;

/// Rough miles-per-degree conversion used for the sampling radius
const MILES_PER_DEGREE: f64 = 69.0;

/// Generate the target rounds for a game: `count` coordinates sampled around
/// `center` within `radius_miles`, each with a random initial panorama
/// heading.
///
/// Sampling is uniform in angle and uniform in radial distance, which is
/// denser toward the center rather than area-uniform. That bias is part of
/// how the game plays and is kept on purpose.
pub fn generate_rounds<R: Rng>(
    rng: &mut R,
    center: &Coordinate,
    radius_miles: f64,
    count: u32,
) -> Vec<Round> {
    let radius_degrees = radius_miles / MILES_PER_DEGREE;

    (1..=count)
        .map(|index| {
            let angle = rng.gen_range(0.0..2.0 * PI);
            let distance = rng.gen_range(0.0..radius_degrees);

            let target = Coordinate::new(
                center.latitude + distance * angle.cos(),
                center.longitude + distance * angle.sin(),
            );
            let heading = rng.gen_range(0.0..360.0);

            Round::new(index, target, heading)
        })
        .collect()
}
