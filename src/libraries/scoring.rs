use crate::models::location::Coordinate;

/// Earth radius in miles (for distance calculations)
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two coordinates in miles, Haversine formula.
pub fn haversine_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Points for a guess at the given distance in miles.
///
/// Piecewise bands; each band stays non-negative on its own, but the function
/// is not monotonic across band boundaries (9.99 mi scores 1004, 10 mi scores
/// 2500). That is the scoring as played, kept as-is.
pub fn score_for_distance(distance_miles: f64) -> u32 {
    if distance_miles < 1.0 {
        5000
    } else if distance_miles < 10.0 {
        (5000.0 - distance_miles * 400.0).round() as u32
    } else if distance_miles < 50.0 {
        (3000.0 - distance_miles * 50.0).round() as u32
    } else if distance_miles < 200.0 {
        (1000.0 - distance_miles * 4.0).round() as u32
    } else {
        0
    }
}

/// Accuracy as a rounded percentage of the maximum achievable score.
pub fn accuracy_percent(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    (score as f64 / max_score as f64 * 100.0).round() as u32
}
