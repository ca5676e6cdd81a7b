//! Latitude and longitude are stored as integers scaled by [`FACTOR`].

pub const FACTOR: i32 = 10_000_000;

/// `None` for values outside ±180 degrees, including NaN, which have no
/// place in the stored integer range.
pub fn to_fixed(degrees: f64) -> Option<i32> {
    (-180.0..=180.0)
        .contains(&degrees)
        .then(|| (degrees * FACTOR as f64).round() as i32)
}

pub fn from_fixed(value: i32) -> f64 {
    value as f64 / FACTOR as f64
}
