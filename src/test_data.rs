//! Data used in tests.
use crate::profile::{Level, Profile};

pub fn approx_equal(tgt: f64, guess: f64, tol: f64) -> bool {
    assert!(tol > 0.0);

    f64::abs(tgt - guess) <= tol
}

/// A short, complete profile with round numbers so interpolated values are easy to check.
pub fn three_level_profile() -> Profile {
    Profile::from_levels(vec![
        Level::new(1000.0, 0.0, 20.0, 10.0, 180.0, 5.0),
        Level::new(850.0, 1500.0, 10.0, 4.0, 225.0, 10.0),
        Level::new(700.0, 3000.0, 2.0, -8.0, 270.0, 15.0),
    ])
}
