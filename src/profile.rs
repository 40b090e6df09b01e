//! Data type and methods to store an atmospheric profile.

use metfor::{Celsius, HectoPascal, Meters, MetersPSec};
use optional::Optioned;
use std::iter::FromIterator;

pub use self::{level::Level, metadata::Metadata};
pub(crate) use self::level::present;

/// All the variables stored in the profile.
///
/// The variables are stored in parallel vectors, one row per level as handed over by the report
/// parser. Rows are conventionally ordered surface to top, but nothing in this crate depends on
/// that. If a profile lacks a certain variable that whole vector has length 0 instead of being
/// full of missing values.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pressure: Vec<Optioned<HectoPascal>>,
    height: Vec<Optioned<Meters>>,
    temperature: Vec<Optioned<Celsius>>,
    dew_point: Vec<Optioned<Celsius>>,
    wind_direction: Vec<Optioned<f64>>,
    wind_speed: Vec<Optioned<MetersPSec>>,
}

macro_rules! make_profile_setter {
    ($(#[$attr:meta])* => $name:ident, $inner_type:ty, $p_var:ident) => {
        $(#[$attr])*
        pub fn $name(self, profile: Vec<Optioned<$inner_type>>) -> Self {
            Self {$p_var: profile, ..self}
        }
    };
}

impl Profile {
    /// Create a new profile with no levels. This is a proxy for default with a clearer name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewt_diagram::Profile;
    ///
    /// let prof = Profile::new();
    /// assert!(prof.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Profile::default()
    }

    /// Create a profile from a sequence of levels, keeping their order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::Meters;
    /// use skewt_diagram::{Level, Profile};
    ///
    /// let nan = std::f64::NAN;
    /// let prof = Profile::from_levels(vec![
    ///     Level::new(1000.0, 110.0, 20.0, 15.0, 180.0, 5.0),
    ///     Level::new(850.0, 1500.0, 12.0, 4.0, 225.0, 12.0),
    ///     Level::new(700.0, 3100.0, 1.0, nan, nan, nan),
    /// ]);
    ///
    /// assert_eq!(prof.len(), 3);
    /// assert_eq!(prof.level(1).unwrap().height.unwrap(), Meters(1500.0));
    /// assert!(prof.level(2).unwrap().wind_speed.is_none());
    /// ```
    pub fn from_levels<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = Level>,
    {
        levels.into_iter().collect()
    }

    make_profile_setter!(
        /// Builder method for the pressure profile.
        ///
        /// # Examples
        /// ```rust
        /// use skewt_diagram::Profile;
        /// use metfor::HectoPascal;
        /// use optional::{some, Optioned};
        ///
        /// let data = vec![1000.0, 925.0, 850.0, 700.0, 500.0, 300.0, 250.0, 200.0, 150.0, 100.0];
        /// let pressure_data: Vec<Optioned<HectoPascal>> = data.into_iter()
        ///     .map(HectoPascal)
        ///     .map(some)
        ///     .collect();
        ///
        /// let prof = Profile::new()
        ///     .with_pressure_profile(pressure_data);
        /// assert_eq!(prof.len(), 10);
        /// ```
        #[inline]
        => with_pressure_profile, HectoPascal, pressure
    );

    /// Get the pressure profile
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewt_diagram::Profile;
    /// # use skewt_diagram::doctest::make_test_profile;
    ///
    /// let prof = make_test_profile();
    /// let data = prof.pressure_profile();
    ///
    /// for p in data {
    ///     if let Some(p) = p.into_option() {
    ///         println!("{:?}", p);
    ///     } else {
    ///         println!("missing value!");
    ///     }
    /// }
    ///
    /// // Uninitialized profiles just return an empty vector.
    /// let prof = Profile::new();
    /// let data = prof.pressure_profile();
    /// assert!(data.is_empty());
    ///
    /// ```
    #[inline]
    pub fn pressure_profile(&self) -> &[Optioned<HectoPascal>] {
        &self.pressure
    }

    make_profile_setter!(
        /// Builder method for the height profile, meters above sea level.
        ///
        /// See `with_pressure_profile` for an example of usage, keeping in mind the units type may
        /// be different.
        #[inline]
        => with_height_profile, Meters, height
    );

    /// Get the height profile.
    ///
    /// See `pressure_profile` for an example of using getters, keeping in mind the units type may
    /// be different.
    #[inline]
    pub fn height_profile(&self) -> &[Optioned<Meters>] {
        &self.height
    }

    make_profile_setter!(
        /// Builder method for the temperature profile.
        ///
        /// See `with_pressure_profile` for an example of usage, keeping in mind the units type may
        /// be different.
        #[inline]
        => with_temperature_profile, Celsius, temperature
    );

    /// Get the temperature profile.
    ///
    /// See `pressure_profile` for an example of using getters, keeping in mind the units type may
    /// be different.
    #[inline]
    pub fn temperature_profile(&self) -> &[Optioned<Celsius>] {
        &self.temperature
    }

    make_profile_setter!(
        /// Builder method for the dew point profile.
        ///
        /// See `with_pressure_profile` for an example of usage, keeping in mind the units type may
        /// be different.
        #[inline]
        => with_dew_point_profile, Celsius, dew_point
    );

    /// Get the dew point profile.
    ///
    /// See `pressure_profile` for an example of using getters, keeping in mind the units type may
    /// be different.
    #[inline]
    pub fn dew_point_profile(&self) -> &[Optioned<Celsius>] {
        &self.dew_point
    }

    make_profile_setter!(
        /// Builder method for the wind direction profile, degrees the wind blows from.
        #[inline]
        => with_wind_direction_profile, f64, wind_direction
    );

    /// Get the wind direction profile.
    #[inline]
    pub fn wind_direction_profile(&self) -> &[Optioned<f64>] {
        &self.wind_direction
    }

    make_profile_setter!(
        /// Builder method for the wind speed profile.
        #[inline]
        => with_wind_speed_profile, MetersPSec, wind_speed
    );

    /// Get the wind speed profile.
    #[inline]
    pub fn wind_speed_profile(&self) -> &[Optioned<MetersPSec>] {
        &self.wind_speed
    }

    /// The number of levels, the length of the longest column.
    #[inline]
    pub fn len(&self) -> usize {
        self.pressure
            .len()
            .max(self.height.len())
            .max(self.temperature.len())
            .max(self.dew_point.len())
            .max(self.wind_direction.len())
            .max(self.wind_speed.len())
    }

    /// Does this profile have any levels at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row of data values from this profile.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::{HectoPascal, Celsius};
    /// use optional::some;
    /// use skewt_diagram::Profile;
    ///
    /// let pres: Vec<_> = vec![1000.0, 925.0, 850.0].into_iter()
    ///     .map(HectoPascal).map(some).collect();
    /// let temps: Vec<_> = vec![20.0, 18.0].into_iter()
    ///     .map(Celsius).map(some).collect();
    ///
    /// let prof = Profile::new()
    ///     .with_pressure_profile(pres)
    ///     .with_temperature_profile(temps);
    ///
    /// let row = prof.level(0).unwrap();
    /// assert_eq!(row.pressure.unwrap(), HectoPascal(1000.0));
    /// assert_eq!(row.temperature.unwrap(), Celsius(20.0));
    ///
    /// let row = prof.level(2).unwrap();
    /// assert_eq!(row.pressure.unwrap(), HectoPascal(850.0));
    /// assert!(row.temperature.is_none()); // The temperature column was short.
    /// assert!(row.wind_speed.is_none()); // We never set wind speed.
    ///
    /// assert!(prof.level(3).is_none()); // There weren't that many rows!
    /// ```
    #[inline]
    pub fn level(&self, idx: usize) -> Option<Level> {
        macro_rules! copy_to_result {
            ($result:ident, $profile:ident, $idx:ident) => {
                match self.$profile.get($idx) {
                    None => {}
                    Some(opt_val) => $result.$profile = *opt_val,
                }
            };
        }

        if idx >= self.len() {
            return None;
        }

        let mut result = Level::default();

        copy_to_result!(result, pressure, idx);
        copy_to_result!(result, height, idx);
        copy_to_result!(result, temperature, idx);
        copy_to_result!(result, dew_point, idx);
        copy_to_result!(result, wind_direction, idx);
        copy_to_result!(result, wind_speed, idx);

        Some(result)
    }

    /// Iterate over the levels in the order they were stored.
    #[inline]
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        LevelIterator {
            next_idx: 0,
            src: self,
        }
    }

    /// The lowest and highest height present in the profile.
    pub fn height_range(&self) -> Option<(Meters, Meters)> {
        min_max(&self.height)
    }

    /// The lowest and highest pressure present in the profile.
    pub fn pressure_range(&self) -> Option<(HectoPascal, HectoPascal)> {
        min_max(&self.pressure)
    }
}

impl FromIterator<Level> for Profile {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        let mut prof = Profile::new();

        for lvl in iter {
            prof.pressure.push(lvl.pressure);
            prof.height.push(lvl.height);
            prof.temperature.push(lvl.temperature);
            prof.dew_point.push(lvl.dew_point);
            prof.wind_direction.push(lvl.wind_direction);
            prof.wind_speed.push(lvl.wind_speed);
        }

        prof
    }
}

fn min_max<T>(vals: &[Optioned<T>]) -> Option<(T, T)>
where
    T: optional::Noned + Copy + PartialOrd,
{
    vals.iter()
        .filter_map(|v| v.into_option())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((
                if v < lo { v } else { lo },
                if v > hi { v } else { hi },
            )),
        })
}

/// Iterator over the levels of a profile in storage order.
struct LevelIterator<'a> {
    next_idx: usize,
    src: &'a Profile,
}

impl<'a> Iterator for LevelIterator<'a> {
    type Item = Level;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.src.level(self.next_idx);
        self.next_idx += 1;
        result
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.src.len().saturating_sub(self.next_idx);
        (remaining, Some(remaining))
    }
}

// FIXME: only configure for test and doc tests, not possible as of 1.41
#[doc(hidden)]
pub mod doctest {
    use super::*;

    pub fn make_test_profile() -> super::Profile {
        let nan = std::f64::NAN;

        Profile::from_levels(vec![
            Level::new(1000.0, 0.0, 20.0, 15.0, 180.0, 5.0),
            Level::new(850.0, 1500.0, 10.0, 6.0, 225.0, 10.0),
            Level::new(700.0, 3000.0, 2.0, -6.0, 270.0, 15.0),
            Level::new(500.0, 5600.0, -12.0, nan, 280.0, 25.0),
        ])
    }
}


mod level;
mod metadata;
