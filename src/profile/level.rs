use crate::formulas::ms_to_kmh;
use metfor::{Celsius, HectoPascal, Meters, MetersPSec, Quantity};
use optional::{none, some, Noned, Optioned};

/// A copy of one row of the profile data.
#[derive(Clone, Default, Copy, Debug, PartialEq)]
pub struct Level {
    /// Pressure in hPa
    pub pressure: Optioned<HectoPascal>,
    /// Height above sea level in meters
    pub height: Optioned<Meters>,
    /// Temperature in C
    pub temperature: Optioned<Celsius>,
    /// Dew point in C
    pub dew_point: Optioned<Celsius>,
    /// Direction the wind is blowing from in degrees, 0 is north and angles increase clockwise
    pub wind_direction: Optioned<f64>,
    /// Wind speed in m/s
    pub wind_speed: Optioned<MetersPSec>,
}

impl Level {
    /// Create a level from raw values as they come out of a report parser.
    ///
    /// NaN or infinite values are stored as missing. So are non-positive pressures and negative
    /// wind speeds, which can only be garbage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::{Celsius, HectoPascal};
    /// use skewt_diagram::Level;
    ///
    /// let lvl = Level::new(850.0, 1500.0, 10.0, std::f64::NAN, 270.0, 12.0);
    /// assert_eq!(lvl.pressure.unwrap(), HectoPascal(850.0));
    /// assert_eq!(lvl.temperature.unwrap(), Celsius(10.0));
    /// assert!(lvl.dew_point.is_none());
    /// ```
    pub fn new(
        pressure: f64,
        height: f64,
        temperature: f64,
        dew_point: f64,
        wind_direction: f64,
        wind_speed: f64,
    ) -> Self {
        Level {
            pressure: if pressure > 0.0 {
                present(pressure)
            } else {
                none()
            },
            height: present(height),
            temperature: present(temperature),
            dew_point: present(dew_point),
            wind_direction: if wind_direction.is_finite() {
                some(wind_direction)
            } else {
                none()
            },
            wind_speed: if wind_speed >= 0.0 {
                present(wind_speed)
            } else {
                none()
            },
        }
    }

    /// Wind direction and speed, if both are available.
    #[inline]
    pub fn wind(&self) -> Option<(f64, MetersPSec)> {
        let dir = self.wind_direction.into_option()?;
        let spd = self.wind_speed.into_option()?;
        Some((dir, spd))
    }

    /// Wind speed converted to km/h for display.
    #[inline]
    pub fn wind_speed_kmh(&self) -> Option<f64> {
        self.wind_speed.into_option().map(|spd| ms_to_kmh(spd.unpack()))
    }
}

/// Wrap a raw value, treating anything non-finite as missing.
#[inline]
pub(crate) fn present<T>(val: f64) -> Optioned<T>
where
    T: Quantity + Noned,
{
    if val.is_finite() {
        some(T::pack(val))
    } else {
        none()
    }
}
