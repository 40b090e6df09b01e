use chrono::NaiveDateTime;
use metfor::{Meters, Quantity};
use optional::Optioned;

/// Station description that accompanies a profile: who, where, and when.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    /// Station name or identifier, eg "Boise, ID" or "KBOI".
    station_name: Option<String>,
    /// Latitude and longitude.
    location: Option<(f64, f64)>,
    /// Elevation of the station in meters.
    elevation: Optioned<Meters>,
    /// Valid time of the observation, UTC.
    observation_time: Option<NaiveDateTime>,
}

impl Metadata {
    /// Create a new object with default values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewt_diagram::Metadata;
    ///
    /// assert!(Metadata::new().station_name().is_none());
    /// assert!(Metadata::new().location().is_none());
    /// assert!(Metadata::new().elevation().is_none());
    /// assert!(Metadata::new().observation_time().is_none());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a station name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewt_diagram::Metadata;
    ///
    /// let md = Metadata::new().with_station_name("KBOI".to_owned());
    /// assert_eq!(md.station_name().unwrap(), "KBOI");
    ///
    /// let md = md.with_station_name(None);
    /// assert!(md.station_name().is_none());
    /// ```
    #[inline]
    pub fn with_station_name<S>(mut self, name: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.station_name = Option::from(name);
        self
    }

    /// Builder method to add a location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewt_diagram::Metadata;
    ///
    /// assert_eq!(
    ///     Metadata::new().with_lat_lon((43.57, -116.21)).location().unwrap(),
    ///     (43.57, -116.21)
    /// );
    /// assert!(Metadata::new().with_lat_lon(None).location().is_none());
    /// ```
    #[inline]
    pub fn with_lat_lon<T>(mut self, coords: T) -> Self
    where
        Option<(f64, f64)>: From<T>,
    {
        self.location = Option::from(coords);
        self
    }

    /// Builder method to add elevation.
    ///
    /// # Examples
    ///```rust
    /// use metfor::{Feet, Meters};
    /// use optional::{none, some};
    /// use skewt_diagram::Metadata;
    ///
    /// let md = Metadata::new().with_elevation(Meters(874.0));
    /// assert_eq!(md.elevation().unwrap(), Meters(874.0));
    ///
    /// let _md = Metadata::new().with_elevation(Feet(2867.0));
    /// let _md = Metadata::new().with_elevation(some(Meters(874.0)));
    /// let _md = Metadata::new().with_elevation(none::<Meters>());
    ///```
    #[inline]
    pub fn with_elevation<T, U>(mut self, elev: T) -> Self
    where
        Optioned<U>: From<T>,
        U: optional::Noned + metfor::Length,
        Meters: From<U>,
    {
        let elevation: Optioned<U> = Optioned::from(elev);
        self.elevation = elevation.map_t(Meters::from);
        self
    }

    /// Builder method to add the observation time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use skewt_diagram::Metadata;
    ///
    /// let valid = NaiveDate::from_ymd_opt(2021, 6, 29).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let md = Metadata::new().with_observation_time(valid);
    /// assert_eq!(md.observation_time().unwrap(), valid);
    /// ```
    #[inline]
    pub fn with_observation_time<T>(mut self, valid_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.observation_time = Option::from(valid_time);
        self
    }

    /// Station name or identifier.
    #[inline]
    pub fn station_name(&self) -> Option<&str> {
        self.station_name.as_deref()
    }

    /// Latitude and longitude.
    #[inline]
    pub fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    /// Station elevation in meters.
    #[inline]
    pub fn elevation(&self) -> Optioned<Meters> {
        self.elevation
    }

    /// Observation time, UTC.
    #[inline]
    pub fn observation_time(&self) -> Option<NaiveDateTime> {
        self.observation_time
    }

    /// Title line for a diagram, the station name followed by the observation time.
    pub fn title(&self) -> String {
        let name = self.station_name().unwrap_or("Sounding");

        match self.observation_time {
            Some(valid) => format!("{}  {}", name, valid.format("%Y-%m-%d %H:%MZ")),
            None => name.to_owned(),
        }
    }

    /// Second title line with location and elevation, if either is known.
    pub fn subtitle(&self) -> Option<String> {
        let location = self.location.map(|(lat, lon)| {
            format!(
                "{:.2}{} {:.2}{}",
                lat.abs(),
                if lat < 0.0 { 'S' } else { 'N' },
                lon.abs(),
                if lon < 0.0 { 'W' } else { 'E' },
            )
        });
        let elevation = self
            .elevation
            .into_option()
            .map(|e| format!("{:.0} m", e.unpack()));

        match (location, elevation) {
            (Some(loc), Some(elev)) => Some(format!("{}  {}", loc, elev)),
            (Some(loc), None) => Some(loc),
            (None, Some(elev)) => Some(elev),
            (None, None) => None,
        }
    }
}
