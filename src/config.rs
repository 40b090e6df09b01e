//! View bounds, layout, and styling for a diagram.
//!
//! Everything here is plain data with serde derives so an application can keep its diagram
//! settings in a JSON file. Values are stored in the working units of the engine: hPa, meters,
//! and degrees Celsius.
use crate::{
    error::{Result, SkewTError},
    surface::Color,
};
use serde::{Deserialize, Serialize};

/// The extent of the diagram axes.
///
/// There is exactly one active `ViewBounds` per diagram. The height range is the part that
/// changes when the user zooms, the rest is normally fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewBounds {
    /// Lowest pressure shown (top of the diagram) in hPa.
    pub p_min: f64,
    /// Highest pressure shown (bottom of the diagram) in hPa.
    pub p_max: f64,
    /// Bottom of the height axis in meters.
    pub h_min: f64,
    /// Top of the height axis in meters.
    pub h_max: f64,
    /// Left edge of the temperature axis at `p_max` in Celsius.
    pub t_min: f64,
    /// Right edge of the temperature axis at `p_max` in Celsius.
    pub t_max: f64,
    /// Shear of the temperature axis in Celsius per decade of pressure.
    pub skew: f64,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self {
            p_min: 100.0,
            p_max: 1050.0,
            h_min: 0.0,
            h_max: 16_000.0,
            t_min: -40.0,
            t_max: 50.0,
            skew: 35.0,
        }
    }
}

impl ViewBounds {
    /// Replace the height range.
    ///
    /// This does no checking, the caller must ensure `h_min < h_max`. Use
    /// [`Diagram::set_height_range`](crate::Diagram::set_height_range) for a checked zoom.
    #[inline]
    pub fn set_height_range(&mut self, h_min: f64, h_max: f64) {
        debug_assert!(h_min < h_max);
        self.h_min = h_min;
        self.h_max = h_max;
    }

    /// Builder method for the height range, checked.
    pub fn with_height_range(mut self, h_min: f64, h_max: f64) -> Result<Self> {
        check_height_range(h_min, h_max)?;
        self.set_height_range(h_min, h_max);
        Ok(self)
    }

    /// The visible height span in meters.
    #[inline]
    pub fn height_span(&self) -> f64 {
        self.h_max - self.h_min
    }

    /// Check that none of the axes are degenerate.
    pub fn validate(&self) -> Result<()> {
        check_height_range(self.h_min, self.h_max)?;

        if !(self.p_min > 0.0 && self.p_min < self.p_max && self.p_max.is_finite()) {
            return Err(SkewTError::InvalidPressureRange {
                min: self.p_min,
                max: self.p_max,
            });
        }

        if !(self.t_min < self.t_max && self.t_min.is_finite() && self.t_max.is_finite()) {
            return Err(SkewTError::InvalidTemperatureRange {
                min: self.t_min,
                max: self.t_max,
            });
        }

        Ok(())
    }
}

pub(crate) fn check_height_range(h_min: f64, h_max: f64) -> Result<()> {
    if h_min.is_finite() && h_max.is_finite() && h_min < h_max {
        Ok(())
    } else {
        Err(SkewTError::DegenerateHeightRange {
            min: h_min,
            max: h_max,
        })
    }
}

/// Space reserved around the plot for labels, the legend, and the wind barb column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Title area.
    pub top: f64,
    /// Wind barb column and isobar labels.
    pub right: f64,
    /// Temperature axis labels.
    pub bottom: f64,
    /// Height axis labels.
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 150.0,
            bottom: 50.0,
            left: 100.0,
        }
    }
}

/// The size of the drawing surface and the margins around the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Total surface width.
    pub width: f64,
    /// Total surface height.
    pub height: f64,
    /// Margins around the plot rectangle.
    pub margins: Margins,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 700.0,
            margins: Margins::default(),
        }
    }
}

impl Layout {
    /// Create a layout with the default margins.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Builder method for the margins.
    pub fn with_margins(self, margins: Margins) -> Self {
        Self { margins, ..self }
    }

    /// The region reserved for the coordinate grid.
    pub fn plot_rect(&self) -> PlotRect {
        let m = &self.margins;
        PlotRect {
            left: m.left,
            top: m.top,
            width: self.width - m.left - m.right,
            height: self.height - m.top - m.bottom,
        }
    }

    /// Check that the margins leave a usable plot area.
    pub fn validate(&self) -> Result<()> {
        let rect = self.plot_rect();
        if rect.width > 0.0 && rect.height > 0.0 {
            Ok(())
        } else {
            Err(SkewTError::LayoutTooSmall {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// The rectangle of the surface where the coordinate grid is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    /// X coordinate of the left edge.
    pub left: f64,
    /// Y coordinate of the top edge.
    pub top: f64,
    /// Width of the plot.
    pub width: f64,
    /// Height of the plot.
    pub height: f64,
}

impl PlotRect {
    /// X coordinate of the right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Y coordinate of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Is `x` within the horizontal extent of the plot?
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.left && x <= self.right()
    }

    /// Is `y` within the vertical extent of the plot?
    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom()
    }
}

/// Colors for every element of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Surface background.
    pub background: Color,
    /// Border, ticks and labels.
    pub foreground: Color,
    /// Isobars and height ticks.
    pub grid: Color,
    /// Minor isotherms.
    pub isotherm: Color,
    /// Isotherms at multiples of 20 C.
    pub isotherm_major: Color,
    /// Dry adiabats.
    pub dry_adiabat: Color,
    /// Moist adiabats.
    pub moist_adiabat: Color,
    /// Mixing ratio lines.
    pub mixing_ratio: Color,
    /// Temperature profile.
    pub temperature: Color,
    /// Dew point profile.
    pub dew_point: Color,
    /// Wind barbs.
    pub wind_barb: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(255, 255, 255),
            foreground: Color::rgb(0, 0, 0),
            grid: Color::rgb(190, 190, 190),
            isotherm: Color::rgb(215, 215, 215),
            isotherm_major: Color::rgb(150, 150, 150),
            dry_adiabat: Color::rgb(205, 140, 90),
            moist_adiabat: Color::rgb(90, 150, 205),
            mixing_ratio: Color::rgb(110, 175, 110),
            temperature: Color::rgb(220, 30, 30),
            dew_point: Color::rgb(30, 150, 30),
            wind_barb: Color::rgb(20, 20, 20),
        }
    }
}

/// Everything needed to construct a diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Initial axis extents.
    pub view: ViewBounds,
    /// Surface size and margins.
    pub layout: Layout,
    /// Colors.
    pub palette: Palette,
}

impl DiagramConfig {
    /// Parse a configuration from JSON. Missing fields take their default values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewt_diagram::DiagramConfig;
    ///
    /// let config = DiagramConfig::from_json(r#"{"view": {"h_max": 12000.0}}"#).unwrap();
    /// assert_eq!(config.view.h_max, 12000.0);
    /// assert_eq!(config.view.p_max, 1050.0);
    /// assert_eq!(config.layout.margins.right, 150.0);
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the view bounds and the layout.
    pub fn validate(&self) -> Result<()> {
        let result = self.view.validate().and_then(|_| self.layout.validate());
        if let Err(ref err) = result {
            log::warn!("rejecting diagram configuration: {}", err);
        }
        result
    }
}
