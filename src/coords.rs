//! Mapping between physical coordinates and the drawing surface.
//!
//! Height is the vertical coordinate of the plot so the view can be zoomed by height. Pressure
//! reaches the vertical axis through the profile's own pressure-height relationship, so the
//! isobars and every reference curve line up with the sounding that is actually on screen rather
//! than with a standard atmosphere. The standard atmosphere is only used when there is no profile
//! to take the relationship from.
use crate::{
    config::{PlotRect, ViewBounds},
    formulas::{barometric_height, barometric_pressure},
    interpolation::PressureHeightTable,
    profile::Profile,
};
use metfor::{Celsius, HectoPascal, Meters, Quantity};
use std::f64::consts::LN_10;

/// A point on the drawing surface. The y axis points down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, increasing downward.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Is either coordinate NaN or infinite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The projection for one diagram: view bounds, plot rectangle, and the pressure-height table
/// of the current profile.
#[derive(Debug, Clone)]
pub struct CoordinateFrame {
    view: ViewBounds,
    rect: PlotRect,
    table: PressureHeightTable,
    log_p_max: f64,
}

impl CoordinateFrame {
    /// Create a frame, taking the pressure-height relationship from `profile` if one is given.
    pub fn new(view: ViewBounds, rect: PlotRect, profile: Option<&Profile>) -> Self {
        let table = profile.map(PressureHeightTable::new).unwrap_or_default();

        CoordinateFrame {
            view,
            rect,
            table,
            log_p_max: view.p_max.ln(),
        }
    }

    /// The active view bounds.
    #[inline]
    pub fn view(&self) -> &ViewBounds {
        &self.view
    }

    /// The plot rectangle.
    #[inline]
    pub fn rect(&self) -> &PlotRect {
        &self.rect
    }

    /// Zoom the height axis. The caller must ensure `h_min < h_max`.
    #[inline]
    pub fn set_height_range(&mut self, h_min: Meters, h_max: Meters) {
        self.view.set_height_range(h_min.unpack(), h_max.unpack());
    }

    /// Vertical position of a height. Greater heights are nearer the top of the surface.
    #[inline]
    pub fn height_to_y(&self, h: Meters) -> f64 {
        let ViewBounds { h_min, h_max, .. } = self.view;
        debug_assert!(h_max > h_min);

        self.rect.top + self.rect.height * (1.0 - (h.unpack() - h_min) / (h_max - h_min))
    }

    /// Height at a vertical position, the inverse of `height_to_y`.
    #[inline]
    pub fn y_to_height(&self, y: f64) -> Meters {
        let ViewBounds { h_min, h_max, .. } = self.view;
        Meters(h_min + (1.0 - (y - self.rect.top) / self.rect.height) * (h_max - h_min))
    }

    /// Height of a pressure level according to the current profile.
    ///
    /// Pressures outside the range covered by the profile get the height of the nearest end of
    /// the profile. Without a profile, the standard atmosphere is used.
    #[inline]
    pub fn pressure_to_height(&self, p: HectoPascal) -> Meters {
        debug_assert!(p.unpack() > 0.0);
        self.table
            .height(p)
            .unwrap_or_else(|| barometric_height(p))
    }

    /// Pressure at a height according to the current profile, the inverse of
    /// `pressure_to_height` within the range of the profile.
    #[inline]
    pub fn height_to_pressure(&self, h: Meters) -> HectoPascal {
        self.table
            .pressure(h)
            .unwrap_or_else(|| barometric_pressure(h))
    }

    /// Vertical position of a pressure level.
    #[inline]
    pub fn pressure_to_y(&self, p: HectoPascal) -> f64 {
        self.height_to_y(self.pressure_to_height(p))
    }

    /// How far, in degrees Celsius, the temperature axis is shifted right at pressure `p`.
    ///
    /// Zero at the bottom of the diagram (`p_max`) and growing by `skew` for every decade of
    /// pressure above it.
    #[inline]
    pub fn skew_offset(&self, p: HectoPascal) -> f64 {
        debug_assert!(p.unpack() > 0.0);
        self.view.skew * (self.log_p_max - p.unpack().ln()) / LN_10
    }

    /// Horizontal position of temperature `t` on pressure level `p`.
    #[inline]
    pub fn temp_to_x(&self, t: Celsius, p: HectoPascal) -> f64 {
        let ViewBounds { t_min, t_max, .. } = self.view;
        let skewed = t.unpack() + self.skew_offset(p);

        self.rect.left + self.rect.width * (skewed - t_min) / (t_max - t_min)
    }

    /// Temperature at horizontal position `x` on pressure level `p`, the inverse of `temp_to_x`.
    #[inline]
    pub fn x_to_temp(&self, x: f64, p: HectoPascal) -> Celsius {
        let ViewBounds { t_min, t_max, .. } = self.view;
        let skewed = t_min + (x - self.rect.left) / self.rect.width * (t_max - t_min);

        Celsius(skewed - self.skew_offset(p))
    }

    /// The point for temperature `t` on pressure level `p`.
    #[inline]
    pub fn project(&self, t: Celsius, p: HectoPascal) -> Point {
        Point::new(self.temp_to_x(t, p), self.pressure_to_y(p))
    }

    /// Is the pressure within the pressure bounds of the view?
    #[inline]
    pub fn pressure_in_view(&self, p: HectoPascal) -> bool {
        let p = p.unpack();
        p >= self.view.p_min && p <= self.view.p_max
    }

    /// Is the height within the height bounds of the view?
    #[inline]
    pub fn height_in_view(&self, h: Meters) -> bool {
        let h = h.unpack();
        h >= self.view.h_min && h <= self.view.h_max
    }
}
