#![warn(missing_docs)]
//! Coordinate transforms, reference curves, and wind barbs for drawing
//! [Skew-T Log-P](https://en.wikipedia.org/wiki/Skew-T_log-P_diagram) diagrams.
//!
//! The vertical axis of the diagram is height so it can be zoomed by height, while the reference
//! curves are generated in pressure and placed through the pressure-height relationship of the
//! sounding being shown. Drawing is done through the [`Surface`] trait, one complete frame per
//! call to [`render`].
//!
//! # Examples
//!
//! ```rust
//! use metfor::Meters;
//! use skewt_diagram::{doctest, Diagram, SvgSurface};
//!
//! let profile = doctest::make_test_profile();
//!
//! let mut diagram = Diagram::default();
//! diagram.set_height_range(Meters(0.0), Meters(6000.0)).unwrap();
//!
//! let mut svg = SvgSurface::new(800.0, 700.0);
//! let summary = diagram.draw(&profile, None, &mut svg);
//! assert_eq!(summary.temperature_vertices, 4);
//!
//! let level = diagram.level_at_height(Meters(750.0)).unwrap();
//! assert_eq!(level.pressure.unwrap().0, 925.0);
//!
//! assert!(svg.to_svg().starts_with("<svg"));
//! ```

//
// API
//
pub use crate::{
    config::{DiagramConfig, Layout, Margins, Palette, PlotRect, ViewBounds},
    coords::{CoordinateFrame, Point},
    curves::{CurveFamily, ReferenceCurve},
    error::{Result, SkewTError},
    interpolation::{interpolate_at_height, PressureHeightTable},
    profile::{doctest, Level, Metadata, Profile},
    render::{render, Diagram, DrawRequest, RenderSummary},
    surface::{Color, CommandList, DrawCommand, Group, Stroke, Surface, SvgSurface, TextStyle},
    wind_barb::{BarbCounts, Primitive},
};

pub mod config;
pub mod coords;
pub mod curves;
pub mod formulas;
pub mod render;
pub mod surface;
pub mod wind_barb;

//
// Internal use only
//

mod error;
mod interpolation;
mod profile;

#[cfg(test)]
mod test_data;
