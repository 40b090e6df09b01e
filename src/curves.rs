//! Reference curves drawn behind the sounding: isotherms, dry adiabats, moist adiabats, and
//! mixing ratio lines.
//!
//! Nothing is retained between draws. Each curve is a lazy sweep over pressure that is projected
//! through the current `CoordinateFrame` as it is iterated, so the curves always follow the
//! current zoom and profile.
//!
//! Samples that land far outside the visible temperature range are skipped rather than clamped.
//! A skipped sample breaks the curve, so one parameter value may be drawn as several disconnected
//! polylines.
use crate::{
    coords::{CoordinateFrame, Point},
    formulas::{dry_adiabat_temperature, mixing_ratio_dew_point, moist_adiabat_temperature},
};
use itertools::Itertools;
use metfor::{Celsius, HectoPascal, Kelvin, Quantity};
use strum_macros::{AsRefStr, Display, EnumIter};

/// How far below the left edge of the temperature axis a sample may fall and still be drawn.
pub const TOLERANCE_BELOW: f64 = 40.0;
/// How far beyond the right edge of the temperature axis a sample may fall and still be drawn.
pub const TOLERANCE_ABOVE: f64 = 20.0;

/// Mixing ratio lines are only drawn in the lower atmosphere, down to this pressure.
pub const MIXING_RATIO_TOP: f64 = 600.0;

/// Mixing ratios in g/kg with a reference line.
pub const MIXING_RATIOS: [f64; 7] = [0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0];

/// The families of reference curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
pub enum CurveFamily {
    /// Lines of constant temperature, every 10C.
    #[strum(to_string = "Isotherm")]
    Isotherm,
    /// Lines of constant potential temperature, every 10K.
    #[strum(to_string = "Dry adiabat")]
    DryAdiabat,
    /// Lines of constant equivalent potential temperature, every 10K.
    #[strum(to_string = "Moist adiabat")]
    MoistAdiabat,
    /// Lines of constant mixing ratio.
    #[strum(to_string = "Mixing ratio")]
    MixingRatio,
}

impl CurveFamily {
    /// The parameter values with one curve each: C for isotherms, K for adiabats, g/kg for
    /// mixing ratio.
    pub fn values(self) -> Vec<f64> {
        use CurveFamily::*;

        match self {
            Isotherm => (-100..=50).step_by(10).map(f64::from).collect(),
            DryAdiabat => (200..=500).step_by(10).map(f64::from).collect(),
            MoistAdiabat => (280..=380).step_by(10).map(f64::from).collect(),
            MixingRatio => MIXING_RATIOS.to_vec(),
        }
    }

    /// Spacing of the pressure samples in hPa.
    pub fn pressure_step(self) -> f64 {
        use CurveFamily::*;

        match self {
            Isotherm | MixingRatio => 10.0,
            DryAdiabat | MoistAdiabat => 5.0,
        }
    }

    /// One curve per parameter value, projected with `frame`.
    pub fn curves(self, frame: &CoordinateFrame) -> impl Iterator<Item = ReferenceCurve<'_>> {
        self.values()
            .into_iter()
            .map(move |value| ReferenceCurve::new(self, value, frame))
    }
}

/// A single reference curve, one parameter value of a family.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCurve<'a> {
    family: CurveFamily,
    value: f64,
    frame: &'a CoordinateFrame,
}

/// Text that goes with a curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLabel {
    /// The label text.
    pub text: String,
    /// Where to put it.
    pub at: Point,
    /// Rotation of the text in degrees, clockwise, so it runs along the curve.
    pub rotation: f64,
}

impl<'a> ReferenceCurve<'a> {
    /// Create a curve for a parameter value of a family.
    pub fn new(family: CurveFamily, value: f64, frame: &'a CoordinateFrame) -> Self {
        ReferenceCurve {
            family,
            value,
            frame,
        }
    }

    /// The family this curve belongs to.
    #[inline]
    pub fn family(&self) -> CurveFamily {
        self.family
    }

    /// The parameter value of this curve.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Isotherms at multiples of 20C are styled differently and labeled.
    #[inline]
    pub fn is_major(&self) -> bool {
        self.family == CurveFamily::Isotherm && (self.value as i64) % 20 == 0
    }

    /// The temperature of the curve at pressure `p`.
    pub fn temperature_at(&self, p: HectoPascal) -> Option<Celsius> {
        use CurveFamily::*;

        match self.family {
            Isotherm => Some(Celsius(self.value)),
            DryAdiabat => Some(dry_adiabat_temperature(Kelvin(self.value), p)),
            MoistAdiabat => Some(moist_adiabat_temperature(Kelvin(self.value), p)),
            MixingRatio => mixing_ratio_dew_point(self.value, p),
        }
    }

    /// The pressures this curve is sampled at, from the bottom of the diagram upward.
    pub fn pressures(&self) -> impl Iterator<Item = HectoPascal> {
        let view = self.frame.view();
        let top = match self.family {
            CurveFamily::MixingRatio => MIXING_RATIO_TOP.max(view.p_min),
            _ => view.p_min,
        };

        pressure_sweep(view.p_max, top, self.family.pressure_step())
    }

    /// Project the curve at a single pressure, `None` if the sample is skipped.
    pub fn sample(&self, p: HectoPascal) -> Option<Point> {
        let t = self.temperature_at(p)?;
        let pnt = self.frame.project(t, p);

        if !pnt.is_finite() {
            return None;
        }

        let keep = match self.family {
            CurveFamily::MixingRatio => self.frame.rect().contains_x(pnt.x),
            _ => {
                let view = self.frame.view();
                let visible_t = t.unpack() + self.frame.skew_offset(p);
                visible_t >= view.t_min - TOLERANCE_BELOW
                    && visible_t <= view.t_max + TOLERANCE_ABOVE
            }
        };

        if keep {
            Some(pnt)
        } else {
            None
        }
    }

    /// Lazily sample the curve from the bottom of the diagram upward. Skipped samples are `None`.
    ///
    /// The iterator can be recreated any number of times and always yields the same sequence for
    /// the same frame.
    pub fn samples(&self) -> impl Iterator<Item = Option<Point>> + 'a {
        let curve = *self;
        self.pressures().map(move |p| curve.sample(p))
    }

    /// The drawable pieces of the curve, split wherever a sample was skipped.
    pub fn segments(&self) -> Vec<Vec<Point>> {
        split_segments(self.samples())
    }

    /// A label for the curve, if this kind of curve is labeled.
    ///
    /// Major isotherms are labeled at the lowest point inside the plot, rotated to lean with the
    /// line. Mixing ratio lines are labeled with their value in g/kg at their top end.
    pub fn label(&self) -> Option<CurveLabel> {
        let rect = *self.frame.rect();
        let inside = |pnt: &Point| rect.contains_x(pnt.x) && rect.contains_y(pnt.y);

        match self.family {
            CurveFamily::Isotherm if self.is_major() => {
                let (at, next) = self
                    .samples()
                    .tuple_windows::<(_, _)>()
                    .filter_map(|(a, b)| Some((a?, b?)))
                    .find(|(a, b)| inside(a) && a.y > b.y)?;

                let rotation = (next.y - at.y).atan2(next.x - at.x).to_degrees();

                Some(CurveLabel {
                    text: format!("{}", self.value),
                    at,
                    rotation,
                })
            }
            CurveFamily::MixingRatio => {
                let at = self.samples().filter_map(|pnt| pnt).filter(inside).last()?;

                Some(CurveLabel {
                    text: format!("{}", self.value),
                    at,
                    rotation: 0.0,
                })
            }
            _ => None,
        }
    }
}

/// Pressures from `start` down to `stop` inclusive in steps of `step`.
///
/// The samples are computed from the index, not accumulated, so the sequence is the same every
/// time.
pub fn pressure_sweep(start: f64, stop: f64, step: f64) -> impl Iterator<Item = HectoPascal> {
    debug_assert!(step > 0.0);

    let count = if start >= stop {
        ((start - stop) / step).floor() as usize + 1
    } else {
        0
    };

    (0..count).map(move |i| HectoPascal(start - step * i as f64))
}

/// Break a sequence of samples into runs of consecutive points. Runs with fewer than two points
/// can't be drawn as a line and are dropped.
pub fn split_segments<I>(samples: I) -> Vec<Vec<Point>>
where
    I: IntoIterator<Item = Option<Point>>,
{
    let mut segments: Vec<Vec<Point>> = vec![];
    let mut current: Vec<Point> = vec![];

    for sample in samples {
        match sample {
            Some(pnt) => current.push(pnt),
            None => {
                if current.len() > 1 {
                    segments.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }

    if current.len() > 1 {
        segments.push(current);
    }

    segments
}
