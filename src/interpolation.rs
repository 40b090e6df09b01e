use crate::profile::{present, Level, Profile};
use itertools::{izip, Itertools};
use metfor::{HectoPascal, Meters, Quantity};
use optional::{some, Noned, Optioned};
use std::{cmp::Ordering, ops::Sub};

/// Interpolate values from the profile using height as the primary coordinate.
///
/// Adjacent pairs of levels are searched in the order they are stored for the first pair whose
/// height interval contains `tgt_h`, regardless of whether the pair is ascending or descending.
/// Every attribute is interpolated on its own with the same height ratio, so a value missing on
/// either side of the bracket only makes that attribute missing in the result.
///
/// Wind direction is interpolated as a plain number of degrees, there is no special handling for
/// pairs that straddle north.
///
/// If no pair brackets the target, the level nearest in height is returned instead. The result
/// is `None` only for an empty profile.
///
/// # Examples
///
/// ```rust
/// use metfor::{Celsius, HectoPascal, Meters};
/// use skewt_diagram::{interpolate_at_height, Level, Profile};
///
/// let nan = std::f64::NAN;
/// let prof = Profile::from_levels(vec![
///     Level::new(1000.0, 0.0, 20.0, 10.0, nan, nan),
///     Level::new(850.0, 1500.0, 10.0, nan, nan, nan),
/// ]);
///
/// let lvl = interpolate_at_height(&prof, Meters(750.0)).unwrap();
/// assert_eq!(lvl.pressure.unwrap(), HectoPascal(925.0));
/// assert_eq!(lvl.temperature.unwrap(), Celsius(15.0));
/// assert!(lvl.dew_point.is_none());
///
/// // Above the top of the profile, get the top level.
/// let lvl = interpolate_at_height(&prof, Meters(9000.0)).unwrap();
/// assert_eq!(lvl.pressure.unwrap(), HectoPascal(850.0));
///
/// assert!(interpolate_at_height(&Profile::new(), Meters(750.0)).is_none());
/// ```
pub fn interpolate_at_height(prof: &Profile, tgt_h: Meters) -> Option<Level> {
    if prof.is_empty() {
        return None;
    }

    // What kind of bracket is this?
    enum BracketType {
        Bracket((usize, Meters), (usize, Meters)),
        EndEquals(usize),
    }

    let make_bracket = |pnt_0: (usize, Meters), pnt_1: (usize, Meters)| -> Option<BracketType> {
        let (i0, h0) = pnt_0;
        let (i1, h1) = pnt_1;

        if (h0 - tgt_h).unpack().abs() < std::f64::EPSILON {
            Some(BracketType::EndEquals(i0))
        } else if (h1 - tgt_h).unpack().abs() < std::f64::EPSILON {
            Some(BracketType::EndEquals(i1))
        } else if (h0 < tgt_h && h1 > tgt_h) || (h0 > tgt_h && h1 < tgt_h) {
            Some(BracketType::Bracket(pnt_0, pnt_1))
        } else {
            None
        }
    };

    let heights = || {
        prof.height_profile()
            .iter()
            .enumerate()
            // Levels with no height can't be placed, skip over them.
            .filter_map(|(i, h)| h.into_option().map(|h| (i, h)))
    };

    let bracketed = heights()
        .tuple_windows::<(_, _)>()
        .filter_map(|(pnt_0, pnt_1)| make_bracket(pnt_0, pnt_1))
        .nth(0)
        .and_then(|bracket| match bracket {
            BracketType::Bracket((i0, h0), (i1, h1)) => {
                let ratio = (tgt_h - h0).unpack() / (h1 - h0).unpack();
                let row0 = prof.level(i0)?;
                let row1 = prof.level(i1)?;
                Some(linear_interp_levels(row0, row1, tgt_h, ratio))
            }
            BracketType::EndEquals(i) => prof.level(i),
        });

    if bracketed.is_some() {
        return bracketed;
    }

    // Out of range or a malformed profile, fall back to the closest level.
    heights()
        .map(|(i, h)| (i, (h - tgt_h).unpack().abs()))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
        .or(Some(0))
        .and_then(|i| prof.level(i))
}

/// Pressure and height pairs from a profile, sorted by pressure.
///
/// Sorting once when the profile is loaded means lookups work the same whether the profile was
/// stored top down or bottom up.
#[derive(Debug, Clone, Default)]
pub struct PressureHeightTable {
    // Descending pressure
    by_pressure: Vec<(HectoPascal, Meters)>,
    // Ascending height
    by_height: Vec<(Meters, HectoPascal)>,
}

impl PressureHeightTable {
    /// Build the table from every level that has both a pressure and a height.
    pub fn new(prof: &Profile) -> Self {
        let mut by_pressure: Vec<(HectoPascal, Meters)> =
            izip!(prof.pressure_profile(), prof.height_profile())
                .filter_map(|(p, h)| Some((p.into_option()?, h.into_option()?)))
                .collect();
        by_pressure.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let mut by_height: Vec<(Meters, HectoPascal)> =
            by_pressure.iter().map(|&(p, h)| (h, p)).collect();
        by_height.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        PressureHeightTable {
            by_pressure,
            by_height,
        }
    }

    /// Are there no usable pairs?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_pressure.is_empty()
    }

    /// Height of a pressure level, clamped to the ends of the table. `None` if the table is empty.
    pub fn height(&self, p: HectoPascal) -> Option<Meters> {
        lookup_clamped(&self.by_pressure, p, |a, b| a >= b)
    }

    /// Pressure at a height, clamped to the ends of the table. `None` if the table is empty.
    pub fn pressure(&self, h: Meters) -> Option<HectoPascal> {
        lookup_clamped(&self.by_height, h, |a, b| a <= b)
    }
}

/// Piecewise linear lookup in a sorted table. `before(a, b)` is true when `a` sorts at or before
/// `b`. Targets outside the table get the value at the nearest end.
fn lookup_clamped<X, Y, F>(table: &[(X, Y)], tgt: X, before: F) -> Option<Y>
where
    X: Sub<X> + Copy + std::fmt::Debug + PartialEq,
    <X as Sub<X>>::Output: Quantity,
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
    F: Fn(X, X) -> bool,
{
    let &(first_x, first_y) = table.first()?;
    let &(last_x, last_y) = table.last()?;

    if before(tgt, first_x) {
        return Some(first_y);
    }
    if before(last_x, tgt) {
        return Some(last_y);
    }

    table
        .iter()
        .tuple_windows::<(_, _)>()
        .find_map(|(&(x0, y0), &(x1, y1))| {
            if before(x0, tgt) && before(tgt, x1) {
                if x0 == x1 {
                    Some(y0)
                } else {
                    Some(linear_interp(tgt, x0, x1, y0, y1))
                }
            } else {
                None
            }
        })
        .or(Some(last_y))
}

#[inline]
pub(crate) fn linear_interp<X, Y>(x_val: X, x1: X, x2: X, y1: Y, y2: Y) -> Y
where
    X: Sub<X> + Copy + std::fmt::Debug + std::cmp::PartialEq,
    <X as Sub<X>>::Output: Quantity,
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_ne!(x1, x2);

    let run = (x2 - x1).unpack();
    let rise = (y2 - y1).unpack();
    let dx = (x_val - x1).unpack();

    Y::pack(y1.unpack() + dx * (rise / run))
}

#[inline]
fn linear_interp_levels(row0: Level, row1: Level, tgt_h: Meters, ratio: f64) -> Level {
    let wind_direction = match (
        row0.wind_direction.into_option(),
        row1.wind_direction.into_option(),
    ) {
        (Some(d0), Some(d1)) => some(d0 + ratio * (d1 - d0)),
        _ => Optioned::default(),
    };

    Level {
        pressure: eval_linear_interp(row0.pressure, row1.pressure, ratio),
        height: some(tgt_h),
        temperature: eval_linear_interp(row0.temperature, row1.temperature, ratio),
        dew_point: eval_linear_interp(row0.dew_point, row1.dew_point, ratio),
        wind_direction,
        wind_speed: eval_linear_interp(row0.wind_speed, row1.wind_speed, ratio),
    }
}

#[inline]
fn eval_linear_interp<Y>(low_val: Optioned<Y>, high_val: Optioned<Y>, ratio: f64) -> Optioned<Y>
where
    Y: Quantity + Noned,
{
    match (low_val.into_option(), high_val.into_option()) {
        (Some(low), Some(high)) => {
            let (low, high) = (low.unpack(), high.unpack());
            present(low + ratio * (high - low))
        }
        _ => Optioned::default(),
    }
}
