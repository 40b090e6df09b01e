//! Encode winds as meteorological barbs.
//!
//! Encoding is split in two pure steps. [`decompose`] turns a speed into a count of pennants and
//! barbs, and [`layout_barb`] turns those counts into vector primitives around an anchor point.
//! Neither step draws anything.
use crate::{coords::Point, formulas::ms_to_kmh};
use metfor::{MetersPSec, Quantity};

/// Speed in km/h represented by a pennant.
pub const PENNANT_SPEED: f64 = 50.0;
/// Speed in km/h represented by a full barb.
pub const FULL_BARB_SPEED: f64 = 10.0;
/// Speed in km/h represented by a half barb.
pub const HALF_BARB_SPEED: f64 = 5.0;

/// Length of the staff in surface units.
pub const STAFF_LENGTH: f64 = 30.0;
/// Length of staff taken up by each pennant.
pub const PENNANT_WIDTH: f64 = 10.0;
/// Spacing along the staff between barbs.
pub const BARB_SPACING: f64 = 6.0;
/// Length of a full barb, perpendicular to the staff. Half barbs are half as long.
pub const BARB_LENGTH: f64 = 15.0;
/// Radius of the calm wind circle.
pub const CALM_RADIUS: f64 = 5.0;
/// Most pennants drawn on one staff, 1000 km/h.
pub const MAX_DRAWN_PENNANTS: u32 = 20;

/// The elements of a barb glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BarbCounts {
    /// Number of 50 km/h pennants.
    pub pennants: u32,
    /// Number of 10 km/h barbs.
    pub full_barbs: u32,
    /// Whether there is a 5 km/h half barb.
    pub half_barb: bool,
}

impl BarbCounts {
    /// Nothing to draw on a staff, the wind is calm.
    #[inline]
    pub fn is_calm(&self) -> bool {
        self.pennants == 0 && self.full_barbs == 0 && !self.half_barb
    }

    /// The speed in km/h the glyph represents.
    #[inline]
    pub fn speed_kmh(&self) -> f64 {
        f64::from(self.pennants) * PENNANT_SPEED
            + f64::from(self.full_barbs) * FULL_BARB_SPEED
            + if self.half_barb { HALF_BARB_SPEED } else { 0.0 }
    }
}

/// Break a speed in km/h into pennants and barbs.
///
/// Each threshold sits half a unit below the value it represents, so the speed is rounded to the
/// nearest 5 km/h before it is split up. Counts too large for a `u32` saturate.
///
/// # Examples
///
/// ```rust
/// use skewt_diagram::wind_barb::{decompose, BarbCounts};
///
/// assert_eq!(
///     decompose(25.0),
///     BarbCounts { pennants: 0, full_barbs: 2, half_barb: true }
/// );
/// assert_eq!(
///     decompose(52.0),
///     BarbCounts { pennants: 1, full_barbs: 0, half_barb: false }
/// );
/// assert!(decompose(1.0).is_calm());
/// ```
pub fn decompose(speed_kmh: f64) -> BarbCounts {
    if !speed_kmh.is_finite() {
        return BarbCounts::default();
    }

    // Whole half barbs after rounding to the nearest 5 km/h.
    let units = ((speed_kmh + HALF_BARB_SPEED / 2.0) / HALF_BARB_SPEED).floor();
    if units < 1.0 {
        return BarbCounts::default();
    }

    let per_pennant = PENNANT_SPEED / HALF_BARB_SPEED;
    let per_barb = FULL_BARB_SPEED / HALF_BARB_SPEED;

    let pennants = (units / per_pennant).floor();
    let rest = (units - pennants * per_pennant).max(0.0).min(per_pennant - 1.0);
    let full_barbs = (rest / per_barb).floor();

    BarbCounts {
        pennants: pennants as u32,
        full_barbs: full_barbs as u32,
        half_barb: rest - full_barbs * per_barb >= 1.0,
    }
}

/// Length of the staff needed to carry the feathers of `counts`.
///
/// This is [`STAFF_LENGTH`] unless the feathers would reach within one barb spacing of the
/// anchor, then the staff grows so they don't.
pub fn staff_length(counts: BarbCounts) -> f64 {
    let pennants = f64::from(counts.pennants.min(MAX_DRAWN_PENNANTS));
    let feathers = f64::from(counts.full_barbs) + if counts.half_barb { 1.0 } else { 0.0 };

    let lowest = if counts.pennants == 0 && counts.full_barbs == 0 {
        // A lone half barb sits one spacing in from the tip.
        BARB_SPACING
    } else if feathers > 0.0 {
        pennants * PENNANT_WIDTH + (feathers - 1.0) * BARB_SPACING
    } else {
        pennants * PENNANT_WIDTH
    };

    STAFF_LENGTH.max(lowest + BARB_SPACING)
}

/// A vector drawing element of a barb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// A straight line, the staff or a barb.
    Segment {
        /// Start of the line.
        from: Point,
        /// End of the line.
        to: Point,
    },
    /// A filled triangle, a pennant.
    Triangle([Point; 3]),
    /// An open circle, the calm symbol.
    Circle {
        /// Center of the circle.
        center: Point,
        /// Radius of the circle.
        radius: f64,
    },
}

/// Lay out a barb glyph at `anchor` for a wind from `direction` degrees.
///
/// The staff points toward where the wind comes from, with 0 up and angles increasing clockwise.
/// Pennants start at the tip of the staff and take [`PENNANT_WIDTH`] each. Full barbs follow at
/// [`BARB_SPACING`] intervals starting where the last pennant ends, and then the half barb, all on
/// the clockwise side of the staff. A half barb on its own is set in from the tip so it can't be
/// mistaken for a full barb.
///
/// The staff is [`STAFF_LENGTH`] long, or longer for strong winds, see [`staff_length`]. At most
/// [`MAX_DRAWN_PENNANTS`] pennants are drawn.
pub fn layout_barb(anchor: Point, direction: f64, counts: BarbCounts) -> Vec<Primitive> {
    if counts.is_calm() {
        return vec![Primitive::Circle {
            center: anchor,
            radius: CALM_RADIUS,
        }];
    }

    let (sin, cos) = direction.to_radians().sin_cos();
    // Unit vector along the staff toward the tip, and perpendicular to it.
    let (ux, uy) = (sin, -cos);
    let (px, py) = (cos, sin);

    let along = |dist: f64| Point::new(anchor.x + ux * dist, anchor.y + uy * dist);
    let out = |base: Point, len: f64| Point::new(base.x + px * len, base.y + py * len);

    let pennants = counts.pennants.min(MAX_DRAWN_PENNANTS);
    let staff = staff_length(counts);

    let mut prims = Vec::with_capacity(
        1 + pennants as usize + counts.full_barbs as usize + counts.half_barb as usize,
    );

    let tip = along(staff);
    prims.push(Primitive::Segment { from: anchor, to: tip });

    // Distance from the tip down the staff.
    let mut pos = 0.0;

    for _ in 0..pennants {
        let top = along(staff - pos);
        let bottom = along(staff - pos - PENNANT_WIDTH);
        prims.push(Primitive::Triangle([top, out(top, BARB_LENGTH), bottom]));
        pos += PENNANT_WIDTH;
    }

    for _ in 0..counts.full_barbs {
        let base = along(staff - pos);
        prims.push(Primitive::Segment {
            from: base,
            to: out(base, BARB_LENGTH),
        });
        pos += BARB_SPACING;
    }

    if counts.half_barb {
        if counts.pennants == 0 && counts.full_barbs == 0 {
            pos = BARB_SPACING;
        }

        let base = along(staff - pos);
        prims.push(Primitive::Segment {
            from: base,
            to: out(base, BARB_LENGTH / 2.0),
        });
    }

    prims
}

/// Encode a wind for display at `anchor`.
///
/// # Examples
///
/// ```rust
/// use metfor::MetersPSec;
/// use skewt_diagram::{coords::Point, wind_barb::{encode, Primitive}};
///
/// let prims = encode(Point::new(0.0, 0.0), 270.0, MetersPSec(0.2));
/// assert_eq!(prims.len(), 1);
/// assert!(matches!(prims[0], Primitive::Circle { .. }));
/// ```
pub fn encode(anchor: Point, direction: f64, speed: MetersPSec) -> Vec<Primitive> {
    layout_barb(anchor, direction, decompose(ms_to_kmh(speed.unpack())))
}
