//! Closed form approximations used to lay out the diagram.
//!
//! These are the simple textbook forms, chosen so the reference curves are cheap to regenerate on
//! every draw. They are not meant for parcel analysis.
use metfor::{Celsius, HectoPascal, Kelvin, Meters, Quantity};

/// R/cp for dry air.
pub const KAPPA: f64 = 0.286;

/// Offset between the Kelvin and Celsius scales.
pub const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// Reference pressure for potential temperature in hPa.
pub const P0: f64 = 1000.0;

/// Standard sea level pressure used by the barometric formula.
const STANDARD_SLP: f64 = 1013.25;
const BAROMETRIC_SCALE: f64 = 44_330.0;
const BAROMETRIC_EXP: f64 = 0.1903;

/// Ratio of molecular weights of water and dry air times 1000, for mixing ratio in g/kg.
const EPSILON_G_PER_KG: f64 = 621.97;

// Magnus formula coefficients over liquid water.
const MAGNUS_E0: f64 = 6.112;
const MAGNUS_A: f64 = 17.67;
const MAGNUS_B: f64 = 243.5;

/// Height of a pressure level in the international standard atmosphere.
#[inline]
pub fn barometric_height(p: HectoPascal) -> Meters {
    Meters(BAROMETRIC_SCALE * (1.0 - (p.unpack() / STANDARD_SLP).powf(BAROMETRIC_EXP)))
}

/// Inverse of `barometric_height`.
#[inline]
pub fn barometric_pressure(h: Meters) -> HectoPascal {
    HectoPascal(STANDARD_SLP * (1.0 - h.unpack() / BAROMETRIC_SCALE).powf(1.0 / BAROMETRIC_EXP))
}

/// Temperature along a dry adiabat, Poisson's equation.
///
/// # Examples
///
/// ```rust
/// use metfor::{HectoPascal, Kelvin};
/// use skewt_diagram::formulas::dry_adiabat_temperature;
///
/// let t = dry_adiabat_temperature(Kelvin(300.0), HectoPascal(1000.0));
/// assert!((t.0 - 26.85).abs() < 1.0e-9);
/// ```
#[inline]
pub fn dry_adiabat_temperature(theta: Kelvin, p: HectoPascal) -> Celsius {
    Celsius(theta.unpack() * (p.unpack() / P0).powf(KAPPA) - ZERO_CELSIUS_IN_KELVIN)
}

/// Temperature along a pseudo-adiabat.
///
/// This is the dry adiabat for `theta_e` with a linear correction for latent heating,
/// `0.02 C` per hPa above 1050 hPa. It is only good enough to show the shape of the moist
/// adiabats on the background of the diagram.
#[inline]
pub fn moist_adiabat_temperature(theta_e: Kelvin, p: HectoPascal) -> Celsius {
    let dry = dry_adiabat_temperature(theta_e, p).unpack();
    Celsius(dry - (1050.0 - p.unpack()) * 0.02)
}

/// Vapor pressure in hPa for a mixing ratio in g/kg.
#[inline]
pub fn vapor_pressure_from_mixing_ratio(mw_g_per_kg: f64, p: HectoPascal) -> HectoPascal {
    HectoPascal(mw_g_per_kg * p.unpack() / (EPSILON_G_PER_KG + mw_g_per_kg))
}

/// Dew point for a vapor pressure, inverted Magnus formula.
///
/// Returns `None` for a non-positive vapor pressure.
#[inline]
pub fn dew_point_from_vapor_pressure(e: HectoPascal) -> Option<Celsius> {
    let e = e.unpack();
    if e <= 0.0 {
        return None;
    }

    let ln_ratio = (e / MAGNUS_E0).ln();
    Some(Celsius(MAGNUS_B * ln_ratio / (MAGNUS_A - ln_ratio)))
}

/// Dew point of air with mixing ratio `mw_g_per_kg` at pressure `p`.
#[inline]
pub fn mixing_ratio_dew_point(mw_g_per_kg: f64, p: HectoPascal) -> Option<Celsius> {
    dew_point_from_vapor_pressure(vapor_pressure_from_mixing_ratio(mw_g_per_kg, p))
}

/// Convert m/s to km/h.
#[inline]
pub fn ms_to_kmh(speed: f64) -> f64 {
    speed * 3.6
}
