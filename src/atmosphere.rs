//! Two-segment standard-atmosphere model.
//!
//! Pure functions of altitude with no state; safe to call concurrently from
//! any number of sessions. The density relation is the exponential
//! scale-height model `rho = 1.225 * exp(-h / 8500)`, which every downstream
//! load number depends on; change it and all golden results move.

use serde::Serialize;

/// Sea-level temperature in kelvin.
pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
/// Tropospheric lapse rate in kelvin per metre.
pub const LAPSE_RATE_K_PER_M: f64 = 0.0065;
/// Altitude of the tropopause in metres; isothermal above.
pub const TROPOPAUSE_M: f64 = 11_000.0;
/// Stratospheric temperature in kelvin.
pub const STRATOSPHERE_TEMPERATURE_K: f64 = 216.65;
/// Sea-level air density in kilograms per cubic metre.
pub const SEA_LEVEL_DENSITY_KG_M3: f64 = 1.225;
/// Density scale height in metres.
pub const DENSITY_SCALE_HEIGHT_M: f64 = 8_500.0;
/// Ratio of specific heats for air.
const GAMMA: f64 = 1.4;
/// Specific gas constant for air in J/(kg·K).
const GAS_CONSTANT_J_PER_KG_K: f64 = 287.05;

/// Altitude band used for presentation and flight-condition classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Zone {
    /// Below 5000 m.
    Low,
    /// 5000 m up to 10 000 m.
    Medium,
    /// 10 000 m up to 18 000 m.
    High,
    /// 18 000 m and above.
    Stratosphere,
}

/// Air temperature in kelvin at the given altitude in metres.
#[must_use]
pub fn temperature_k(altitude_m: f64) -> f64 {
    if altitude_m <= TROPOPAUSE_M {
        SEA_LEVEL_TEMPERATURE_K - LAPSE_RATE_K_PER_M * altitude_m
    } else {
        STRATOSPHERE_TEMPERATURE_K
    }
}

/// Local speed of sound in metres per second, `a = sqrt(gamma * R * T)`.
#[must_use]
pub fn speed_of_sound_m_s(altitude_m: f64) -> f64 {
    (GAMMA * GAS_CONSTANT_J_PER_KG_K * temperature_k(altitude_m)).sqrt()
}

/// Air density in kilograms per cubic metre from the scale-height relation.
#[must_use]
pub fn air_density_kg_m3(altitude_m: f64) -> f64 {
    SEA_LEVEL_DENSITY_KG_M3 * (-altitude_m / DENSITY_SCALE_HEIGHT_M).exp()
}

/// Altitude band for the given altitude in metres.
#[must_use]
pub fn zone(altitude_m: f64) -> Zone {
    if altitude_m < 5_000.0 {
        Zone::Low
    } else if altitude_m < 10_000.0 {
        Zone::Medium
    } else if altitude_m < 18_000.0 {
        Zone::High
    } else {
        Zone::Stratosphere
    }
}

/// Atmospheric state at one altitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Conditions {
    /// Air temperature in kelvin.
    pub temperature_k: f64,
    /// Local speed of sound in metres per second.
    pub speed_of_sound_m_s: f64,
    /// Air density in kilograms per cubic metre.
    pub air_density_kg_m3: f64,
    /// Altitude band.
    pub zone: Zone,
}

/// Evaluate the full atmospheric state at an altitude in metres.
#[must_use]
pub fn conditions(altitude_m: f64) -> Conditions {
    Conditions {
        temperature_k: temperature_k(altitude_m),
        speed_of_sound_m_s: speed_of_sound_m_s(altitude_m),
        air_density_kg_m3: air_density_kg_m3(altitude_m),
        zone: zone(altitude_m),
    }
}
