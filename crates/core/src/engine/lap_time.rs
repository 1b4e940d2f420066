//! Single-lap estimate with a per-factor breakdown

use super::{validate_inputs, StrategyEngine};
use crate::conditions::TrackConditions;
use crate::core_types::units::{Kilograms, Percent, Seconds};
use crate::error::EngineError;
use crate::tires::{TireCompound, TireId};
use serde::{Deserialize, Serialize};

/// Seconds lost per °C away from the optimal air temperature
const AIR_TEMP_SENSITIVITY: f64 = 0.012;
/// Seconds lost per °C away from the optimal track temperature
const TRACK_TEMP_SENSITIVITY: f64 = 0.008;

/// Wind below this speed (km/h) costs nothing
const WIND_THRESHOLD_KMH: f64 = 10.0;
const WIND_SENSITIVITY: f64 = 0.006;

/// Seconds per kg of fuel carried
const FUEL_SENSITIVITY: f64 = 0.035;

// Rain bands are tuned policy, reproduced as-is
const LIGHT_RAIN_THRESHOLD: f64 = 30.0;
const HEAVY_RAIN_THRESHOLD: f64 = 70.0;
const LIGHT_RAIN_BASE: f64 = 2.0;
const LIGHT_RAIN_SLOPE: f64 = 0.25;
const HEAVY_RAIN_BASE: f64 = 12.0;
const HEAVY_RAIN_SLOPE: f64 = 0.1;
const INTERMEDIATE_RAIN_RELIEF: f64 = 8.0;
const WET_RAIN_RELIEF: f64 = 12.0;

/// Breakdown of one estimated lap into additive contributions
///
/// `estimated_lap_time` is exactly `base_time + temperature_impact +
/// wind_impact + tire_impact + fuel_impact + rain_impact`, summed in that
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapTimeFactors {
    pub base_time: Seconds,
    pub temperature_impact: Seconds,
    pub wind_impact: Seconds,
    pub tire_impact: Seconds,
    pub fuel_impact: Seconds,
    pub rain_impact: Seconds,
    pub estimated_lap_time: Seconds,
}

impl LapTimeFactors {
    /// Sum of the components, in the same order the estimate is built
    pub fn component_sum(&self) -> Seconds {
        self.base_time
            + self.temperature_impact
            + self.wind_impact
            + self.tire_impact
            + self.fuel_impact
            + self.rain_impact
    }
}

/// Rain penalty for a compound at a given rain probability
///
/// - `p <= 30`: 0
/// - `30 < p <= 70`: `2 + (p - 30) * 0.25`
/// - `p > 70`: `12 + (p - 70) * 0.1`
///
/// Intermediates shed up to 8s of that whenever `p > 30`, full wets up to
/// 12s whenever `p > 70`; neither goes below zero.
pub fn rain_impact(rain_probability: Percent, tire: TireId) -> Seconds {
    let p = *rain_probability;
    let mut impact = if p > HEAVY_RAIN_THRESHOLD {
        HEAVY_RAIN_BASE + (p - HEAVY_RAIN_THRESHOLD) * HEAVY_RAIN_SLOPE
    } else if p > LIGHT_RAIN_THRESHOLD {
        LIGHT_RAIN_BASE + (p - LIGHT_RAIN_THRESHOLD) * LIGHT_RAIN_SLOPE
    } else {
        0.0
    };

    match tire {
        TireId::Intermediate if p > LIGHT_RAIN_THRESHOLD => {
            impact = (impact - INTERMEDIATE_RAIN_RELIEF).max(0.0);
        }
        TireId::Wet if p > HEAVY_RAIN_THRESHOLD => {
            impact = (impact - WET_RAIN_RELIEF).max(0.0);
        }
        _ => {}
    }

    Seconds::new(impact)
}

impl StrategyEngine<'_> {
    /// Estimated lap time with its per-factor breakdown
    ///
    /// # Arguments
    ///
    /// * `tire_id` - One of `soft`, `medium`, `hard`, `intermediate`, `wet`
    /// * `fuel_load` - Fuel on board
    /// * `base_track_time` - Dry, zero-fuel reference lap for the circuit
    ///
    /// # Errors
    /// [`EngineError::InvalidTireId`] for an unknown compound;
    /// [`EngineError::InvalidParameter`] for a negative or non-finite fuel
    /// load, a non-positive base time, or conditions that drive the estimate
    /// negative or non-finite.
    pub fn compute_lap_time_factors(
        &self,
        conditions: &TrackConditions,
        tire_id: &str,
        fuel_load: Kilograms,
        base_track_time: Seconds,
    ) -> Result<LapTimeFactors, EngineError> {
        let compound = self.tires.lookup(tire_id)?;
        validate_inputs(fuel_load, base_track_time)?;
        self.lap_time_factors(conditions, compound, fuel_load, base_track_time)
    }

    /// Breakdown for an already validated compound and inputs
    pub(super) fn lap_time_factors(
        &self,
        conditions: &TrackConditions,
        compound: &TireCompound,
        fuel_load: Kilograms,
        base_track_time: Seconds,
    ) -> Result<LapTimeFactors, EngineError> {
        let temperature_impact = conditions.temperature.abs_diff(self.optimal_air_temp)
            * AIR_TEMP_SENSITIVITY
            + conditions.track_temp.abs_diff(self.optimal_track_temp) * TRACK_TEMP_SENSITIVITY;
        let wind_impact = (*conditions.wind_speed - WIND_THRESHOLD_KMH).max(0.0) * WIND_SENSITIVITY;
        let fuel_impact = *fuel_load * FUEL_SENSITIVITY;

        let mut factors = LapTimeFactors {
            base_time: base_track_time,
            temperature_impact: Seconds::new(temperature_impact),
            wind_impact: Seconds::new(wind_impact),
            tire_impact: compound.lap_time_delta,
            fuel_impact: Seconds::new(fuel_impact),
            rain_impact: rain_impact(conditions.rain_probability, compound.id),
            estimated_lap_time: Seconds::ZERO,
        };
        factors.estimated_lap_time = factors.component_sum();

        let estimate = *factors.estimated_lap_time;
        if !estimate.is_finite() || estimate < 0.0 {
            return Err(EngineError::invalid(
                "conditions",
                format!("estimated lap time {estimate} is outside the modeled range"),
            ));
        }

        Ok(factors)
    }
}
