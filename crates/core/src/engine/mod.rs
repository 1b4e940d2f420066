//! Lap-time and strategy engine
//!
//! Everything here is a pure function of its inputs. The only run-to-run
//! variability is the rain-shower draw inside [`StrategyEngine::simulate_stint`],
//! which comes from a caller-supplied [`rand::Rng`].
//!
//! The free functions at the bottom of this module run against the standard
//! tire table and the default circuit optima, for callers that don't need a
//! custom [`StrategyEngine`].
//!
//! # Example
//! ```
//! use pitwall_core::conditions::TrackConditions;
//! use pitwall_core::core_types::{Kilograms, Seconds};
//! use pitwall_core::engine;
//!
//! let conditions = TrackConditions::fallback();
//! let factors = engine::compute_lap_time_factors(
//!     &conditions,
//!     "soft",
//!     Kilograms::new(40.0),
//!     Seconds::new(73.5),
//! )
//! .unwrap();
//! assert!(factors.estimated_lap_time > factors.base_time);
//!
//! let strategy = engine::get_race_strategy(&conditions);
//! assert_eq!(strategy.name, "Optimal Strategy");
//! ```

mod advice;
mod lap_time;
mod stint;
mod summary;

pub use advice::{
    get_drs_effectiveness, get_race_strategy, track_insights, DrsEffectiveness, RaceStrategy,
    RiskLevel, TrackInsight,
};
pub use lap_time::{rain_impact, LapTimeFactors};
pub use stint::{LapCondition, SimulationResult};
pub use summary::{summarize_stint, CompoundComparison, StintSummary};

use crate::circuit::CircuitProfile;
use crate::conditions::TrackConditions;
use crate::core_types::units::{Celsius, Kilograms, Seconds};
use crate::error::EngineError;
use crate::tires::TireTable;
use rand::Rng;

static STANDARD_TIRES: TireTable = TireTable::STANDARD;

/// Lap-time model bound to a tire table and a circuit's temperature optima
///
/// The table is borrowed: it is built once at startup and shared by every
/// engine that needs it.
#[derive(Debug, Clone, Copy)]
pub struct StrategyEngine<'a> {
    tires: &'a TireTable,
    optimal_air_temp: Celsius,
    optimal_track_temp: Celsius,
}

impl<'a> StrategyEngine<'a> {
    /// Engine over `tires` with the default 22°C air / 32°C track optima
    pub fn new(tires: &'a TireTable) -> Self {
        StrategyEngine {
            tires,
            optimal_air_temp: CircuitProfile::DEFAULT_OPTIMAL_AIR_TEMP,
            optimal_track_temp: CircuitProfile::DEFAULT_OPTIMAL_TRACK_TEMP,
        }
    }

    /// Take the temperature optima from a circuit profile
    pub fn with_circuit(mut self, circuit: &CircuitProfile) -> Self {
        self.optimal_air_temp = circuit.optimal_air_temp;
        self.optimal_track_temp = circuit.optimal_track_temp;
        self
    }

    pub fn tires(&self) -> &'a TireTable {
        self.tires
    }
}

impl StrategyEngine<'static> {
    /// Engine over the process-wide standard tire table
    pub fn standard() -> Self {
        StrategyEngine::new(&STANDARD_TIRES)
    }
}

impl Default for StrategyEngine<'static> {
    fn default() -> Self {
        StrategyEngine::standard()
    }
}

/// Reject fuel loads and base times outside the modeled domain
fn validate_inputs(fuel_load: Kilograms, base_track_time: Seconds) -> Result<(), EngineError> {
    if !fuel_load.is_finite() || *fuel_load < 0.0 {
        return Err(EngineError::invalid(
            "fuel_load",
            format!("must be a non-negative mass in kg, got {}", *fuel_load),
        ));
    }
    if !base_track_time.is_finite() || *base_track_time <= 0.0 {
        return Err(EngineError::invalid(
            "base_track_time",
            format!("must be a positive lap time in seconds, got {}", *base_track_time),
        ));
    }
    Ok(())
}

/// Longest stint the simulator accepts, in laps
pub const MAX_STINT_LENGTH: u32 = 500;

/// Stints run from one lap up to [`MAX_STINT_LENGTH`]
fn validate_stint_length(stint_length: u32) -> Result<(), EngineError> {
    if stint_length == 0 {
        return Err(EngineError::invalid(
            "stint_length",
            "a stint needs at least one lap",
        ));
    }
    if stint_length > MAX_STINT_LENGTH {
        return Err(EngineError::invalid(
            "stint_length",
            format!("at most {MAX_STINT_LENGTH} laps, got {stint_length}"),
        ));
    }
    Ok(())
}

/// Estimated lap time with per-factor breakdown, using the standard tire table
///
/// # Errors
/// See [`StrategyEngine::compute_lap_time_factors`].
pub fn compute_lap_time_factors(
    conditions: &TrackConditions,
    tire_id: &str,
    fuel_load: Kilograms,
    base_track_time: Seconds,
) -> Result<LapTimeFactors, EngineError> {
    StrategyEngine::standard().compute_lap_time_factors(
        conditions,
        tire_id,
        fuel_load,
        base_track_time,
    )
}

/// Lap-by-lap stint trace, using the standard tire table
///
/// # Errors
/// See [`StrategyEngine::simulate_stint`].
pub fn simulate_stint<R: Rng + ?Sized>(
    conditions: &TrackConditions,
    tire_id: &str,
    fuel_load: Kilograms,
    base_track_time: Seconds,
    stint_length: u32,
    rng: &mut R,
) -> Result<Vec<SimulationResult>, EngineError> {
    StrategyEngine::standard().simulate_stint(
        conditions,
        tire_id,
        fuel_load,
        base_track_time,
        stint_length,
        rng,
    )
}
