//! Pitwall Core Library
//!
//! Weather-aware lap-time and race-strategy engine for Formula 1 circuits.
//! Translates raw weather-station observations into track conditions, then
//! estimates lap times, simulates tire stints and recommends strategies.
//!
//! ## Pipeline
//!
//! - [`conditions`]: observation → [`TrackConditions`], plus race-control
//!   classification of the raw observation
//! - [`engine`]: lap-time breakdown, stint simulation, strategy/DRS advice
//! - [`tires`]: the immutable five-compound table
//! - [`circuit`]: per-circuit base times, temperature optima and stations

// Core types and utilities
pub mod core_types;

pub mod circuit;
pub mod conditions;
pub mod engine;
pub mod error;
pub mod tires;

// Re-export core types
pub use core_types::{Celsius, Kilograms, KilometersPerHour, MetersPerSecond, Percent, Seconds};

pub use circuit::{CircuitProfile, GeoPoint, WeatherStation};
pub use conditions::{
    classify_race_conditions, translate_conditions, RaceConditions, TrackConditions,
    WeatherObservation,
};
pub use engine::{
    CompoundComparison, LapCondition, LapTimeFactors, RaceStrategy, SimulationResult,
    StintSummary, StrategyEngine,
};
pub use error::EngineError;
pub use tires::{TireCompound, TireId, TireTable};
