//! Tire compound table
//!
//! The compound set is closed: soft, medium, hard, intermediate and wet.
//! [`TireTable::standard`] builds the table once; the engine borrows it and
//! never mutates it.

use crate::core_types::units::Seconds;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the five tire compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TireId {
    /// C5 slick, fastest and shortest-lived
    Soft,
    /// C4 slick, the lap-time baseline
    Medium,
    /// C3 slick, slow but durable
    Hard,
    /// Grooved tire for damp or drying track
    Intermediate,
    /// Full wet for standing water
    Wet,
}

impl TireId {
    /// All compounds in table order
    pub const ALL: [TireId; 5] = [
        TireId::Soft,
        TireId::Medium,
        TireId::Hard,
        TireId::Intermediate,
        TireId::Wet,
    ];

    /// Lowercase identifier used by callers and the CLI
    pub fn as_str(self) -> &'static str {
        match self {
            TireId::Soft => "soft",
            TireId::Medium => "medium",
            TireId::Hard => "hard",
            TireId::Intermediate => "intermediate",
            TireId::Wet => "wet",
        }
    }

    /// Position in [`TireId::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for TireId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TireId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::InvalidTireId(s.to_string()))
    }
}

impl fmt::Display for TireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance parameters of one compound
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TireCompound {
    pub id: TireId,
    pub label: &'static str,
    /// Presentation color token
    pub color: &'static str,
    /// Seconds added per lap of wear, linear up to `optimal_stint_length`
    pub degradation_rate: f64,
    /// Pace offset relative to the medium compound (negative = faster)
    pub lap_time_delta: Seconds,
    /// Lap count after which wear accelerates
    pub optimal_stint_length: u32,
}

impl TireCompound {
    pub const SOFT: TireCompound = TireCompound {
        id: TireId::Soft,
        label: "C5 Soft",
        color: "red",
        degradation_rate: 0.08,
        lap_time_delta: Seconds::new(-0.6),
        optimal_stint_length: 15,
    };

    pub const MEDIUM: TireCompound = TireCompound {
        id: TireId::Medium,
        label: "C4 Medium",
        color: "yellow",
        degradation_rate: 0.04,
        lap_time_delta: Seconds::new(0.0),
        optimal_stint_length: 25,
    };

    pub const HARD: TireCompound = TireCompound {
        id: TireId::Hard,
        label: "C3 Hard",
        color: "white",
        degradation_rate: 0.02,
        lap_time_delta: Seconds::new(0.8),
        optimal_stint_length: 35,
    };

    /// Much slower than slicks on a dry track
    pub const INTERMEDIATE: TireCompound = TireCompound {
        id: TireId::Intermediate,
        label: "Intermediate",
        color: "green",
        degradation_rate: 0.06,
        lap_time_delta: Seconds::new(3.5),
        optimal_stint_length: 20,
    };

    pub const WET: TireCompound = TireCompound {
        id: TireId::Wet,
        label: "Full Wet",
        color: "blue",
        degradation_rate: 0.05,
        lap_time_delta: Seconds::new(8.0),
        optimal_stint_length: 25,
    };

    /// Wear multiplier for a lap: 1 up to the design life, then +15% per lap beyond it
    pub fn degradation_multiplier(&self, lap: u32) -> f64 {
        if lap <= self.optimal_stint_length {
            1.0
        } else {
            1.0 + f64::from(lap - self.optimal_stint_length) * 0.15
        }
    }

    /// Cumulative wear penalty after `lap` laps on this set
    pub fn degradation_at(&self, lap: u32) -> Seconds {
        let raw = self.degradation_rate * f64::from(lap);
        Seconds::new(raw * self.degradation_multiplier(lap))
    }
}

/// Immutable compound table, indexed by [`TireId`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TireTable {
    compounds: [TireCompound; 5],
}

impl TireTable {
    /// The five-compound table used by the dashboard
    pub const STANDARD: TireTable = TireTable {
        compounds: [
            TireCompound::SOFT,
            TireCompound::MEDIUM,
            TireCompound::HARD,
            TireCompound::INTERMEDIATE,
            TireCompound::WET,
        ],
    };

    /// Copy of [`TireTable::STANDARD`]
    pub fn standard() -> Self {
        Self::STANDARD
    }

    /// Compound for a known id
    pub fn get(&self, id: TireId) -> &TireCompound {
        &self.compounds[id.index()]
    }

    /// Compound for a caller-supplied identifier
    ///
    /// # Errors
    /// [`EngineError::InvalidTireId`] when `id` is not one of the five compounds.
    pub fn lookup(&self, id: &str) -> Result<&TireCompound, EngineError> {
        let id: TireId = id.parse()?;
        Ok(self.get(id))
    }

    /// Compounds in table order
    pub fn iter(&self) -> impl Iterator<Item = &TireCompound> {
        self.compounds.iter()
    }
}

impl Default for TireTable {
    fn default() -> Self {
        TireTable::standard()
    }
}
