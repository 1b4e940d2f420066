//! Stint aggregates and compound comparison

use super::stint::{LapCondition, SimulationResult};
use super::{validate_inputs, validate_stint_length, StrategyEngine};
use crate::conditions::TrackConditions;
use crate::core_types::units::{Kilograms, Seconds};
use crate::error::EngineError;
use crate::tires::TireId;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Headline numbers for a simulated stint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StintSummary {
    pub laps: u32,
    pub best_lap: Seconds,
    /// First lap that set the best time
    pub best_lap_number: u32,
    pub average_lap: Seconds,
    /// Slowest lap's gap to the best
    pub max_delta: Seconds,
    pub total_time: Seconds,
    pub final_fuel: Kilograms,
    /// Laps carrying each condition tag; tags that never appeared are absent
    pub condition_counts: FxHashMap<LapCondition, u32>,
}

impl StintSummary {
    /// Laps that carried `condition`
    pub fn count(&self, condition: LapCondition) -> u32 {
        self.condition_counts.get(&condition).copied().unwrap_or(0)
    }
}

/// Aggregate a stint trace, `None` for an empty trace
pub fn summarize_stint(results: &[SimulationResult]) -> Option<StintSummary> {
    let last = results.last()?;
    let best = results.iter().min_by_key(|r| r.lap_time)?;

    let total_time: Seconds = results.iter().map(|r| r.lap_time).sum();
    let max_delta = results
        .iter()
        .map(|r| r.delta)
        .max()
        .unwrap_or(Seconds::ZERO);

    let mut condition_counts = FxHashMap::default();
    for r in results {
        *condition_counts.entry(r.conditions).or_insert(0) += 1;
    }

    Some(StintSummary {
        laps: results.len() as u32,
        best_lap: best.lap_time,
        best_lap_number: best.lap_number,
        average_lap: total_time / results.len() as f64,
        max_delta,
        total_time,
        final_fuel: last.fuel,
        condition_counts,
    })
}

/// One compound's result in a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundComparison {
    pub tire: TireId,
    pub summary: StintSummary,
}

impl StrategyEngine<'_> {
    /// Run the same stint on every compound and rank them by total time
    ///
    /// Compounds are simulated in parallel. Each one draws from its own
    /// [`StdRng`] seeded with `seed` plus the compound's table index, so the
    /// result is the same for a given seed regardless of thread scheduling.
    ///
    /// # Errors
    /// [`EngineError::InvalidParameter`] for the same inputs
    /// [`StrategyEngine::simulate_stint`] rejects.
    pub fn compare_compounds(
        &self,
        conditions: &TrackConditions,
        fuel_load: Kilograms,
        base_track_time: Seconds,
        stint_length: u32,
        seed: u64,
    ) -> Result<Vec<CompoundComparison>, EngineError> {
        validate_inputs(fuel_load, base_track_time)?;
        validate_stint_length(stint_length)?;

        debug!(
            "Comparing {} compounds over {} laps (seed {})",
            TireId::ALL.len(),
            stint_length,
            seed
        );

        let mut comparisons = TireId::ALL
            .par_iter()
            .map(|&tire| -> Result<CompoundComparison, EngineError> {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(tire.index() as u64));
                let laps = self.run_stint(
                    conditions,
                    self.tires.get(tire),
                    fuel_load,
                    base_track_time,
                    stint_length,
                    &mut rng,
                )?;
                let summary = summarize_stint(&laps).ok_or_else(|| {
                    EngineError::invalid("stint_length", "stint produced no laps")
                })?;
                Ok(CompoundComparison { tire, summary })
            })
            .collect::<Result<Vec<_>, _>>()?;

        comparisons.sort_by_key(|c| c.summary.total_time);
        Ok(comparisons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lap(n: u32, time: f64, delta: f64, conditions: LapCondition) -> SimulationResult {
        SimulationResult {
            lap_number: n,
            lap_time: Seconds::new(time),
            tire_degradation: Seconds::ZERO,
            fuel: Kilograms::new(50.0 - f64::from(n)),
            conditions,
            delta: Seconds::new(delta),
        }
    }

    #[test]
    fn test_empty_trace_has_no_summary() {
        assert!(summarize_stint(&[]).is_none());
    }

    #[test]
    fn test_summary_fields() {
        let trace = [
            lap(1, 76.0, 1.0, LapCondition::WarmingUp),
            lap(2, 75.0, 0.0, LapCondition::Stable),
            lap(3, 77.5, 2.5, LapCondition::LightRain),
            lap(4, 75.5, 0.5, LapCondition::Stable),
        ];
        let summary = summarize_stint(&trace).unwrap();
        assert_eq!(summary.laps, 4);
        assert_eq!(summary.best_lap, 75.0);
        assert_eq!(summary.best_lap_number, 2);
        assert_eq!(summary.total_time, 304.0);
        assert_eq!(summary.average_lap, 76.0);
        assert_eq!(summary.max_delta, 2.5);
        assert_eq!(summary.final_fuel, 46.0);
        assert_eq!(summary.count(LapCondition::Stable), 2);
        assert_eq!(summary.count(LapCondition::LightRain), 1);
        assert_eq!(summary.count(LapCondition::HighTireWear), 0);
    }

    #[test]
    fn test_ties_report_first_best_lap() {
        let trace = [
            lap(1, 75.0, 0.0, LapCondition::Stable),
            lap(2, 75.0, 0.0, LapCondition::Stable),
        ];
        assert_eq!(summarize_stint(&trace).unwrap().best_lap_number, 1);
    }

    #[test]
    fn test_compare_compounds_ranks_dry_slicks_first() {
        let conditions = TrackConditions::fallback();
        let ranking = StrategyEngine::standard()
            .compare_compounds(&conditions, Kilograms::new(40.0), Seconds::new(73.5), 12, 42)
            .unwrap();

        assert_eq!(ranking.len(), 5);
        for pair in ranking.windows(2) {
            assert!(pair[0].summary.total_time <= pair[1].summary.total_time);
        }
        // Wets carry an 8s penalty every lap in the dry
        assert_eq!(ranking.last().unwrap().tire, TireId::Wet);
    }

    #[test]
    fn test_compare_compounds_is_seed_stable() {
        let conditions = TrackConditions::fallback();
        let engine = StrategyEngine::standard();
        let a = engine
            .compare_compounds(&conditions, Kilograms::new(40.0), Seconds::new(73.5), 20, 9)
            .unwrap();
        let b = engine
            .compare_compounds(&conditions, Kilograms::new(40.0), Seconds::new(73.5), 20, 9)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_compare_compounds_rejects_empty_stint() {
        let result = StrategyEngine::standard().compare_compounds(
            &TrackConditions::fallback(),
            Kilograms::new(40.0),
            Seconds::new(73.5),
            0,
            1,
        );
        assert!(result.is_err());
    }
}
