//! Multi-lap stint simulation
//!
//! Each lap burns fuel, wears the tires, and may pick up a condition tag
//! that adds time. Deltas to the best lap are filled in by a second pass
//! once the whole stint is known.

use super::{validate_inputs, validate_stint_length, StrategyEngine};
use crate::conditions::TrackConditions;
use crate::core_types::units::{Kilograms, Seconds};
use crate::error::EngineError;
use crate::tires::TireCompound;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Fuel burned per lap (kg)
const FUEL_PER_LAP: f64 = 2.2;
/// Cars never run the tank below this reserve (kg)
const FUEL_RESERVE: f64 = 5.0;

/// Chance per eligible lap that a passing shower hits the car
const SHOWER_CHANCE: f64 = 0.3;
/// Showers can only appear after this lap...
const SHOWER_MIN_LAP: u32 = 10;
/// ...and only when rain probability is above this
const SHOWER_MIN_RAIN_PROBABILITY: f64 = 40.0;

const OVERHEAT_MIN_LAP: u32 = 15;
const OVERHEAT_TRACK_TEMP: f64 = 40.0;

const HIGH_WEAR_MIN_LAP: u32 = 20;
const HIGH_WEAR_DEGRADATION: f64 = 2.0;

/// Laps before this one are out-lap/warm-up laps
const WARM_UP_LAPS: u32 = 5;

/// Qualitative tag attached to each simulated lap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LapCondition {
    LightRain,
    TrackOverheating,
    HighTireWear,
    WarmingUp,
    Stable,
}

impl LapCondition {
    pub fn label(self) -> &'static str {
        match self {
            LapCondition::LightRain => "Light Rain",
            LapCondition::TrackOverheating => "Track Overheating",
            LapCondition::HighTireWear => "High Tire Wear",
            LapCondition::WarmingUp => "Warming Up",
            LapCondition::Stable => "Stable",
        }
    }

    /// Time added to a lap carrying this tag
    pub fn time_penalty(self) -> Seconds {
        match self {
            LapCondition::LightRain => Seconds::new(2.5),
            LapCondition::TrackOverheating => Seconds::new(0.3),
            LapCondition::WarmingUp => Seconds::new(0.5),
            LapCondition::HighTireWear | LapCondition::Stable => Seconds::ZERO,
        }
    }

    /// Pick the tag for a lap; the first matching rule wins
    ///
    /// The random draw is only taken on laps where a shower is possible, so
    /// dry stints never consume randomness.
    fn for_lap<R: Rng + ?Sized>(
        lap: u32,
        conditions: &TrackConditions,
        degradation: Seconds,
        rng: &mut R,
    ) -> Self {
        if lap > SHOWER_MIN_LAP
            && *conditions.rain_probability > SHOWER_MIN_RAIN_PROBABILITY
            && rng.random::<f64>() < SHOWER_CHANCE
        {
            LapCondition::LightRain
        } else if lap > OVERHEAT_MIN_LAP && *conditions.track_temp > OVERHEAT_TRACK_TEMP {
            LapCondition::TrackOverheating
        } else if lap > HIGH_WEAR_MIN_LAP && *degradation > HIGH_WEAR_DEGRADATION {
            LapCondition::HighTireWear
        } else if lap < WARM_UP_LAPS {
            LapCondition::WarmingUp
        } else {
            LapCondition::Stable
        }
    }
}

impl fmt::Display for LapCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One lap of a simulated stint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// 1-based lap number
    pub lap_number: u32,
    /// Final lap time including wear and the condition penalty
    pub lap_time: Seconds,
    /// Cumulative wear penalty applied on this lap
    pub tire_degradation: Seconds,
    /// Fuel remaining, rounded to 0.1 kg
    pub fuel: Kilograms,
    pub conditions: LapCondition,
    /// Gap to the fastest lap of the stint (0 for that lap)
    pub delta: Seconds,
}

/// Fuel left after `lap` laps, never below the reserve
fn remaining_fuel(fuel_load: Kilograms, lap: u32) -> Kilograms {
    Kilograms::new((*fuel_load - f64::from(lap) * FUEL_PER_LAP).max(FUEL_RESERVE))
}

impl StrategyEngine<'_> {
    /// Simulate a stint lap by lap
    ///
    /// # Arguments
    ///
    /// * `tire_id` - Compound fitted for the whole stint
    /// * `fuel_load` - Fuel at the start of lap 1
    /// * `base_track_time` - Dry, zero-fuel reference lap
    /// * `stint_length` - Number of laps, 1 to [`MAX_STINT_LENGTH`](super::MAX_STINT_LENGTH)
    /// * `rng` - Source for the per-lap shower draw
    ///
    /// # Errors
    /// Same validation as [`StrategyEngine::compute_lap_time_factors`], plus
    /// [`EngineError::InvalidParameter`] for a stint length outside
    /// `1..=MAX_STINT_LENGTH`.
    pub fn simulate_stint<R: Rng + ?Sized>(
        &self,
        conditions: &TrackConditions,
        tire_id: &str,
        fuel_load: Kilograms,
        base_track_time: Seconds,
        stint_length: u32,
        rng: &mut R,
    ) -> Result<Vec<SimulationResult>, EngineError> {
        let compound = self.tires.lookup(tire_id)?;
        validate_inputs(fuel_load, base_track_time)?;
        validate_stint_length(stint_length)?;
        self.run_stint(conditions, compound, fuel_load, base_track_time, stint_length, rng)
    }

    /// Stint loop for an already validated compound and inputs
    pub(super) fn run_stint<R: Rng + ?Sized>(
        &self,
        conditions: &TrackConditions,
        compound: &TireCompound,
        fuel_load: Kilograms,
        base_track_time: Seconds,
        stint_length: u32,
        rng: &mut R,
    ) -> Result<Vec<SimulationResult>, EngineError> {
        debug!(
            "Simulating {}-lap stint on {} with {} fuel, base {}",
            stint_length,
            compound.label,
            fuel_load,
            base_track_time.format_lap_time()
        );

        let mut results = Vec::with_capacity(stint_length as usize);

        // 1. Forward pass: fuel, wear, tag
        for lap in 1..=stint_length {
            let fuel = remaining_fuel(fuel_load, lap);
            let degradation = compound.degradation_at(lap);
            let base_lap = self
                .lap_time_factors(conditions, compound, fuel, base_track_time)?
                .estimated_lap_time;

            let tag = LapCondition::for_lap(lap, conditions, degradation, rng);
            let lap_time = base_lap + degradation + tag.time_penalty();

            trace!(
                "Lap {}: {} (wear {}, fuel {}, {})",
                lap,
                lap_time.format_lap_time(),
                degradation,
                fuel,
                tag
            );

            results.push(SimulationResult {
                lap_number: lap,
                lap_time,
                tire_degradation: degradation,
                fuel: fuel.round_to_tenth(),
                conditions: tag,
                delta: Seconds::ZERO,
            });
        }

        // 2. Deltas against the fastest lap
        let best = results
            .iter()
            .map(|r| r.lap_time)
            .min()
            .unwrap_or(Seconds::ZERO);
        for result in &mut results {
            result.delta = result.lap_time - best;
        }

        debug!(
            "Stint complete: best lap {} over {} laps",
            best.format_lap_time(),
            results.len()
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::CompassPoint;
    use crate::core_types::units::{Celsius, Hectopascals, KilometersPerHour, Kilometers, Percent};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Rng that always yields the same word; 0 makes every shower draw hit,
    /// `u64::MAX` makes every draw miss
    struct FixedRng(u64);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.0 >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 8];
            }
        }
    }

    fn conditions(rain: f64, track_temp: f64) -> TrackConditions {
        TrackConditions {
            temperature: Celsius::new(22.0),
            humidity: Percent::new(65.0),
            wind_speed: KilometersPerHour::new(8.0),
            wind_direction: CompassPoint::Ne,
            visibility: Kilometers::new(10.0),
            track_temp: Celsius::new(track_temp),
            air_pressure: Hectopascals::STANDARD,
            rain_probability: Percent::new(rain),
        }
    }

    #[test]
    fn test_remaining_fuel_respects_reserve() {
        assert!((*remaining_fuel(Kilograms::new(50.0), 1) - 47.8).abs() < 1e-12);
        assert_eq!(remaining_fuel(Kilograms::new(50.0), 21), 5.0);
        assert_eq!(remaining_fuel(Kilograms::new(3.0), 1), 5.0);
    }

    #[test]
    fn test_tag_priority() {
        let mut always = FixedRng(0);
        let mut never = FixedRng(u64::MAX);
        let wet_hot = conditions(60.0, 45.0);
        let deg = Seconds::new(3.0);

        assert_eq!(
            LapCondition::for_lap(22, &wet_hot, deg, &mut always),
            LapCondition::LightRain
        );
        assert_eq!(
            LapCondition::for_lap(22, &wet_hot, deg, &mut never),
            LapCondition::TrackOverheating
        );
        assert_eq!(
            LapCondition::for_lap(22, &conditions(10.0, 30.0), deg, &mut always),
            LapCondition::HighTireWear
        );
        assert_eq!(
            LapCondition::for_lap(4, &wet_hot, deg, &mut always),
            LapCondition::WarmingUp
        );
        assert_eq!(
            LapCondition::for_lap(5, &conditions(10.0, 30.0), Seconds::new(0.2), &mut always),
            LapCondition::Stable
        );
    }

    #[test]
    fn test_shower_boundaries() {
        let mut always = FixedRng(0);
        // Lap 10 is not past the threshold
        assert_ne!(
            LapCondition::for_lap(10, &conditions(60.0, 30.0), Seconds::ZERO, &mut always),
            LapCondition::LightRain
        );
        // Rain probability of exactly 40 never showers
        assert_ne!(
            LapCondition::for_lap(11, &conditions(40.0, 30.0), Seconds::ZERO, &mut always),
            LapCondition::LightRain
        );
    }

    #[test]
    fn test_tag_penalties() {
        assert_eq!(LapCondition::LightRain.time_penalty(), 2.5);
        assert_eq!(LapCondition::TrackOverheating.time_penalty(), 0.3);
        assert_eq!(LapCondition::WarmingUp.time_penalty(), 0.5);
        assert_eq!(LapCondition::HighTireWear.time_penalty(), 0.0);
        assert_eq!(LapCondition::Stable.to_string(), "Stable");
    }

    #[test]
    fn test_stint_trace_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let laps = StrategyEngine::standard()
            .simulate_stint(
                &conditions(15.0, 32.0),
                "medium",
                Kilograms::new(50.0),
                Seconds::new(73.5),
                25,
                &mut rng,
            )
            .unwrap();

        assert_eq!(laps.len(), 25);
        for (i, lap) in laps.iter().enumerate() {
            assert_eq!(lap.lap_number as usize, i + 1);
            assert!(lap.delta >= Seconds::ZERO);
        }
        assert_eq!(laps[0].conditions, LapCondition::WarmingUp);
        assert_eq!(laps[4].conditions, LapCondition::Stable);
        assert_eq!(laps[0].fuel, 47.8);
    }

    #[test]
    fn test_first_lap_time() {
        let mut rng = FixedRng(u64::MAX);
        let laps = StrategyEngine::standard()
            .simulate_stint(
                &conditions(15.0, 32.0),
                "medium",
                Kilograms::new(50.0),
                Seconds::new(73.5),
                1,
                &mut rng,
            )
            .unwrap();
        // 73.5 + 47.8 * 0.035 + 0.04 wear + 0.5 warm-up
        assert!((*laps[0].lap_time - 75.713).abs() < 1e-9);
        assert_eq!(laps[0].delta, 0.0);
    }

    #[test]
    fn test_oversized_stint_rejected() {
        let mut rng = FixedRng(0);
        let result = StrategyEngine::standard().simulate_stint(
            &conditions(15.0, 32.0),
            "soft",
            Kilograms::new(50.0),
            Seconds::new(73.5),
            u32::MAX,
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidParameter { name: "stint_length", .. })
        ));
    }

    #[test]
    fn test_zero_length_stint_rejected() {
        let mut rng = FixedRng(0);
        let result = StrategyEngine::standard().simulate_stint(
            &conditions(15.0, 32.0),
            "soft",
            Kilograms::new(50.0),
            Seconds::new(73.5),
            0,
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidParameter { name: "stint_length", .. })
        ));
    }
}
