//! Stint simulation behavior over whole stints
use ctor::ctor;
use pitwall_core::conditions::{CompassPoint, TrackConditions};
use pitwall_core::core_types::{Celsius, Hectopascals, Kilometers, KilometersPerHour, Percent};
use pitwall_core::engine::{self, summarize_stint};
use pitwall_core::{Kilograms, LapCondition, Seconds, StrategyEngine, TireId};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing_subscriber::EnvFilter;

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Rng stuck on one word: 0 makes every shower draw hit, `u64::MAX` miss
struct FixedRng(u64);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for (i, byte) in dst.iter_mut().enumerate() {
            *byte = bytes[i % 8];
        }
    }
}

fn conditions(track_temp: f64, rain: f64) -> TrackConditions {
    TrackConditions {
        temperature: Celsius::new(22.0),
        humidity: Percent::new(60.0),
        wind_speed: KilometersPerHour::new(8.0),
        wind_direction: CompassPoint::Sse,
        visibility: Kilometers::new(10.0),
        track_temp: Celsius::new(track_temp),
        air_pressure: Hectopascals::STANDARD,
        rain_probability: Percent::new(rain),
    }
}

#[test]
fn test_degradation_never_decreases() {
    for tire in TireId::ALL {
        let laps = engine::simulate_stint(
            &conditions(32.0, 10.0),
            tire.as_str(),
            Kilograms::new(60.0),
            Seconds::new(73.5),
            45,
            &mut FixedRng(u64::MAX),
        )
        .unwrap();
        for pair in laps.windows(2) {
            assert!(
                pair[1].tire_degradation >= pair[0].tire_degradation,
                "{tire}: lap {} wear dropped",
                pair[1].lap_number
            );
        }
    }
}

#[test]
fn test_deltas_are_relative_to_the_fastest_lap() {
    let mut rng = StdRng::seed_from_u64(2024);
    let laps = engine::simulate_stint(
        &conditions(44.0, 65.0),
        "soft",
        Kilograms::new(80.0),
        Seconds::new(73.078),
        30,
        &mut rng,
    )
    .unwrap();

    let best = laps.iter().map(|l| l.lap_time).min().unwrap();
    assert!(laps.iter().all(|l| l.delta >= Seconds::ZERO));
    assert!(laps.iter().any(|l| l.delta == 0.0));
    for lap in &laps {
        assert_eq!(lap.delta, lap.lap_time - best);
    }
}

#[test]
fn test_single_fastest_lap_has_zero_delta() {
    // Dry medium stint: fuel hits the reserve on lap 7, after which wear
    // makes every lap slower, so all lap times differ
    let laps = engine::simulate_stint(
        &conditions(32.0, 10.0),
        "medium",
        Kilograms::new(20.0),
        Seconds::new(73.5),
        30,
        &mut FixedRng(u64::MAX),
    )
    .unwrap();

    let zero_laps: Vec<u32> = laps
        .iter()
        .filter(|l| l.delta == 0.0)
        .map(|l| l.lap_number)
        .collect();
    assert_eq!(zero_laps, vec![7]);
    assert!(laps.iter().filter(|l| l.lap_number != 7).all(|l| l.delta > 0.0));
}

#[test]
fn test_fuel_holds_at_reserve() {
    let laps = engine::simulate_stint(
        &conditions(32.0, 10.0),
        "hard",
        Kilograms::new(30.0),
        Seconds::new(73.5),
        30,
        &mut FixedRng(u64::MAX),
    )
    .unwrap();

    assert!(laps.iter().all(|l| l.fuel >= 5.0));
    // 30 - 12 * 2.2 = 3.6, clamped
    assert_eq!(laps[11].fuel, 5.0);
    assert_eq!(laps.last().unwrap().fuel, 5.0);
}

#[test]
fn test_showers_hit_after_lap_ten() {
    let laps = engine::simulate_stint(
        &conditions(30.0, 60.0),
        "intermediate",
        Kilograms::new(50.0),
        Seconds::new(73.5),
        12,
        &mut FixedRng(0),
    )
    .unwrap();

    let tags: Vec<LapCondition> = laps.iter().map(|l| l.conditions).collect();
    assert_eq!(&tags[..4], &[LapCondition::WarmingUp; 4]);
    assert_eq!(&tags[4..10], &[LapCondition::Stable; 6]);
    assert_eq!(&tags[10..], &[LapCondition::LightRain; 2]);

    // Same stint without the shower is 2.5s quicker on those laps
    let dry = engine::simulate_stint(
        &conditions(30.0, 60.0),
        "intermediate",
        Kilograms::new(50.0),
        Seconds::new(73.5),
        12,
        &mut FixedRng(u64::MAX),
    )
    .unwrap();
    let gap = *laps[11].lap_time - *dry[11].lap_time;
    assert!((gap - 2.5).abs() < 1e-9);
}

#[test]
fn test_overheating_and_wear_tags() {
    let hot = engine::simulate_stint(
        &conditions(45.0, 0.0),
        "medium",
        Kilograms::new(50.0),
        Seconds::new(73.5),
        18,
        &mut FixedRng(0),
    )
    .unwrap();
    assert_eq!(hot[14].conditions, LapCondition::Stable);
    assert_eq!(hot[15].conditions, LapCondition::TrackOverheating);

    // Softs at lap 21: 0.08 * 21 * 1.9 = 3.19s of wear
    let worn = engine::simulate_stint(
        &conditions(32.0, 0.0),
        "soft",
        Kilograms::new(50.0),
        Seconds::new(73.5),
        21,
        &mut FixedRng(0),
    )
    .unwrap();
    assert_eq!(worn[19].conditions, LapCondition::Stable);
    assert_eq!(worn[20].conditions, LapCondition::HighTireWear);
}

#[test]
fn test_same_seed_same_stint() {
    let run = |seed| {
        StrategyEngine::standard()
            .simulate_stint(
                &conditions(35.0, 70.0),
                "medium",
                Kilograms::new(60.0),
                Seconds::new(73.5),
                35,
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn test_summary_matches_trace() {
    let laps = engine::simulate_stint(
        &conditions(32.0, 10.0),
        "medium",
        Kilograms::new(50.0),
        Seconds::new(73.5),
        20,
        &mut FixedRng(u64::MAX),
    )
    .unwrap();
    let summary = summarize_stint(&laps).unwrap();

    assert_eq!(summary.laps, 20);
    assert_eq!(summary.count(LapCondition::WarmingUp), 4);
    assert_eq!(summary.count(LapCondition::Stable), 16);
    assert_eq!(summary.final_fuel, laps[19].fuel);
    assert_eq!(summary.best_lap, laps[summary.best_lap_number as usize - 1].lap_time);
}
