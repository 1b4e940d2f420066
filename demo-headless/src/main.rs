use clap::Parser;
use pitwall_core::conditions::{
    classify_race_conditions, conditions_or_fallback, wind_speed_readout, WeatherObservation,
};
use pitwall_core::engine::{get_drs_effectiveness, get_race_strategy, summarize_stint, track_insights};
use pitwall_core::{CircuitProfile, EngineError, Kilograms, Seconds, StrategyEngine, TireTable};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Weather-aware lap-time and strategy report
#[derive(Parser, Debug)]
#[command(name = "pitwall-demo")]
#[command(about = "Lap-time and tire strategy report from a weather observation", long_about = None)]
struct Args {
    /// Air temperature in °C
    #[arg(short, long, default_value_t = 22.0, allow_negative_numbers = true)]
    temperature: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 65.0)]
    humidity: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 2.5)]
    wind_speed: f64,

    /// Direction the wind blows from, degrees (0=North, 90=East)
    #[arg(long, default_value_t = 45.0)]
    wind_bearing: f64,

    /// Visibility in metres
    #[arg(long, default_value_t = 10_000.0)]
    visibility: f64,

    /// Sea-level pressure in hPa
    #[arg(long, default_value_t = 1013.0)]
    pressure: f64,

    /// Cloud cover in %
    #[arg(long, default_value_t = 20.0)]
    cloud_cover: f64,

    /// Precipitation over the last hour in mm
    #[arg(long)]
    precipitation: Option<f64>,

    /// Ignore the observation and use fallback track conditions
    #[arg(long)]
    fallback: bool,

    /// Circuit preset (monaco, montreal)
    #[arg(short, long, default_value = "monaco")]
    circuit: String,

    /// Tire compound (soft, medium, hard, intermediate, wet)
    #[arg(long, default_value = "medium")]
    tire: String,

    /// Starting fuel load in kg
    #[arg(short, long, default_value_t = 50.0)]
    fuel: f64,

    /// Reference lap time in seconds (defaults to the circuit's base time)
    #[arg(long)]
    base_time: Option<f64>,

    /// Stint length in laps
    #[arg(short, long, default_value_t = 20)]
    laps: u32,

    /// Seed for the rain-shower draw (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Also run the stint on every compound and rank them
    #[arg(long)]
    compare: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), EngineError> {
    println!("=== Pitwall Strategy Report ===\n");

    let circuit = match CircuitProfile::preset(&args.circuit) {
        Some(circuit) => circuit,
        None => {
            println!("Unknown circuit '{}', using Monaco", args.circuit);
            CircuitProfile::monaco()
        }
    };
    println!("Circuit: {} ({})", circuit.name, circuit.country);

    let mut observation = WeatherObservation::new(
        args.temperature,
        args.humidity,
        args.wind_speed,
        args.wind_bearing,
        args.visibility,
        args.pressure,
        args.cloud_cover,
    );
    if let Some(mm) = args.precipitation {
        observation = observation.with_rain_last_hour(mm);
    }

    let fetched = if args.fallback {
        Err("weather feed disabled on the command line")
    } else {
        Ok(observation.clone())
    };
    let conditions = conditions_or_fallback(fetched);

    // 1. Conditions
    let wind = wind_speed_readout(observation.wind_speed);
    println!("\n--- Track Conditions ---");
    println!(
        "Air: {}  Track: {}  Humidity: {}",
        conditions.temperature, conditions.track_temp, conditions.humidity
    );
    println!(
        "Wind: {} {} ({:.0} mph)  Visibility: {}  Pressure: {}",
        conditions.wind_speed, conditions.wind_direction, wind.mph, conditions.visibility,
        conditions.air_pressure
    );
    println!("Rain probability: {}", conditions.rain_probability);

    let race = classify_race_conditions(&observation);
    println!(
        "Race control: {:?} - {} (risk: {})",
        race.condition, race.description, race.risk_level
    );

    // 2. Single-lap estimate
    let tires = TireTable::standard();
    let engine = StrategyEngine::new(&tires).with_circuit(&circuit);
    let base_time = Seconds::new(args.base_time.unwrap_or(*circuit.base_lap_time));
    let fuel = Kilograms::new(args.fuel);

    let factors = engine.compute_lap_time_factors(&conditions, &args.tire, fuel, base_time)?;
    println!("\n--- Lap Time Breakdown ({}) ---", args.tire);
    println!("Base:        {}", factors.base_time);
    println!("Temperature: +{}", factors.temperature_impact);
    println!("Wind:        +{}", factors.wind_impact);
    println!("Tire:        {}", factors.tire_impact);
    println!("Fuel:        +{}", factors.fuel_impact);
    println!("Rain:        +{}", factors.rain_impact);
    println!("Estimate:    {}", factors.estimated_lap_time.format_lap_time());

    // 3. Advice
    let strategy = get_race_strategy(&conditions);
    let stops: Vec<String> = strategy.tires.iter().map(ToString::to_string).collect();
    println!("\n--- Strategy ---");
    println!("{} [{}] (risk: {})", strategy.name, stops.join(" -> "), strategy.risk_level);
    println!("  {}", strategy.rationale);

    let drs = get_drs_effectiveness(&conditions);
    println!("DRS: {}% {}", drs.percentage, drs.label);

    for insight in track_insights(&conditions) {
        println!("  ! {}", insight);
    }

    // 4. Stint
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Stint seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let laps = engine.simulate_stint(&conditions, &args.tire, fuel, base_time, args.laps, &mut rng)?;

    println!("\n--- Stint Simulation ({} laps, seed {}) ---", args.laps, seed);
    println!("Lap | Lap Time  | Delta   | Wear    | Fuel    | Conditions");
    println!("----|-----------|---------|---------|---------|-------------------");
    for lap in &laps {
        println!(
            "{:3} | {:>9} | {:>+7.3} | {:>7.3} | {:>7.1} | {}",
            lap.lap_number,
            lap.lap_time.format_lap_time(),
            *lap.delta,
            *lap.tire_degradation,
            *lap.fuel,
            lap.conditions
        );
    }

    if let Some(summary) = summarize_stint(&laps) {
        println!(
            "\nBest: {} (lap {})  Average: {}  Total: {:.3}s  Final fuel: {}",
            summary.best_lap.format_lap_time(),
            summary.best_lap_number,
            summary.average_lap.format_lap_time(),
            *summary.total_time,
            summary.final_fuel
        );
    }

    // 5. Compound comparison
    if args.compare {
        let ranking = engine.compare_compounds(&conditions, fuel, base_time, args.laps, seed)?;
        println!("\n--- Compound Comparison ---");
        for (position, entry) in ranking.iter().enumerate() {
            println!(
                "{}. {:<12} total {:.3}s  best {}  avg {}",
                position + 1,
                tires.get(entry.tire).label,
                *entry.summary.total_time,
                entry.summary.best_lap.format_lap_time(),
                entry.summary.average_lap.format_lap_time()
            );
        }
    }

    Ok(())
}
