use super::observation::WeatherObservation;
use crate::core_types::units::round_half_up;
use crate::engine::RiskLevel;
use serde::{Deserialize, Serialize};

/// Surface state category for a raw observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceCondition {
    Dry,
    Intermediate,
    Wet,
    Extreme,
}

/// Race-control style summary of an observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceConditions {
    pub condition: SurfaceCondition,
    pub description: &'static str,
    pub risk_level: RiskLevel,
}

impl RaceConditions {
    fn new(condition: SurfaceCondition, description: &'static str, risk_level: RiskLevel) -> Self {
        RaceConditions {
            condition,
            description,
            risk_level,
        }
    }
}

/// Classify an observation; first matching rule wins
///
/// Precipitation dominates: any reported rain decides the category by
/// amount. Without rain, strong wind (> 50 km/h) and then poor visibility
/// (< 5 km) raise the risk on a dry surface.
pub fn classify_race_conditions(observation: &WeatherObservation) -> RaceConditions {
    if let Some(rain) = observation.precipitation() {
        return if *rain > 10.0 {
            RaceConditions::new(
                SurfaceCondition::Extreme,
                "Heavy rain - race may be delayed or stopped",
                RiskLevel::High,
            )
        } else if *rain > 2.0 {
            RaceConditions::new(
                SurfaceCondition::Wet,
                "Wet conditions - full wet tires required",
                RiskLevel::High,
            )
        } else {
            RaceConditions::new(
                SurfaceCondition::Intermediate,
                "Light rain - intermediate tires recommended",
                RiskLevel::Medium,
            )
        };
    }

    let wind_kmh = round_half_up(*observation.wind_speed.to_kmh());
    if wind_kmh > 50.0 {
        return RaceConditions::new(
            SurfaceCondition::Dry,
            "Strong winds - handling may be affected",
            RiskLevel::High,
        );
    }

    if *observation.visibility.to_kilometers() < 5.0 {
        return RaceConditions::new(
            SurfaceCondition::Dry,
            "Reduced visibility - caution advised",
            RiskLevel::Medium,
        );
    }

    RaceConditions::new(SurfaceCondition::Dry, "Good racing conditions", RiskLevel::Low)
}
