//! Strategy, DRS and track advice derived from current conditions
//!
//! These are rule tables evaluated top to bottom; the first rule that
//! matches decides the result.

use crate::conditions::TrackConditions;
use crate::core_types::units::round_half_up;
use crate::tires::TireId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk category shared by strategies and race-condition summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended compound sequence with its rationale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceStrategy {
    pub name: &'static str,
    /// Compounds in the order they should be fitted
    pub tires: Vec<TireId>,
    pub rationale: &'static str,
    pub risk_level: RiskLevel,
}

/// Pick a race strategy for the conditions
///
/// Rain dominates: above 50% rain probability the wet strategy is chosen no
/// matter what the other readings say. Then hot and dry air, then wind.
pub fn get_race_strategy(conditions: &TrackConditions) -> RaceStrategy {
    if *conditions.rain_probability > 50.0 {
        RaceStrategy {
            name: "Wet Weather Strategy",
            tires: vec![TireId::Intermediate, TireId::Wet],
            rationale: "High rain probability - prepare for changing conditions",
            risk_level: RiskLevel::High,
        }
    } else if *conditions.temperature > 30.0 && *conditions.humidity < 40.0 {
        RaceStrategy {
            name: "Hot & Dry Strategy",
            tires: vec![TireId::Hard, TireId::Medium],
            rationale: "High degradation expected - extend stint lengths",
            risk_level: RiskLevel::Medium,
        }
    } else if *conditions.wind_speed > 25.0 {
        RaceStrategy {
            name: "Windy Conditions Strategy",
            tires: vec![TireId::Medium, TireId::Hard],
            rationale: "Strong winds - focus on stability over speed",
            risk_level: RiskLevel::Medium,
        }
    } else {
        RaceStrategy {
            name: "Optimal Strategy",
            tires: vec![TireId::Medium, TireId::Soft],
            rationale: "Good conditions for aggressive strategy",
            risk_level: RiskLevel::Low,
        }
    }
}

/// Percentage points of DRS effectiveness lost per km/h of wind
const DRS_WIND_SENSITIVITY: f64 = 1.5;

/// How much of the DRS straight-line gain survives the wind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrsEffectiveness {
    /// Whole percent, 0-100
    pub percentage: u8,
    pub label: &'static str,
}

/// DRS effectiveness for the current wind
///
/// The label is decided on the unrounded value, so 80.4% reads as
/// "Highly Effective" even though it displays as 80.
pub fn get_drs_effectiveness(conditions: &TrackConditions) -> DrsEffectiveness {
    let raw = 100.0 - *conditions.wind_speed * DRS_WIND_SENSITIVITY;
    let percentage = round_half_up(raw).clamp(0.0, 100.0) as u8;

    let label = if raw > 80.0 {
        "Highly Effective"
    } else if raw > 60.0 {
        "Moderately Effective"
    } else {
        "Limited Effectiveness"
    };

    DrsEffectiveness { percentage, label }
}

/// Advisory flag raised by the current conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackInsight {
    HighTrackTemperature,
    StrongWinds,
    RainLikely,
    HighHumidity,
}

impl TrackInsight {
    pub fn message(self) -> &'static str {
        match self {
            TrackInsight::HighTrackTemperature => {
                "High track temps - expect increased tire degradation"
            }
            TrackInsight::StrongWinds => "Strong winds - may affect braking stability",
            TrackInsight::RainLikely => "Rain likely - consider wet weather setup",
            TrackInsight::HighHumidity => "High humidity - affects aerodynamics",
        }
    }
}

impl fmt::Display for TrackInsight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Every insight that applies, in a fixed order
pub fn track_insights(conditions: &TrackConditions) -> Vec<TrackInsight> {
    let mut insights = Vec::new();
    if *conditions.track_temp > 40.0 {
        insights.push(TrackInsight::HighTrackTemperature);
    }
    if *conditions.wind_speed > 25.0 {
        insights.push(TrackInsight::StrongWinds);
    }
    if *conditions.rain_probability > 50.0 {
        insights.push(TrackInsight::RainLikely);
    }
    if *conditions.humidity > 80.0 {
        insights.push(TrackInsight::HighHumidity);
    }
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Celsius, KilometersPerHour, Percent};

    fn with(temp: f64, humidity: f64, wind: f64, rain: f64) -> TrackConditions {
        let mut c = TrackConditions::fallback();
        c.temperature = Celsius::new(temp);
        c.humidity = Percent::new(humidity);
        c.wind_speed = KilometersPerHour::new(wind);
        c.rain_probability = Percent::new(rain);
        c
    }

    #[test]
    fn test_strategy_rule_order() {
        // Rain beats everything else
        let wet = get_race_strategy(&with(35.0, 20.0, 40.0, 60.0));
        assert_eq!(wet.name, "Wet Weather Strategy");
        assert_eq!(wet.tires, vec![TireId::Intermediate, TireId::Wet]);
        assert_eq!(wet.risk_level, RiskLevel::High);

        let hot = get_race_strategy(&with(35.0, 20.0, 40.0, 10.0));
        assert_eq!(hot.name, "Hot & Dry Strategy");
        assert_eq!(hot.tires, vec![TireId::Hard, TireId::Medium]);

        let windy = get_race_strategy(&with(35.0, 50.0, 40.0, 10.0));
        assert_eq!(windy.name, "Windy Conditions Strategy");

        let optimal = get_race_strategy(&with(22.0, 60.0, 10.0, 10.0));
        assert_eq!(optimal.name, "Optimal Strategy");
        assert_eq!(optimal.tires, vec![TireId::Medium, TireId::Soft]);
        assert_eq!(optimal.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_strategy_thresholds_are_strict() {
        assert_eq!(get_race_strategy(&with(22.0, 60.0, 10.0, 50.0)).name, "Optimal Strategy");
        assert_eq!(get_race_strategy(&with(30.0, 30.0, 10.0, 0.0)).name, "Optimal Strategy");
        assert_eq!(get_race_strategy(&with(22.0, 60.0, 25.0, 0.0)).name, "Optimal Strategy");
    }

    #[test]
    fn test_drs_effectiveness() {
        let calm = get_drs_effectiveness(&with(22.0, 60.0, 0.0, 0.0));
        assert_eq!(calm.percentage, 100);
        assert_eq!(calm.label, "Highly Effective");

        // 100 - 20 * 1.5 = 70
        let breezy = get_drs_effectiveness(&with(22.0, 60.0, 20.0, 0.0));
        assert_eq!(breezy.percentage, 70);
        assert_eq!(breezy.label, "Moderately Effective");

        // 100 - 13 * 1.5 = 80.5: rounds to 81
        let gusty = get_drs_effectiveness(&with(22.0, 60.0, 13.0, 0.0));
        assert_eq!(gusty.percentage, 81);
        assert_eq!(gusty.label, "Highly Effective");

        let gale = get_drs_effectiveness(&with(22.0, 60.0, 90.0, 0.0));
        assert_eq!(gale.percentage, 0);
        assert_eq!(gale.label, "Limited Effectiveness");
    }

    #[test]
    fn test_track_insights_order() {
        let mut c = with(30.0, 85.0, 30.0, 70.0);
        c.track_temp = Celsius::new(42.0);
        assert_eq!(
            track_insights(&c),
            vec![
                TrackInsight::HighTrackTemperature,
                TrackInsight::StrongWinds,
                TrackInsight::RainLikely,
                TrackInsight::HighHumidity,
            ]
        );
        assert!(track_insights(&with(22.0, 60.0, 10.0, 10.0)).is_empty());
        assert_eq!(
            TrackInsight::RainLikely.to_string(),
            "Rain likely - consider wet weather setup"
        );
    }
}
