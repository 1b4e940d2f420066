//! Circuit profiles: per-track constants the lap-time model is tuned around
//!
//! A profile carries the dry, zero-fuel reference lap time, the air and
//! track temperatures at which the model applies no temperature penalty,
//! and the weather stations placed around the circuit.
//!
//! # Example
//! ```
//! use pitwall_core::CircuitProfile;
//!
//! let montreal = CircuitProfile::gilles_villeneuve();
//! assert_eq!(montreal.weather_stations.len(), 5);
//! assert!(*montreal.base_lap_time > 70.0);
//! ```

use crate::core_types::units::{Celsius, Seconds};
use serde::{Deserialize, Serialize};

/// Geographic position of a point on or near the circuit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }
}

/// Weather monitoring point whose observations feed the translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherStation {
    pub id: String,
    pub name: String,
    pub position: GeoPoint,
}

impl WeatherStation {
    fn new(id: &str, name: &str, lat: f64, lng: f64) -> Self {
        WeatherStation {
            id: id.to_string(),
            name: name.to_string(),
            position: GeoPoint::new(lat, lng),
        }
    }
}

/// Track constants for one circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitProfile {
    /// Circuit name (e.g., "Circuit de Monaco")
    pub name: String,
    pub country: String,
    /// Dry, zero-fuel reference lap on the medium compound
    pub base_lap_time: Seconds,
    /// Air temperature with no temperature penalty
    pub optimal_air_temp: Celsius,
    /// Track surface temperature with no temperature penalty
    pub optimal_track_temp: Celsius,
    pub center: GeoPoint,
    pub weather_stations: Vec<WeatherStation>,
}

impl CircuitProfile {
    /// Air temperature the model is tuned to (°C)
    pub const DEFAULT_OPTIMAL_AIR_TEMP: Celsius = Celsius::new(22.0);

    /// Track temperature the model is tuned to (°C)
    pub const DEFAULT_OPTIMAL_TRACK_TEMP: Celsius = Celsius::new(32.0);

    /// Circuit de Monaco, the lap simulator's default track (~1:13.5)
    pub fn monaco() -> Self {
        CircuitProfile {
            name: "Circuit de Monaco".to_string(),
            country: "Monaco".to_string(),
            base_lap_time: Seconds::new(73.5),
            optimal_air_temp: Self::DEFAULT_OPTIMAL_AIR_TEMP,
            optimal_track_temp: Self::DEFAULT_OPTIMAL_TRACK_TEMP,
            center: GeoPoint::new(43.7347, 7.4206),
            weather_stations: vec![WeatherStation::new(
                "start-finish",
                "Start/Finish Line",
                43.7347,
                7.4206,
            )],
        }
    }

    /// Circuit Gilles Villeneuve, Montreal (~1:13.078)
    pub fn gilles_villeneuve() -> Self {
        CircuitProfile {
            name: "Circuit Gilles Villeneuve".to_string(),
            country: "Canada".to_string(),
            base_lap_time: Seconds::new(73.078),
            optimal_air_temp: Self::DEFAULT_OPTIMAL_AIR_TEMP,
            optimal_track_temp: Self::DEFAULT_OPTIMAL_TRACK_TEMP,
            center: GeoPoint::new(45.5048, -73.5280),
            weather_stations: vec![
                WeatherStation::new("start-finish", "Start/Finish Line", 45.5048, -73.5280),
                WeatherStation::new("turn-1", "Virage Senna (Turn 1)", 45.5080, -73.5300),
                WeatherStation::new("hairpin", "Épingle (Hairpin)", 45.5045, -73.5490),
                WeatherStation::new("wall-champions", "Wall of Champions", 45.4970, -73.5360),
                WeatherStation::new("pits", "Pit Lane", 45.5040, -73.5270),
            ],
        }
    }

    /// Look up a preset by its short name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "monaco" => Some(Self::monaco()),
            "montreal" | "canada" | "gilles-villeneuve" => Some(Self::gilles_villeneuve()),
            _ => None,
        }
    }

    /// Station by id
    pub fn station(&self, id: &str) -> Option<&WeatherStation> {
        self.weather_stations.iter().find(|s| s.id == id)
    }
}

impl Default for CircuitProfile {
    fn default() -> Self {
        CircuitProfile::monaco()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_share_model_optima() {
        for circuit in [CircuitProfile::monaco(), CircuitProfile::gilles_villeneuve()] {
            assert_eq!(circuit.optimal_air_temp, 22.0);
            assert_eq!(circuit.optimal_track_temp, 32.0);
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(CircuitProfile::preset("MONACO"), Some(CircuitProfile::monaco()));
        assert_eq!(
            CircuitProfile::preset("montreal").map(|c| c.base_lap_time),
            Some(Seconds::new(73.078))
        );
        assert!(CircuitProfile::preset("spa").is_none());
    }

    #[test]
    fn test_station_lookup() {
        let circuit = CircuitProfile::gilles_villeneuve();
        let hairpin = circuit.station("hairpin").unwrap();
        assert_eq!(hairpin.position, GeoPoint::new(45.5045, -73.5490));
        assert!(circuit.station("turn-99").is_none());
    }
}
