//! Conditions translator
//!
//! Maps raw weather-station observations onto the normalized track
//! conditions the strategy engine consumes.
//!
//! # Example
//! ```
//! use pitwall_core::conditions::{translate_conditions, CompassPoint, WeatherObservation};
//!
//! let obs = WeatherObservation::new(22.3, 60.0, 2.5, 200.0, 10_000.0, 1013.0, 25.0);
//! let track = translate_conditions(&obs);
//!
//! assert_eq!(track.temperature, 22.0);
//! assert_eq!(track.wind_speed, 9.0);
//! assert_eq!(track.wind_direction, CompassPoint::Ssw);
//! assert_eq!(track.track_temp, 31.0);
//! ```

mod observation;
mod race_conditions;
mod translate;

pub use observation::WeatherObservation;
pub use race_conditions::{classify_race_conditions, RaceConditions, SurfaceCondition};
pub use translate::{
    compass_point, conditions_or_fallback, translate_conditions, wind_speed_readout, CompassPoint,
    TrackConditions, WindReadout,
};
