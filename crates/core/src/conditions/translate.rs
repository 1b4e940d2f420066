use super::observation::WeatherObservation;
use crate::core_types::units::{
    round_half_up, Celsius, Degrees, Hectopascals, KilometersPerHour, Kilometers, MetersPerSecond,
    Percent,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track surface runs about 40% hotter than the air above it
const TRACK_TEMP_BOOST: f64 = 0.4;

/// Rain probability weights for humidity and cloud cover
const RAIN_HUMIDITY_WEIGHT: f64 = 0.3;
const RAIN_CLOUD_WEIGHT: f64 = 0.2;

/// Width of one compass sector in degrees
const COMPASS_SECTOR: f64 = 22.5;

/// The 16 compass points, clockwise from North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl CompassPoint {
    /// Compass points in clockwise order starting at North
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::Nne,
        CompassPoint::Ne,
        CompassPoint::Ene,
        CompassPoint::E,
        CompassPoint::Ese,
        CompassPoint::Se,
        CompassPoint::Sse,
        CompassPoint::S,
        CompassPoint::Ssw,
        CompassPoint::Sw,
        CompassPoint::Wsw,
        CompassPoint::W,
        CompassPoint::Wnw,
        CompassPoint::Nw,
        CompassPoint::Nnw,
    ];

    /// Nearest compass point to a bearing
    ///
    /// `index = round(degrees / 22.5) mod 16`, so 349° and 360° both map to N.
    pub fn from_bearing(bearing: Degrees) -> Self {
        let index = round_half_up(*bearing / COMPASS_SECTOR) as i64;
        Self::ALL[index.rem_euclid(16) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::Nne => "NNE",
            CompassPoint::Ne => "NE",
            CompassPoint::Ene => "ENE",
            CompassPoint::E => "E",
            CompassPoint::Ese => "ESE",
            CompassPoint::Se => "SE",
            CompassPoint::Sse => "SSE",
            CompassPoint::S => "S",
            CompassPoint::Ssw => "SSW",
            CompassPoint::Sw => "SW",
            CompassPoint::Wsw => "WSW",
            CompassPoint::W => "W",
            CompassPoint::Wnw => "WNW",
            CompassPoint::Nw => "NW",
            CompassPoint::Nnw => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compass label ("N", "NNE", ...) for a wind bearing
pub fn compass_point(bearing: Degrees) -> &'static str {
    CompassPoint::from_bearing(bearing).label()
}

/// Normalized track conditions derived from one weather observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConditions {
    /// Air temperature, rounded to whole degrees
    pub temperature: Celsius,
    pub humidity: Percent,
    /// Wind speed, rounded to whole km/h
    pub wind_speed: KilometersPerHour,
    pub wind_direction: CompassPoint,
    /// Visibility, not rounded
    pub visibility: Kilometers,
    /// Estimated surface temperature (air + 40%), not measured
    pub track_temp: Celsius,
    pub air_pressure: Hectopascals,
    /// Chance of rain, 0-100
    pub rain_probability: Percent,
}

impl TrackConditions {
    /// Conditions substituted when the weather fetch fails
    pub fn fallback() -> Self {
        TrackConditions {
            temperature: Celsius::new(25.0),
            humidity: Percent::new(60.0),
            wind_speed: KilometersPerHour::new(15.0),
            wind_direction: CompassPoint::Sw,
            visibility: Kilometers::new(10.0),
            track_temp: Celsius::new(35.0),
            air_pressure: Hectopascals::STANDARD,
            rain_probability: Percent::new(20.0),
        }
    }
}

impl From<&WeatherObservation> for TrackConditions {
    fn from(observation: &WeatherObservation) -> Self {
        translate_conditions(observation)
    }
}

/// Translate a raw observation into track conditions
///
/// Pure and total: every observation maps to a conditions record.
pub fn translate_conditions(observation: &WeatherObservation) -> TrackConditions {
    let air = *observation.temperature;
    let rain_probability = round_half_up(
        *observation.humidity * RAIN_HUMIDITY_WEIGHT + *observation.cloud_cover * RAIN_CLOUD_WEIGHT,
    )
    .min(100.0);

    TrackConditions {
        temperature: Celsius::new(round_half_up(air)),
        humidity: observation.humidity,
        wind_speed: KilometersPerHour::new(round_half_up(*observation.wind_speed.to_kmh())),
        wind_direction: CompassPoint::from_bearing(observation.wind_bearing),
        visibility: observation.visibility.to_kilometers(),
        track_temp: Celsius::new(round_half_up(air + air * TRACK_TEMP_BOOST)),
        air_pressure: observation.pressure,
        rain_probability: Percent::new(rain_probability),
    }
}

/// Translate a fetch result, substituting [`TrackConditions::fallback`] on error
pub fn conditions_or_fallback<E: fmt::Display>(
    fetched: Result<WeatherObservation, E>,
) -> TrackConditions {
    match fetched {
        Ok(observation) => translate_conditions(&observation),
        Err(e) => {
            tracing::warn!("Weather fetch failed, using fallback track conditions: {e}");
            TrackConditions::fallback()
        }
    }
}

/// Wind speed as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindReadout {
    pub kmh: f64,
    pub mph: f64,
}

/// Rounded km/h and mph readout of a feed wind speed
pub fn wind_speed_readout(speed: MetersPerSecond) -> WindReadout {
    WindReadout {
        kmh: round_half_up(*speed.to_kmh()),
        mph: round_half_up(speed.to_mph()),
    }
}
