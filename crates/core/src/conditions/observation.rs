use crate::core_types::units::{
    Celsius, Degrees, Hectopascals, Meters, MetersPerSecond, Millimeters, Percent,
};
use serde::{Deserialize, Serialize};

/// One raw reading from a weather station, in the feed's own units
///
/// This is the input contract with the weather-fetch layer. The fetch layer
/// is responsible for validating the payload before handing it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Air temperature
    pub temperature: Celsius,
    /// Relative humidity
    pub humidity: Percent,
    /// Mean wind speed
    pub wind_speed: MetersPerSecond,
    /// Direction the wind blows from
    pub wind_bearing: Degrees,
    pub visibility: Meters,
    pub pressure: Hectopascals,
    pub cloud_cover: Percent,
    /// Precipitation over the last hour, if reported
    #[serde(default)]
    pub rain_last_hour: Option<Millimeters>,
    /// Precipitation over the last three hours, if reported
    #[serde(default)]
    pub rain_last_3h: Option<Millimeters>,
}

impl WeatherObservation {
    /// Observation with no precipitation reported
    pub fn new(
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
        wind_bearing: f64,
        visibility: f64,
        pressure: f64,
        cloud_cover: f64,
    ) -> Self {
        WeatherObservation {
            temperature: Celsius::new(temperature),
            humidity: Percent::new(humidity),
            wind_speed: MetersPerSecond::new(wind_speed),
            wind_bearing: Degrees::new(wind_bearing),
            visibility: Meters::new(visibility),
            pressure: Hectopascals::new(pressure),
            cloud_cover: Percent::new(cloud_cover),
            rain_last_hour: None,
            rain_last_3h: None,
        }
    }

    /// Attach a one-hour precipitation reading
    pub fn with_rain_last_hour(mut self, rain: f64) -> Self {
        self.rain_last_hour = Some(Millimeters::new(rain));
        self
    }

    /// Attach a three-hour precipitation reading
    pub fn with_rain_last_3h(mut self, rain: f64) -> Self {
        self.rain_last_3h = Some(Millimeters::new(rain));
        self
    }

    /// Reported precipitation, preferring the one-hour window
    ///
    /// A zero reading counts as no precipitation.
    pub fn precipitation(&self) -> Option<Millimeters> {
        [self.rain_last_hour, self.rain_last_3h]
            .into_iter()
            .flatten()
            .find(|mm| **mm > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precipitation_prefers_last_hour() {
        let obs = WeatherObservation::new(18.0, 80.0, 3.0, 200.0, 8000.0, 1008.0, 90.0)
            .with_rain_last_hour(1.2)
            .with_rain_last_3h(4.0);
        assert_eq!(obs.precipitation(), Some(Millimeters::new(1.2)));
    }

    #[test]
    fn test_zero_reading_is_not_precipitation() {
        let obs = WeatherObservation::new(18.0, 80.0, 3.0, 200.0, 8000.0, 1008.0, 90.0)
            .with_rain_last_hour(0.0)
            .with_rain_last_3h(3.5);
        assert_eq!(obs.precipitation(), Some(Millimeters::new(3.5)));

        let dry = WeatherObservation::new(18.0, 80.0, 3.0, 200.0, 8000.0, 1008.0, 90.0);
        assert_eq!(dry.precipitation(), None);
    }
}
