/// Response structure for the Open-Meteo forecast endpoint when queried with
/// `current=temperature_2m,cloud_cover,pressure_msl,wind_direction_10m,wind_speed_10m`.
///
/// All five readings are required: a body missing any of them fails to parse,
/// so a partial reading can never leak into the record.
#[derive(serde::Deserialize, Debug)]
pub struct WeatherResponse {
    /// Current weather conditions
    pub current: CurrentWeather,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Air temperature at 2 m, °C
    pub temperature_2m: f64,
    /// Total cloud cover, %
    pub cloud_cover: f64,
    /// Mean sea-level pressure, hPa
    pub pressure_msl: f64,
    /// Wind direction at 10 m, degrees
    pub wind_direction_10m: f64,
    /// Wind speed at 10 m, km/h
    pub wind_speed_10m: f64,
}
