use tracing::{debug, error, info};

use crate::{error::AppError, record::Cell};

mod response;

use response::CurrentWeather;

const CURRENT_FIELDS: &str =
    "temperature_2m,cloud_cover,pressure_msl,wind_direction_10m,wind_speed_10m";

/// The five weather readings stored with a trip.
/// Either every field holds a fetched number or every field holds the sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: Cell,
    pub cloud_cover: Cell,
    pub pressure: Cell,
    pub wind_direction: Cell,
    pub wind_speed: Cell,
}

impl WeatherReading {
    pub fn unavailable() -> Self {
        WeatherReading {
            temperature: Cell::sentinel(),
            cloud_cover: Cell::sentinel(),
            pressure: Cell::sentinel(),
            wind_direction: Cell::sentinel(),
            wind_speed: Cell::sentinel(),
        }
    }
}

impl From<CurrentWeather> for WeatherReading {
    fn from(current: CurrentWeather) -> Self {
        WeatherReading {
            temperature: Cell::Number(current.temperature_2m),
            cloud_cover: Cell::Number(current.cloud_cover),
            pressure: Cell::Number(current.pressure_msl),
            wind_direction: Cell::Number(current.wind_direction_10m),
            wind_speed: Cell::Number(current.wind_speed_10m),
        }
    }
}

/// Fetches current conditions at the given coordinates from the Open-Meteo forecast API.
///
/// # Arguments
/// * `client` - Shared HTTP client
/// * `endpoint` - Forecast endpoint (e.g., "https://api.open-meteo.com/v1/forecast")
/// * `latitude`, `longitude` - Coordinates from the location lookup; `None` if it failed
///
/// # Returns
/// * `WeatherReading` with all five readings populated from the response
/// * `WeatherReading::unavailable()` (every field the sentinel) on missing coordinates,
///   transport errors, bad status codes or incomplete bodies; the error is logged, not returned
pub async fn fetch_weather(
    client: &reqwest::Client,
    endpoint: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> WeatherReading {
    match get_weather(client, endpoint, latitude, longitude).await {
        Ok(current) => current.into(),
        Err(e) => {
            error!(endpoint, "Failed to fetch weather data: {}", e);
            WeatherReading::unavailable()
        }
    }
}

async fn get_weather(
    client: &reqwest::Client,
    endpoint: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<CurrentWeather, AppError> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(AppError::MissingCoordinates);
    };

    info!("Fetching weather data for: {}, {}", latitude, longitude);

    // Construct the API URL with query parameters
    let url = format!(
        "{}?latitude={}&longitude={}&current={}",
        endpoint, latitude, longitude, CURRENT_FIELDS
    );
    let response = client.get(&url).send().await?;

    if response.status().is_success() {
        // Every `current` field is required, so a partial body fails here
        let weather_response: response::WeatherResponse = response.json().await?;
        debug!("Weather data fetched successfully: {:?}", weather_response);
        Ok(weather_response.current)
    } else {
        error!("Failed to fetch weather data: {}", response.status());
        Err(AppError::ApiRequestFailed(format!(
            "Failed to fetch weather data: {}",
            response.status()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{REFUSED_ENDPOINT, client, serve_once};

    const FULL_BODY: &str = r#"{
        "latitude": 59.9,
        "longitude": 10.75,
        "current_units": {"temperature_2m": "°C"},
        "current": {
            "time": "2026-10-16T08:00",
            "interval": 900,
            "temperature_2m": 11.2,
            "cloud_cover": 75,
            "pressure_msl": 1013.4,
            "wind_direction_10m": 240,
            "wind_speed_10m": 14.8
        }
    }"#;

    #[tokio::test]
    async fn populates_all_five_fields() {
        let (url, server) = serve_once("200 OK", FULL_BODY).await;

        let reading = fetch_weather(&client(), &url, Some(59.9), Some(10.75)).await;
        assert_eq!(
            reading,
            WeatherReading {
                temperature: Cell::Number(11.2),
                cloud_cover: Cell::Number(75.0),
                pressure: Cell::Number(1013.4),
                wind_direction: Cell::Number(240.0),
                wind_speed: Cell::Number(14.8),
            }
        );

        let requests = server.await.unwrap();
        let request_line = requests[0].lines().next().unwrap();
        assert!(request_line.contains("latitude=59.9"));
        assert!(request_line.contains("longitude=10.75"));
        assert!(request_line.contains(CURRENT_FIELDS));
    }

    #[tokio::test]
    async fn transport_failure_sentinels_every_field() {
        let reading = fetch_weather(&client(), REFUSED_ENDPOINT, Some(1.0), Some(2.0)).await;
        assert_eq!(reading, WeatherReading::unavailable());
    }

    #[tokio::test]
    async fn partial_body_is_not_mixed_in() {
        let (url, _server) = serve_once(
            "200 OK",
            r#"{"current":{"temperature_2m":11.2,"cloud_cover":75}}"#,
        )
        .await;

        let reading = fetch_weather(&client(), &url, Some(1.0), Some(2.0)).await;
        assert_eq!(reading, WeatherReading::unavailable());
    }

    #[tokio::test]
    async fn http_error_sentinels_every_field() {
        let (url, _server) = serve_once("400 Bad Request", r#"{"error":true}"#).await;

        let reading = fetch_weather(&client(), &url, Some(1.0), Some(2.0)).await;
        assert_eq!(reading, WeatherReading::unavailable());
    }

    #[tokio::test]
    async fn missing_coordinates_sentinel_every_field() {
        let reading = fetch_weather(&client(), REFUSED_ENDPOINT, None, Some(2.0)).await;
        assert_eq!(reading, WeatherReading::unavailable());

        let reading = fetch_weather(&client(), REFUSED_ENDPOINT, None, None).await;
        assert_eq!(reading, WeatherReading::unavailable());
    }
}
