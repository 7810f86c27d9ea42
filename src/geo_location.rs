// Module containing response data structures for the IP geolocation lookup
mod response;

use crate::error::AppError;
use tracing::{debug, error, info};

/// Where the angler is, as far as their public IP tells us.
/// Any part may be missing; downstream code substitutes the sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
}

/// Looks up the caller's location from their public IP address using the ip-api.com service.
///
/// # Arguments
/// * `client` - Shared HTTP client
/// * `endpoint` - JSON endpoint of the geolocation service (e.g., "http://ip-api.com/json/")
///
/// # Returns
/// * `Location` with whatever latitude, longitude and city the service reported
/// * An all-`None` `Location` if the request, status or body is bad; the error is logged, not returned
pub async fn fetch_location(client: &reqwest::Client, endpoint: &str) -> Location {
    // Single attempt, no retry
    match get_location(client, endpoint).await {
        Ok(location) => location,
        Err(e) => {
            error!(endpoint, "Failed to fetch location data: {}", e);
            Location::default()
        }
    }
}

async fn get_location(client: &reqwest::Client, endpoint: &str) -> Result<Location, AppError> {
    info!("Fetching location data from: {}", endpoint);

    // The service locates the caller by the request's source address
    let response = client.get(endpoint).send().await?;

    if response.status().is_success() {
        // Parse successful response into LocationResponse struct
        let body: response::LocationResponse = response.json().await?;
        debug!("Location data fetched successfully: {:?}", body);

        if body.status.as_deref() == Some("fail") {
            return Err(AppError::ApiRequestFailed(format!(
                "Geolocation lookup refused: {}",
                body.message.as_deref().unwrap_or("no reason given")
            )));
        }

        Ok(Location {
            latitude: body.lat,
            longitude: body.lon,
            city: body
                .city
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    } else {
        // Log and return error for unsuccessful responses
        error!("Failed to fetch location data: {}", response.status());
        Err(AppError::ApiRequestFailed(format!(
            "Failed to fetch location data: {}",
            response.status()
        )))
    }
}
