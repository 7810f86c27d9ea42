/// Response structure for the ip-api.com JSON endpoint.
/// Every field is optional; a failed lookup comes back as
/// `{"status": "fail", "message": "..."}` with no coordinates.
#[derive(serde::Deserialize, Debug, Default)]
pub struct LocationResponse {
    /// "success" or "fail"
    pub status: Option<String>,
    /// Reason given when `status` is "fail"
    pub message: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
}
