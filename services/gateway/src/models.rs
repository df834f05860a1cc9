use serde::Deserialize;

/// Query parameters for the bulk summary endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub level: Option<String>,
    pub period: Option<String>,
}

/// Query parameters shared by the single-area metric and export endpoints.
#[derive(Debug, Deserialize)]
pub struct AreaParams {
    pub level: Option<String>,
    pub area: Option<String>,
    pub period: Option<String>,
    pub flat_type: Option<String>,
}

/// Query parameters for the paginated transaction listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub level: Option<String>,
    pub area: Option<String>,
    pub period: Option<String>,
    pub flat_type: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct WatchlistAddRequest {
    pub area_name: String,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminSetupRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub tier: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}
