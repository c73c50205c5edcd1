use serde::{Deserialize, Serialize};
use crate::models::domain::{CountryProfile, ScoredCountry};

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub matches: Vec<ScoredCountry>,
    pub total_candidates: usize,
}

/// Catalog listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesResponse {
    pub countries: Vec<CountryProfile>,
    pub count: usize,
}

/// Upsert country response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertCountryResponse {
    pub success: bool,
    pub country: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
