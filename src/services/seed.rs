use crate::models::CountryProfile;
use crate::services::postgres::{PostgresClient, PostgresError};

/// Embedded seed records for an empty catalog
const SEED_COUNTRIES: &str = include_str!("../../data/countries.json");

/// Parse the embedded seed records
pub fn seed_records() -> Result<Vec<CountryProfile>, serde_json::Error> {
    serde_json::from_str(SEED_COUNTRIES)
}

/// Upsert the seed records into the catalog.
///
/// Safe to call repeatedly; the upsert keys on the unique country name.
pub async fn seed_countries(postgres: &PostgresClient) -> Result<usize, PostgresError> {
    let records = seed_records()?;

    for country in &records {
        postgres.upsert_country(country).await?;
    }

    tracing::info!("Seeded {} countries into catalog", records.len());

    Ok(records.len())
}
