use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::CountryProfile;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid country record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL-backed country catalog repository
///
/// Owns all persistence for country records; the ranking pipeline only
/// ever sees the `Vec<CountryProfile>` snapshot this client produces.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch the full country catalog.
    ///
    /// Ordered by name so a ranking call always iterates the catalog in
    /// the same order, which the stable tie-break depends on.
    pub async fn fetch_all_countries(&self) -> Result<Vec<CountryProfile>, PostgresError> {
        let query = r#"
            SELECT name, languages, sector_scores, tolerance, cost_index,
                   climate, monthly_avg_temps, description
            FROM countries
            ORDER BY name
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let countries: Result<Vec<CountryProfile>, PostgresError> =
            rows.iter().map(row_to_country).collect();

        let countries = countries?;
        tracing::debug!("Fetched {} countries from catalog", countries.len());

        Ok(countries)
    }

    /// Fetch a single country by name
    pub async fn get_country(&self, name: &str) -> Result<CountryProfile, PostgresError> {
        let query = r#"
            SELECT name, languages, sector_scores, tolerance, cost_index,
                   climate, monthly_avg_temps, description
            FROM countries
            WHERE name = $1
        "#;

        let row = sqlx::query(query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => row_to_country(&row),
            None => Err(PostgresError::NotFound(name.to_string())),
        }
    }

    /// Insert or update a country record.
    ///
    /// Uses INSERT ... ON CONFLICT so re-seeding and admin upserts are
    /// idempotent on the unique country name.
    pub async fn upsert_country(&self, country: &CountryProfile) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO countries
                (name, languages, sector_scores, tolerance, cost_index,
                 climate, monthly_avg_temps, description, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            ON CONFLICT (name)
            DO UPDATE SET
                languages = EXCLUDED.languages,
                sector_scores = EXCLUDED.sector_scores,
                tolerance = EXCLUDED.tolerance,
                cost_index = EXCLUDED.cost_index,
                climate = EXCLUDED.climate,
                monthly_avg_temps = EXCLUDED.monthly_avg_temps,
                description = EXCLUDED.description,
                updated_at = EXCLUDED.updated_at
        "#;

        sqlx::query(query)
            .bind(&country.name)
            .bind(serde_json::to_value(&country.languages)?)
            .bind(serde_json::to_value(&country.sector_scores)?)
            .bind(country.tolerance)
            .bind(country.cost_index)
            .bind(country.climate)
            .bind(serde_json::to_value(&country.monthly_avg_temps)?)
            .bind(&country.description)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted country record: {}", country.name);

        Ok(())
    }

    /// Count catalog entries (used to decide whether to seed)
    pub async fn count_countries(&self) -> Result<i64, PostgresError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM countries")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn row_to_country(row: &PgRow) -> Result<CountryProfile, PostgresError> {
    Ok(CountryProfile {
        name: row.get("name"),
        languages: serde_json::from_value(row.get::<serde_json::Value, _>("languages"))?,
        sector_scores: serde_json::from_value(row.get::<serde_json::Value, _>("sector_scores"))?,
        tolerance: row.get("tolerance"),
        cost_index: row.get("cost_index"),
        climate: row.get("climate"),
        monthly_avg_temps: serde_json::from_value(
            row.get::<serde_json::Value, _>("monthly_avg_temps"),
        )?,
        description: row.get("description"),
    })
}
