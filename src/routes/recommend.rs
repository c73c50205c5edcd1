use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{Ranker, RankingError};
use crate::models::{
    CountriesResponse, CountryProfile, ErrorResponse, HealthResponse, LanguageSkill,
    RecommendRequest, RecommendResponse, UpsertCountryResponse, UserProfile,
};
use crate::services::{CacheKey, CacheManager, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub ranker: Ranker,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend))
        .route("/countries", web::get().to(list_countries))
        .route("/countries", web::post().to(upsert_country))
        .route("/countries/{name}", web::get().to(get_country));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend relocation destinations
///
/// POST /api/v1/recommend
///
/// Request body:
/// ```json
/// {
///   "skills": ["python", "data"],
///   "languages": [{"name": "english", "proficiency": 3}],
///   "weights": {"skills": 0.3, "lang": 0.3, "tolerance": 0.2, "cost": 0.1, "climate": 0.1},
///   "temperatureBounds": {"min": 10.0, "max": 30.0},
///   "limit": 20
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    // Validate request (rejects out-of-range proficiency before scoring)
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Cap limit at 100 to prevent oversized responses
    let limit = req.limit.min(100) as usize;

    let user = build_user_profile(&req, &state.ranker);

    tracing::info!(
        "Ranking destinations: {} skills, {} languages, limit {}",
        user.skills.len(),
        user.languages.len(),
        limit
    );

    let catalog = match load_catalog(&state).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load country catalog: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load country catalog".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = match state.ranker.rank(&user, catalog, limit) {
        Ok(result) => result,
        Err(e @ RankingError::NegativeWeight { .. }) => {
            tracing::info!("Rejected malformed weights: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid weights".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        result.matches.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

/// List the full country catalog
///
/// GET /api/v1/countries
async fn list_countries(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(countries) => {
            let count = countries.len();
            HttpResponse::Ok().json(CountriesResponse { countries, count })
        }
        Err(e) => {
            tracing::error!("Failed to list countries: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list countries".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Fetch a single country record
///
/// GET /api/v1/countries/{name}
async fn get_country(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let name = path.into_inner();

    let cache_key = CacheKey::country(&name);
    if let Ok(country) = state.cache.get::<CountryProfile>(&cache_key).await {
        return HttpResponse::Ok().json(country);
    }

    match state.postgres.get_country(&name).await {
        Ok(country) => {
            if let Err(e) = state.cache.set(&cache_key, &country).await {
                tracing::warn!("Failed to cache country record {}: {}", name, e);
            }
            HttpResponse::Ok().json(country)
        }
        Err(PostgresError::NotFound(name)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Country not found".to_string(),
            message: name,
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch country {}: {}", name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch country".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Insert or update a country record
///
/// POST /api/v1/countries
async fn upsert_country(
    state: web::Data<AppState>,
    req: web::Json<CountryProfile>,
) -> impl Responder {
    if req.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "Country name must not be empty".to_string(),
            status_code: 400,
        });
    }

    let country = req.into_inner();

    match state.postgres.upsert_country(&country).await {
        Ok(()) => {
            // Invalidate cached snapshots so the next ranking call sees the write
            state.cache.delete(&CacheKey::catalog()).await;
            state.cache.delete(&CacheKey::country(&country.name)).await;

            HttpResponse::Ok().json(UpsertCountryResponse {
                success: true,
                country: country.name,
            })
        }
        Err(e) => {
            tracing::error!("Failed to upsert country {}: {}", country.name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to upsert country".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Build the transient per-request user profile from the validated request
fn build_user_profile(req: &RecommendRequest, ranker: &Ranker) -> UserProfile {
    let skills: Vec<String> = req
        .skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let languages: Vec<LanguageSkill> = req
        .languages
        .iter()
        .map(|l| LanguageSkill {
            name: l.name.trim().to_lowercase(),
            proficiency: l.proficiency,
        })
        .collect();

    let weights = req
        .weights
        .clone()
        .map(Into::into)
        .unwrap_or_else(|| ranker.default_weights());

    UserProfile {
        skills,
        languages,
        weights,
        temperature_bounds: req.temperature_bounds.map(Into::into),
    }
}

/// Load a consistent catalog snapshot, preferring the cache
async fn load_catalog(state: &AppState) -> Result<Vec<CountryProfile>, PostgresError> {
    let cache_key = CacheKey::catalog();

    if let Ok(catalog) = state.cache.get::<Vec<CountryProfile>>(&cache_key).await {
        return Ok(catalog);
    }

    let catalog = state.postgres.fetch_all_countries().await?;

    if let Err(e) = state.cache.set(&cache_key, &catalog).await {
        tracing::warn!("Failed to cache catalog snapshot: {}", e);
    }

    Ok(catalog)
}
