use thiserror::Error;

use crate::core::{filters::matches_temperature_bounds, scoring::calculate_match_score};
use crate::models::{CountryProfile, ScoredCountry, ScoringWeights, UserProfile};

/// Errors raised before scoring begins
#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("negative weight for factor '{factor}': {value}")]
    NegativeWeight { factor: &'static str, value: f64 },
}

/// Result of one ranking run
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<ScoredCountry>,
    pub total_candidates: usize,
}

/// Ranking pipeline over the country catalog
///
/// # Pipeline stages
/// 1. Weight validation (fail fast on malformed weight maps)
/// 2. Monthly-temperature hard filter
/// 3. Composite scoring per country
/// 4. Stable descending sort and truncation
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Configured fallback weights for requests that supply none
    pub fn default_weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Rank the catalog for a user profile.
    ///
    /// Countries failing the temperature hard filter are excluded before
    /// scoring; the rest are scored and sorted descending by match score.
    /// The sort is stable, so equal-score countries keep their catalog
    /// order. An empty catalog yields an empty result.
    pub fn rank(
        &self,
        user: &UserProfile,
        catalog: Vec<CountryProfile>,
        limit: usize,
    ) -> Result<RankResult, RankingError> {
        validate_weights(&user.weights)?;

        let total_candidates = catalog.len();

        let mut matches: Vec<ScoredCountry> = catalog
            .into_iter()
            .filter(|country| {
                matches_temperature_bounds(country, user.temperature_bounds.as_ref())
            })
            .map(|country| {
                let (score, breakdown) = calculate_match_score(user, &country);
                ScoredCountry {
                    country: country.name,
                    match_score: score,
                    breakdown,
                    description: country.description,
                }
            })
            .collect();

        // Stable sort: equal scores keep catalog iteration order
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        matches.truncate(limit);

        Ok(RankResult {
            matches,
            total_candidates,
        })
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Reject weight maps containing a negative factor weight
pub fn validate_weights(weights: &ScoringWeights) -> Result<(), RankingError> {
    for (factor, value) in weights.factors() {
        if value < 0.0 {
            return Err(RankingError::NegativeWeight { factor, value });
        }
    }
    Ok(())
}
