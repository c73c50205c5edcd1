// Core algorithm exports
pub mod filters;
pub mod ranker;
pub mod scoring;
pub mod similarity;

pub use filters::{matches_temperature_bounds, month_within_bounds};
pub use ranker::{RankResult, Ranker, RankingError};
pub use scoring::{calculate_language_score, calculate_match_score, calculate_skill_score};
pub use similarity::{score_skill, token_set_ratio};
