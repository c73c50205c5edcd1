// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CountryProfile, LanguageEntry, LanguageSkill, MonthlyTemperature, ScoreBreakdown, ScoredCountry, ScoringWeights, TemperatureBounds, UserProfile};
pub use requests::{LanguageInput, RecommendRequest, TemperatureBoundsInput, WeightsInput};
pub use responses::{CountriesResponse, ErrorResponse, HealthResponse, RecommendResponse, UpsertCountryResponse};
