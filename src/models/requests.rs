use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{ScoringWeights, TemperatureBounds};

/// Request to rank relocation destinations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(nested)]
    #[serde(default)]
    pub languages: Vec<LanguageInput>,
    #[serde(default)]
    pub weights: Option<WeightsInput>,
    #[serde(alias = "temperature_bounds", rename = "temperatureBounds", default)]
    pub temperature_bounds: Option<TemperatureBoundsInput>,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// One declared language with its proficiency on the 0-3 scale
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LanguageInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0, max = 3))]
    pub proficiency: u8,
}

/// Caller-supplied factor weights; omitting the whole object falls back
/// to the configured defaults, omitted fields weigh 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsInput {
    #[serde(default)]
    pub skills: f64,
    #[serde(default)]
    pub lang: f64,
    #[serde(default)]
    pub tolerance: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub climate: f64,
}

impl From<WeightsInput> for ScoringWeights {
    fn from(input: WeightsInput) -> Self {
        Self {
            skills: input.skills,
            lang: input.lang,
            tolerance: input.tolerance,
            cost: input.cost,
            climate: input.climate,
        }
    }
}

/// Hard temperature filter bounds, degrees Celsius
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureBoundsInput {
    pub min: f64,
    pub max: f64,
}

impl From<TemperatureBoundsInput> for TemperatureBounds {
    fn from(input: TemperatureBoundsInput) -> Self {
        Self {
            min: input.min,
            max: input.max,
        }
    }
}
