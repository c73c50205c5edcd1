use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Country record from the relocation catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryProfile {
    pub name: String,
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
    #[serde(rename = "sectorScores", default)]
    pub sector_scores: HashMap<String, f64>,
    #[serde(default)]
    pub tolerance: f64,
    #[serde(rename = "costIndex", default)]
    pub cost_index: f64,
    #[serde(default)]
    pub climate: f64,
    #[serde(rename = "monthlyAvgTemps", default)]
    pub monthly_avg_temps: Vec<MonthlyTemperature>,
    #[serde(default)]
    pub description: String,
}

/// A language spoken in a country, weighted by how widely it is spoken.
///
/// Source data may supply either a bare name list (`["english", "german"]`)
/// or weighted entries (`[{"name": "english", "weight": 0.9}]`). Bare names
/// get weight 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "LanguageEntryRepr")]
pub struct LanguageEntry {
    pub name: String,
    pub weight: f64,
}

impl LanguageEntry {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LanguageEntryRepr {
    Name(String),
    Weighted {
        name: String,
        #[serde(default = "default_language_weight")]
        weight: f64,
    },
}

impl From<LanguageEntryRepr> for LanguageEntry {
    fn from(repr: LanguageEntryRepr) -> Self {
        match repr {
            LanguageEntryRepr::Name(name) => Self {
                name,
                weight: default_language_weight(),
            },
            LanguageEntryRepr::Weighted { name, weight } => Self { name, weight },
        }
    }
}

fn default_language_weight() -> f64 {
    1.0
}

/// Average temperature range for one calendar month, in degrees Celsius
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthlyTemperature {
    pub min: f64,
    pub max: f64,
}

/// Hard temperature filter supplied by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureBounds {
    pub min: f64,
    pub max: f64,
}

/// A language the user speaks, with proficiency on the 0-3 scale
/// (0 = none, 1 = basic, 2 = conversational, 3 = fluent/native)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub name: String,
    pub proficiency: u8,
}

/// User profile assembled per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(rename = "temperatureBounds", default)]
    pub temperature_bounds: Option<TemperatureBounds>,
}

/// Per-factor breakdown underlying a final composite score, each in 0..1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub lang: f64,
    pub tolerance: f64,
    pub cost: f64,
    pub climate: f64,
}

/// Scored country result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCountry {
    pub country: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub breakdown: ScoreBreakdown,
    pub description: String,
}

/// Scoring weights for the five match factors
///
/// Weights need not sum to 1: a raw sum above 1.0 is normalized back down,
/// a sum below 1.0 is left unscaled and shrinks the achievable maximum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub lang: f64,
    pub tolerance: f64,
    pub cost: f64,
    pub climate: f64,
}

impl ScoringWeights {
    /// Scale weights so they sum to at most 1.0.
    ///
    /// Only a raw sum above 1.0 is rescaled; an under-specified sum is
    /// left as-is.
    pub fn normalized(&self) -> Self {
        let sum = self.skills + self.lang + self.tolerance + self.cost + self.climate;
        if sum > 1.0 {
            Self {
                skills: self.skills / sum,
                lang: self.lang / sum,
                tolerance: self.tolerance / sum,
                cost: self.cost / sum,
                climate: self.climate / sum,
            }
        } else {
            *self
        }
    }

    /// Factor name/value pairs, in composite order
    pub fn factors(&self) -> [(&'static str, f64); 5] {
        [
            ("skills", self.skills),
            ("lang", self.lang),
            ("tolerance", self.tolerance),
            ("cost", self.cost),
            ("climate", self.climate),
        ]
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            lang: 0.35,
            tolerance: 0.15,
            cost: 0.10,
            climate: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_entry_from_bare_name() {
        let entries: Vec<LanguageEntry> =
            serde_json::from_str(r#"["english", "german"]"#).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "english");
        assert_eq!(entries[0].weight, 1.0);
    }

    #[test]
    fn test_language_entry_from_weighted_object() {
        let entries: Vec<LanguageEntry> =
            serde_json::from_str(r#"[{"name": "portuguese", "weight": 0.9}, {"name": "english"}]"#)
                .unwrap();

        assert_eq!(entries[0].name, "portuguese");
        assert_eq!(entries[0].weight, 0.9);
        assert_eq!(entries[1].weight, 1.0);
    }

    #[test]
    fn test_weights_normalized_when_sum_exceeds_one() {
        let weights = ScoringWeights {
            skills: 1.0,
            lang: 1.0,
            tolerance: 1.0,
            cost: 1.0,
            climate: 1.0,
        };

        let normalized = weights.normalized();
        let sum: f64 = normalized.factors().iter().map(|(_, v)| v).sum();

        assert!((sum - 1.0).abs() < 1e-9);
        assert!((normalized.skills - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_weights_left_unscaled_when_sum_below_one() {
        let weights = ScoringWeights {
            skills: 0.2,
            lang: 0.2,
            tolerance: 0.1,
            cost: 0.0,
            climate: 0.0,
        };

        let normalized = weights.normalized();

        assert_eq!(normalized.skills, 0.2);
        assert_eq!(normalized.lang, 0.2);
        assert_eq!(normalized.tolerance, 0.1);
    }

    #[test]
    fn test_country_profile_missing_optional_fields() {
        let country: CountryProfile =
            serde_json::from_str(r#"{"name": "Testland"}"#).unwrap();

        assert_eq!(country.name, "Testland");
        assert!(country.languages.is_empty());
        assert!(country.sector_scores.is_empty());
        assert!(country.monthly_avg_temps.is_empty());
        assert_eq!(country.tolerance, 0.0);
    }
}
