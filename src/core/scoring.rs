use std::collections::HashMap;

use crate::core::similarity::score_skill;
use crate::models::{CountryProfile, LanguageEntry, LanguageSkill, ScoreBreakdown, UserProfile};

/// Upper end of the language proficiency scale
pub const MAX_PROFICIENCY: u8 = 3;

/// Calculate a match score (0-100) and per-factor breakdown for a country
///
/// Scoring factors:
/// - skills:    fuzzy skill/sector fit, averaged over the user's skills
/// - lang:      best proficiency-weighted language match, scaled by /3
/// - tolerance: the country's tolerance indicator, taken directly
/// - cost:      1 - cost_index (cheaper scores higher)
/// - climate:   warmth indicator mapped from [-1,1] to [0,1]
///
/// Weights are normalized only when their raw sum exceeds 1.0; a smaller
/// sum is left unscaled and caps the achievable maximum score.
pub fn calculate_match_score(user: &UserProfile, country: &CountryProfile) -> (f64, ScoreBreakdown) {
    let skills = calculate_skill_score(&user.skills, &country.sector_scores);
    let lang = calculate_language_score(&user.languages, &country.languages);
    let tolerance = country.tolerance.clamp(0.0, 1.0);
    let cost = (1.0 - country.cost_index).clamp(0.0, 1.0);
    let climate = ((country.climate + 1.0) / 2.0).clamp(0.0, 1.0);

    let weights = user.weights.normalized();
    let weighted_sum = (weights.skills * skills
        + weights.lang * lang
        + weights.tolerance * tolerance
        + weights.cost * cost
        + weights.climate * climate)
        .min(1.0);

    let final_score = round2(weighted_sum * 100.0);

    let breakdown = ScoreBreakdown {
        skills: round3(skills),
        lang: round3(lang),
        tolerance: round3(tolerance),
        cost: round3(cost),
        climate: round3(climate),
    };

    (final_score, breakdown)
}

/// Calculate the skill factor (0-1)
///
/// Each skill contributes the best `similarity * sector_strength` product
/// over the country's sectors; contributions are averaged. An empty skill
/// list or sector map contributes nothing, and there is no fallback to a
/// "general" sector entry.
pub fn calculate_skill_score(skills: &[String], sector_scores: &HashMap<String, f64>) -> f64 {
    if skills.is_empty() || sector_scores.is_empty() {
        return 0.0;
    }

    let total: f64 = skills
        .iter()
        .map(|skill| {
            sector_scores
                .iter()
                .map(|(sector, strength)| score_skill(skill, [sector.as_str()]) * strength)
                .fold(0.0, f64::max)
        })
        .sum();

    (total / skills.len() as f64).clamp(0.0, 1.0)
}

/// Calculate the language factor (0-1)
///
/// For every user language that matches a country language entry
/// case-insensitively, the candidate value is `proficiency * entry
/// weight`. The factor is the best candidate scaled by the maximum
/// proficiency; one strong match is enough, unrelated entries never
/// dilute it.
pub fn calculate_language_score(
    user_languages: &[LanguageSkill],
    country_languages: &[LanguageEntry],
) -> f64 {
    let mut best = 0.0f64;

    for spoken in user_languages {
        let proficiency = f64::from(spoken.proficiency.min(MAX_PROFICIENCY));
        for entry in country_languages {
            if entry.name.eq_ignore_ascii_case(&spoken.name) {
                best = best.max(proficiency * entry.weight);
            }
        }
    }

    (best / f64::from(MAX_PROFICIENCY)).clamp(0.0, 1.0)
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[inline]
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoringWeights;

    fn create_test_country() -> CountryProfile {
        CountryProfile {
            name: "Testland".to_string(),
            languages: vec![
                LanguageEntry::new("english", 1.0),
                LanguageEntry::new("german", 1.0),
            ],
            sector_scores: HashMap::from([("tech".to_string(), 0.8)]),
            tolerance: 0.8,
            cost_index: 0.4,
            climate: 0.1,
            monthly_avg_temps: vec![],
            description: String::new(),
        }
    }

    fn create_test_user() -> UserProfile {
        UserProfile {
            skills: vec!["python".to_string()],
            languages: vec![LanguageSkill {
                name: "english".to_string(),
                proficiency: 3,
            }],
            weights: ScoringWeights {
                skills: 0.3,
                lang: 0.3,
                tolerance: 0.2,
                cost: 0.1,
                climate: 0.1,
            },
            temperature_bounds: None,
        }
    }

    #[test]
    fn test_exact_language_match_at_max_proficiency() {
        let user = create_test_user();
        let country = create_test_country();

        let (score, breakdown) = calculate_match_score(&user, &country);

        assert_eq!(breakdown.lang, 1.0);
        assert!(score > 0.0);
    }

    #[test]
    fn test_no_language_match_scores_zero() {
        let mut user = create_test_user();
        user.languages = vec![LanguageSkill {
            name: "french".to_string(),
            proficiency: 3,
        }];
        let country = create_test_country();

        let (_, breakdown) = calculate_match_score(&user, &country);

        assert_eq!(breakdown.lang, 0.0);
    }

    #[test]
    fn test_language_match_is_case_insensitive() {
        let score = calculate_language_score(
            &[LanguageSkill {
                name: "English".to_string(),
                proficiency: 3,
            }],
            &[LanguageEntry::new("english", 1.0)],
        );

        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_language_weight_scales_score() {
        let score = calculate_language_score(
            &[LanguageSkill {
                name: "english".to_string(),
                proficiency: 3,
            }],
            &[LanguageEntry::new("english", 0.5)],
        );

        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_best_language_match_wins() {
        // A single fluent match must not be diluted by weaker entries
        let score = calculate_language_score(
            &[
                LanguageSkill {
                    name: "english".to_string(),
                    proficiency: 3,
                },
                LanguageSkill {
                    name: "german".to_string(),
                    proficiency: 1,
                },
            ],
            &[
                LanguageEntry::new("english", 1.0),
                LanguageEntry::new("german", 1.0),
            ],
        );

        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_out_of_range_proficiency_clamped() {
        let score = calculate_language_score(
            &[LanguageSkill {
                name: "english".to_string(),
                proficiency: 7,
            }],
            &[LanguageEntry::new("english", 1.0)],
        );

        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_empty_skills_score_zero() {
        let mut user = create_test_user();
        user.skills = vec![];
        let country = create_test_country();

        let (_, breakdown) = calculate_match_score(&user, &country);

        assert_eq!(breakdown.skills, 0.0);
    }

    #[test]
    fn test_no_general_sector_fallback() {
        // An unrelated skill must not pick up the "general" entry's
        // strength beyond its own fuzzy similarity
        let sectors = HashMap::from([("general".to_string(), 0.5)]);
        let score = calculate_skill_score(&["nurse".to_string()], &sectors);

        assert!(score < 0.2, "expected near-zero skill score, got {}", score);
    }

    #[test]
    fn test_exact_sector_match_scaled_by_strength() {
        let sectors = HashMap::from([("tech".to_string(), 0.8)]);
        let score = calculate_skill_score(&["tech".to_string()], &sectors);

        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_skill_score_averages_over_skills() {
        let sectors = HashMap::from([
            ("tech".to_string(), 1.0),
            ("finance".to_string(), 1.0),
        ]);
        let skills = vec!["tech".to_string(), "finance".to_string()];

        let score = calculate_skill_score(&skills, &sectors);

        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_within_valid_range() {
        let user = create_test_user();
        let country = create_test_country();

        let (score, breakdown) = calculate_match_score(&user, &country);

        assert!((0.0..=100.0).contains(&score));
        for value in [
            breakdown.skills,
            breakdown.lang,
            breakdown.tolerance,
            breakdown.cost,
            breakdown.climate,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_oversized_weights_normalized() {
        let mut user = create_test_user();
        user.weights = ScoringWeights {
            skills: 2.0,
            lang: 2.0,
            tolerance: 2.0,
            cost: 2.0,
            climate: 2.0,
        };
        let country = create_test_country();

        let (score, _) = calculate_match_score(&user, &country);

        assert!(score <= 100.0);
    }

    #[test]
    fn test_undersized_weights_cap_the_score() {
        // A weight sum of 0.5 caps the final score at 50
        let mut user = create_test_user();
        user.weights = ScoringWeights {
            skills: 0.1,
            lang: 0.1,
            tolerance: 0.1,
            cost: 0.1,
            climate: 0.1,
        };
        let country = create_test_country();

        let (score, _) = calculate_match_score(&user, &country);

        assert!(score <= 50.0);
    }

    #[test]
    fn test_cost_factor_inverts_cost_index() {
        let user = create_test_user();
        let mut country = create_test_country();
        country.cost_index = 0.4;

        let (_, breakdown) = calculate_match_score(&user, &country);

        assert!((breakdown.cost - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_climate_factor_maps_warmth_range() {
        let user = create_test_user();
        let mut country = create_test_country();
        country.climate = -1.0;
        let (_, cold) = calculate_match_score(&user, &country);
        country.climate = 1.0;
        let (_, warm) = calculate_match_score(&user, &country);

        assert_eq!(cold.climate, 0.0);
        assert_eq!(warm.climate, 1.0);
    }
}
