// Criterion benchmarks for Relo Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relo_algo::core::{similarity::token_set_ratio, Ranker};
use relo_algo::models::{
    CountryProfile, LanguageEntry, LanguageSkill, ScoringWeights, UserProfile,
};
use std::collections::HashMap;

const SECTORS: [&str; 5] = ["tech", "manufacturing", "finance", "tourism", "healthcare"];
const LANGUAGES: [&str; 5] = ["english", "german", "french", "spanish", "polish"];

fn create_country(id: usize) -> CountryProfile {
    let sector_scores: HashMap<String, f64> = SECTORS
        .iter()
        .enumerate()
        .map(|(i, sector)| (sector.to_string(), ((id + i) % 10) as f64 / 10.0))
        .collect();

    CountryProfile {
        name: format!("Country {}", id),
        languages: vec![
            LanguageEntry::new(LANGUAGES[id % LANGUAGES.len()], 1.0),
            LanguageEntry::new("english", 0.8),
        ],
        sector_scores,
        tolerance: (id % 10) as f64 / 10.0,
        cost_index: ((id + 3) % 10) as f64 / 10.0,
        climate: ((id % 20) as f64 / 10.0) - 1.0,
        monthly_avg_temps: vec![],
        description: format!("Synthetic country {}", id),
    }
}

fn create_user() -> UserProfile {
    UserProfile {
        skills: vec!["python".to_string(), "data engineering".to_string()],
        languages: vec![
            LanguageSkill {
                name: "english".to_string(),
                proficiency: 3,
            },
            LanguageSkill {
                name: "german".to_string(),
                proficiency: 1,
            },
        ],
        weights: ScoringWeights::default(),
        temperature_bounds: None,
    }
}

fn bench_token_set_ratio(c: &mut Criterion) {
    c.bench_function("token_set_ratio", |b| {
        b.iter(|| {
            token_set_ratio(
                black_box("data engineering"),
                black_box("software engineering"),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = Ranker::with_default_weights();
    let user = create_user();

    let mut group = c.benchmark_group("ranking");

    for catalog_size in [10, 50, 100, 500, 1000].iter() {
        let catalog: Vec<CountryProfile> = (0..*catalog_size).map(create_country).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| {
                    ranker
                        .rank(black_box(&user), black_box(catalog.clone()), black_box(20))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_scoring_single_country(c: &mut Criterion) {
    let user = create_user();
    let country = create_country(7);

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| {
            relo_algo::core::calculate_match_score(black_box(&user), black_box(&country))
        });
    });
}

criterion_group!(
    benches,
    bench_token_set_ratio,
    bench_ranking,
    bench_scoring_single_country
);

criterion_main!(benches);
