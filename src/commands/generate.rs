//! Produces a deterministic sample collection for demos and tests.

use crate::record::Record;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

pub struct GenerateConfig {
    pub count: usize,
    pub seed: u64,
    pub output: Option<PathBuf>,
}

const TITLES: &[&str] = &[
    "Gato feliz",
    "Gato bravo",
    "Bom dia grupo",
    "Meme do estagiário",
    "Receita de bolo de fubá",
    "Churrasco no domingo",
    "Promoção de passagens",
    "Pôr do sol na praia",
    "Futebol de quinta",
    "Trânsito na marginal",
    "Foto da formatura",
    "Vaga de emprego",
    "Dica de economia",
    "Série nova no ar",
    "Chegou o boleto",
];

const AUTHORS: &[&str] = &[
    "ana", "bruno", "carla", "diego", "elisa", "fabio", "gustavo", "helena", "igor", "julia",
];

const TAGS: &[&str] = &[
    "gatos", "memes", "receitas", "viagem", "familia", "trabalho", "esportes", "musica",
];

pub fn generate_records(config: GenerateConfig) -> Result<()> {
    let records = sample_records(config.count, config.seed, Utc::now());
    let json = serde_json::to_string_pretty(&records)?;

    match config.output {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write records to: {}", path.display()))?;
            println!("Wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Pure generator: the same count, seed, and clock always produce the
/// same collection.
pub fn sample_records(count: usize, seed: u64, now: DateTime<Utc>) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let title = TITLES[rng.gen_range(0..TITLES.len())];
            let author = AUTHORS[rng.gen_range(0..AUTHORS.len())];
            let tag_count = rng.gen_range(0..=2);
            let tags: Vec<String> = TAGS
                .choose_multiple(&mut rng, tag_count)
                .map(|tag| tag.to_string())
                .collect();
            let days = Duration::days(rng.gen_range(0..30));
            let minutes = Duration::minutes(rng.gen_range(0..1440));

            Record::new(i as u64 + 1, title, now - days - minutes)
                .with_author(author)
                .with_tags(tags)
                .with_engagement(rng.gen_range(0..500), rng.gen_range(0..120))
        })
        .collect()
}
