use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use bunrei::{
    BasicSegmenter, Engine, JishoClient, LookupOutcome, RankedSentence, Tier, TierSet,
};

mod cli;
use cli::{Cli, Commands};

/// Tier vocabulary lists live under `<data>/tiers/n5.tsv` .. `n1.tsv`.
fn open_engine(
    data: &str,
    sources: &str,
) -> Result<Engine<BasicSegmenter, JishoClient>, bunrei::EngineError> {
    let data_dir = Path::new(data);
    let tiers = TierSet::load_dir(&data_dir.join("tiers"));
    if tiers.is_empty() {
        log::warn!("no tier lists loaded; every word will score as out-of-tier");
    }
    let client = JishoClient::new()?;
    Engine::open(data_dir, Path::new(sources), tiers, BasicSegmenter, client)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ingest { sources, data } => run_ingest(&sources, &data),
        Commands::Search {
            word,
            level,
            data,
            limit,
        } => run_search(&word, &level, &data, limit),
        Commands::Stats { data } => run_stats(&data),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_ingest(sources: &str, data: &str) -> Result<(), bunrei::EngineError> {
    let engine = open_engine(data, sources)?;
    let added = engine.ingest_new_sources()?;
    if added.is_empty() {
        println!("no new sources");
    } else {
        for source_id in &added {
            println!("  + {source_id}");
        }
        println!("ingested {} new sources", added.len());
    }
    Ok(())
}

fn run_search(word: &str, level: &str, data: &str, limit: usize) -> Result<(), bunrei::EngineError> {
    let engine = open_engine(data, "sources")?;

    match engine.lookup_labeled(word, level) {
        LookupOutcome::UnknownLevel => {
            eprintln!("unknown level '{level}' (expected N5..N1)");
        }
        LookupOutcome::WordNotFound => {
            println!("'{word}' not found in the corpus");
        }
        LookupOutcome::Found(result) => {
            match &result.definition {
                Some(definition) => println!("{word}: {definition}"),
                None => println!("{word}: (no definition)"),
            }
            println!();
            for ranked in result.sentences.iter().take(limit) {
                print_sentence(ranked);
            }
            if result.sentences.len() > limit {
                println!("... {} more", result.sentences.len() - limit);
            }
        }
    }
    Ok(())
}

fn print_sentence(ranked: &RankedSentence) {
    let dist = &ranked.scored.distribution;
    let shares: Vec<String> = Tier::ALL
        .iter()
        .map(|t| format!("{}:{:.0}%", t, dist.get(t.bucket()) * 100.0))
        .collect();
    println!("{}", ranked.scored.text);
    println!("    [{}] {} words", shares.join(" "), ranked.scored.word_count);
    for word in &ranked.difficult_words {
        println!("    {} ({}): {}", word.word, word.level, word.meaning);
    }
}

fn run_stats(data: &str) -> Result<(), bunrei::EngineError> {
    let engine = open_engine(data, "sources")?;
    let stats = engine.stats();
    println!("indexed words       {}", stats.indexed_words);
    println!("sentence refs       {}", stats.sentence_refs);
    println!("ingested sources    {}", stats.ingested_sources);
    println!("cached definitions  {}", stats.cached_definitions);
    println!("tier words          {}", stats.tier_words);
    Ok(())
}
