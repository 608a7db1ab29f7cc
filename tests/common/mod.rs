//! Shared fixtures for the integration suite.

use std::fs;
use std::path::Path;

use bunrei::testing::ScriptedSource;
use bunrei::{BasicSegmenter, Engine, Tier, TierSet};

/// Romanized tier fixture that [`BasicSegmenter`] can segment from
/// space-delimited sources.
pub fn romaji_tiers() -> TierSet {
    TierSet::from_entries([
        (Tier::N5, "neko", "cat"),
        (Tier::N5, "inu", "dog"),
        (Tier::N5, "ga", "subject particle"),
        (Tier::N5, "wo", "object particle"),
        (Tier::N5, "gohan", "cooked rice; meal"),
        (Tier::N5, "taberu", "to eat"),
        (Tier::N4, "hashiru", "to run"),
        (Tier::N3, "sushi", "sushi"),
        (Tier::N2, "soujuu", "piloting; steering"),
    ])
}

pub fn write_source(root: &Path, name: &str, content: &str) {
    let sources = root.join("sources");
    fs::create_dir_all(&sources).unwrap();
    fs::write(sources.join(name), content).unwrap();
}

pub fn open_engine(root: &Path, source: ScriptedSource) -> Engine<BasicSegmenter, ScriptedSource> {
    Engine::open(
        &root.join("data"),
        &root.join("sources"),
        romaji_tiers(),
        BasicSegmenter,
        source,
    )
    .unwrap()
}
