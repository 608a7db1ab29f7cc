//! End-to-end tests: ingest → lookup → rank → annotate, across process
//! restarts (simulated by reopening the stores from the same directory).

mod common;

use common::{open_engine, write_source};

use bunrei::testing::ScriptedSource;
use bunrei::{LookupOutcome, Tier};

#[test]
fn ingest_then_lookup_ranks_for_the_learner() {
    let dir = tempfile::tempdir().unwrap();
    write_source(
        dir.path(),
        "reader.txt",
        "neko ga gohan wo taberu。neko ga sushi wo taberu。neko ga hashiru。",
    );

    let engine = open_engine(dir.path(), ScriptedSource::empty());
    assert_eq!(engine.ingest_new_sources().unwrap(), ["reader.txt"]);

    let result = engine.lookup("neko", Tier::N5).unwrap();
    assert_eq!(result.definition.as_deref(), Some("cat"));
    assert_eq!(result.sentences.len(), 3);

    // All-N5 sentence first for an N5 learner.
    assert_eq!(result.sentences[0].scored.text, "neko ga gohan wo taberu。");

    // The N3 word is annotated on its sentence; N5 words never are.
    let sushi_sentence = result
        .sentences
        .iter()
        .find(|s| s.scored.text.contains("sushi"))
        .unwrap();
    let words: Vec<&str> = sushi_sentence
        .difficult_words
        .iter()
        .map(|w| w.word.as_str())
        .collect();
    assert_eq!(words, ["sushi"]);
}

#[test]
fn tsv_and_txt_sources_feed_the_same_index() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "book.txt", "inu ga hashiru。");
    write_source(
        dir.path(),
        "tatoeba.tsv",
        "101\tjpn\tinu ga gohan wo taberu。\n102\tjpn\tneko ga hashiru。\n",
    );

    let engine = open_engine(dir.path(), ScriptedSource::empty());
    let mut added = engine.ingest_new_sources().unwrap();
    added.sort();
    assert_eq!(added, ["book.txt", "tatoeba.tsv"]);

    let result = engine.lookup("inu", Tier::N4).unwrap();
    assert_eq!(result.sentences.len(), 2);
}

#[test]
fn corpus_and_ingest_log_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "reader.txt", "neko ga taberu。");

    {
        let engine = open_engine(dir.path(), ScriptedSource::empty());
        engine.ingest_new_sources().unwrap();
    }

    // Fresh engine over the same data directory: index is replayed and the
    // source is not re-ingested.
    let engine = open_engine(dir.path(), ScriptedSource::empty());
    assert!(engine.ingest_new_sources().unwrap().is_empty());
    assert!(engine.lookup("neko", Tier::N5).is_some());
}

#[test]
fn definition_cache_survives_reopen_and_prevents_remote_calls() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "reader.txt", "uchuusen ga hashiru。");

    {
        let engine = open_engine(
            dir.path(),
            ScriptedSource::with_definition("uchuusen", "spaceship"),
        );
        engine.ingest_new_sources().unwrap();
        let result = engine.lookup("uchuusen", Tier::N5).unwrap();
        assert_eq!(result.definition.as_deref(), Some("spaceship"));
    }

    let source = ScriptedSource::with_definition("uchuusen", "spaceship");
    let calls = source.call_counter();
    let engine = open_engine(dir.path(), source);
    let result = engine.lookup("uchuusen", Tier::N5).unwrap();
    assert_eq!(result.definition.as_deref(), Some("spaceship"));
    assert_eq!(calls.get(), 0, "second session must be served from cache");
}

#[test]
fn failed_lookups_are_cached_negatively_within_a_session() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "reader.txt", "mazeru to mazeru。mazeru yo。");

    let source = ScriptedSource::failing();
    let calls = source.call_counter();
    let engine = open_engine(dir.path(), source);
    engine.ingest_new_sources().unwrap();

    // Both sentences annotate the same unknown words; each word hits the
    // service once, after that the negative entry answers.
    let result = engine.lookup("mazeru", Tier::N1).unwrap();
    assert_eq!(result.sentences.len(), 2);
    let calls_after_first = calls.get();
    engine.lookup("mazeru", Tier::N1).unwrap();
    assert_eq!(calls.get(), calls_after_first);
}

#[test]
fn lookup_outcomes_distinguish_missing_word_from_bad_level() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(dir.path(), ScriptedSource::empty());

    assert!(matches!(
        engine.lookup_labeled("neko", "B2"),
        LookupOutcome::UnknownLevel
    ));
    assert!(matches!(
        engine.lookup_labeled("neko", "n5"),
        LookupOutcome::WordNotFound
    ));
}

#[test]
fn ranking_changes_with_learner_level() {
    let dir = tempfile::tempdir().unwrap();
    write_source(
        dir.path(),
        "reader.txt",
        "soujuu ga muzukashii。neko ga taberu。",
    );

    let engine = open_engine(dir.path(), ScriptedSource::empty());
    engine.ingest_new_sources().unwrap();

    // Both sentences contain "ga". For N5, the N5-dense sentence wins; for
    // N2, the one carrying the N2 word wins.
    let n5 = engine.lookup("ga", Tier::N5).unwrap();
    assert_eq!(n5.sentences[0].scored.text, "neko ga taberu。");

    let n2 = engine.lookup("ga", Tier::N2).unwrap();
    assert_eq!(n2.sentences[0].scored.text, "soujuu ga muzukashii。");
}
