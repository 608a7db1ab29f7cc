//! The seam to the external morphological analyzer.
//!
//! The engine never tokenizes text itself; it asks a [`Segmenter`] for the
//! ordered tokens of a sentence and works with their dictionary (base)
//! forms. Production deployments plug in a real analyzer (Sudachi, MeCab,
//! ...) behind this trait. The crate ships [`BasicSegmenter`], a character
//! class splitter, which is good enough for whitespace-delimited corpora
//! and for tests but does not segment continuous Japanese script.

use unicode_normalization::UnicodeNormalization;

/// One token of a segmented sentence.
///
/// `start` and `len` are byte positions into the original text, usable for
/// exact-offset lookup from a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    /// Dictionary (base) form. For a conjugating language this is the form
    /// under which the word appears in tier lists and the corpus index.
    pub dictionary_form: String,
    pub start: usize,
    pub len: usize,
}

/// External segmentation capability: text in, ordered tokens out.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<Token>;

    /// Dictionary forms only, in token order. Most of the engine wants
    /// exactly this.
    fn dictionary_forms(&self, text: &str) -> Vec<String> {
        self.segment(text)
            .into_iter()
            .map(|token| token.dictionary_form)
            .collect()
    }
}

impl<S: Segmenter + ?Sized> Segmenter for &S {
    fn segment(&self, text: &str) -> Vec<Token> {
        (**self).segment(text)
    }
}

/// Find the token covering a byte offset, if any.
///
/// Consumed by presentation layers that map a click position back to a word.
pub fn token_at<'a>(tokens: &'a [Token], offset: usize) -> Option<&'a Token> {
    tokens
        .iter()
        .find(|token| offset >= token.start && offset < token.start + token.len)
}

/// Fold a word for use as an index key: NFKC (half-width katakana and
/// full-width Latin collapse onto their canonical forms) plus ASCII
/// lowercasing.
pub fn fold(word: &str) -> String {
    word.nfkc().collect::<String>().to_lowercase()
}

/// Character-class fallback segmenter.
///
/// Splits on anything non-alphanumeric and uses the folded surface as the
/// dictionary form. Continuous kana/kanji runs come back as a single token,
/// which is the best a dictionary-less splitter can do.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSegmenter;

impl Segmenter for BasicSegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut run_start = None;

        for (idx, ch) in text.char_indices() {
            if ch.is_alphanumeric() {
                run_start.get_or_insert(idx);
            } else if let Some(start) = run_start.take() {
                tokens.push(make_token(text, start, idx));
            }
        }
        if let Some(start) = run_start {
            tokens.push(make_token(text, start, text.len()));
        }

        tokens
    }
}

fn make_token(text: &str, start: usize, end: usize) -> Token {
    let surface = &text[start..end];
    Token {
        surface: surface.to_string(),
        dictionary_form: fold(surface),
        start,
        len: end - start,
    }
}
