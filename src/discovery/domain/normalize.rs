//! Model-name normalisation shared by the matcher's fuzzy strategies.
//!
//! Model identifiers arrive in inconsistent forms: user-typed IDs, catalog
//! IDs, and whatever a server reports about itself. Normalisation folds those
//! forms together so `Gemma-2-2B-Instruct` and `gemma_2_2b_it` compare equal.

/// Rewrites applied until the name stops changing.
///
/// `instruction` precedes `instruct` so the longer form is not half-rewritten.
const REWRITES: [(&str, &str); 4] = [
    ("instruction", "it"),
    ("instruct", "it"),
    ("small", ""),
    ("large", ""),
];

/// Separators that split a model name into tokens.
const TOKEN_SEPARATORS: [char; 2] = ['-', '_'];

/// Normalises a model name for fuzzy comparison.
///
/// Lowercases, strips every non-alphanumeric character, removes `small` and
/// `large`, and folds `instruct`/`instruction` to `it`. Rewrites repeat until
/// a fixed point, so `normalize_model_name(normalize_model_name(x))` always
/// equals `normalize_model_name(x)`.
#[must_use]
pub fn normalize_model_name(name: &str) -> String {
    let mut current: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|character| character.to_ascii_lowercase())
        .collect();

    loop {
        let rewritten = REWRITES
            .iter()
            .fold(current.clone(), |acc, (from, to)| acc.replace(from, to));
        if rewritten == current {
            return current;
        }
        current = rewritten;
    }
}

/// Splits a model name into normalised tokens.
///
/// Any organisation prefix (`google/`) is dropped, the remainder is split on
/// `-` and `_`, each piece is normalised, and empty pieces are discarded. The
/// first token is the model's core name.
#[must_use]
pub fn model_tokens(name: &str) -> Vec<String> {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.split(TOKEN_SEPARATORS)
        .map(normalize_model_name)
        .filter(|token| !token.is_empty())
        .collect()
}
