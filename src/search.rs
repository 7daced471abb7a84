//! Lexical search over session titles
//!
//! Stateless scoring over the in-memory session list — no index is built or
//! persisted, the ranking is recomputed per query. Session counts are small
//! enough that this is cheap even on every keystroke of a search box.

use crate::store::ChatSession;

/// Score added for each query token found anywhere in the title
const SUBSTRING_SCORE: u32 = 10;
/// Score added on top when the token is also a prefix of the title
const PREFIX_BONUS: u32 = 15;

/// Rank sessions against a query
///
/// An empty (after trim) query returns the input unchanged, original order
/// preserved. Otherwise the query is lowercased and split on whitespace;
/// each token contributes 10 when it appears anywhere in the title and a
/// further 15 when the title starts with it. Sessions scoring zero are
/// dropped, the rest sort by descending score, and ties keep the original
/// relative order of `sessions`. The input is never mutated.
pub fn search(query: &str, sessions: &[ChatSession]) -> Vec<ChatSession> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return sessions.to_vec();
    }

    let normalized = trimmed.to_lowercase();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let mut scored: Vec<(u32, &ChatSession)> = sessions
        .iter()
        .filter_map(|session| {
            let score = score_title(&session.title, &tokens);
            (score > 0).then_some((score, session))
        })
        .collect();

    // sort_by is stable, so equal scores keep their input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, s)| s.clone()).collect()
}

/// Score one title against the normalized query tokens
fn score_title(title: &str, tokens: &[&str]) -> u32 {
    let haystack = title.trim().to_lowercase();
    tokens
        .iter()
        .map(|token| {
            let mut score = 0;
            if haystack.contains(token) {
                score += SUBSTRING_SCORE;
            }
            if haystack.starts_with(token) {
                score += PREFIX_BONUS;
            }
            score
        })
        .sum()
}
