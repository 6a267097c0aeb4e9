//! Picks the project a free-text message refers to.

use crate::model::Obra;
use crate::text::normalize_text;

/// Anything that can be recognised by name inside a message.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Obra {
    fn name(&self) -> &str {
        Obra::name(self)
    }
}

/// Returns the candidate whose name appears in `text`.
///
/// Both sides are compared after [`normalize_text`]. When several names
/// appear, the longest one wins; among equally long names the first
/// candidate is kept. Candidates with an empty name never match.
pub fn find_by_name<'a, T: Named>(text: &str, candidates: &'a [T]) -> Option<&'a T> {
    let t = normalize_text(text);
    let mut best: Option<(&'a T, usize)> = None;

    for candidate in candidates {
        let name = normalize_text(candidate.name());
        if name.is_empty() || !t.contains(&name) {
            continue;
        }
        let len = name.chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((candidate, len));
        }
    }

    best.map(|(candidate, _)| candidate)
}
