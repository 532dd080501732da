//! Score-based selection among candidate constructors.
//!
//! Each candidate scores one point per parameter whose normalized name is a
//! discovered key. The highest score wins, with tie-breaking rules.

use std::cmp::Ordering;

use defaultgen_core::{CallableSpec, DiscoveredDefaults, normalize};

/// A scored candidate.
#[derive(Debug, Clone, Copy)]
struct Ranked<'a> {
    index: usize,
    candidate: &'a CallableSpec,
    score: usize,
}

/// Number of parameters of `candidate` that have a discovered default.
pub fn score(candidate: &CallableSpec, discovered: &DiscoveredDefaults) -> usize {
    candidate
        .parameters
        .iter()
        .filter(|p| discovered.contains_key(&normalize(&p.name)))
        .count()
}

/// Select the candidate that best matches the discovered defaults.
///
/// Returns `None` when there are no candidates or the best score is zero.
pub fn select_best<'a>(
    candidates: &'a [CallableSpec],
    discovered: &DiscoveredDefaults,
) -> Option<&'a CallableSpec> {
    let mut best: Option<Ranked<'a>> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let ranked = Ranked {
            index,
            candidate,
            score: score(candidate, discovered),
        };
        tracing::trace!(candidate = %candidate.target(), score = ranked.score, "scored candidate");
        best = match best {
            Some(current) if break_tie(&current, &ranked) != Ordering::Less => Some(current),
            _ => Some(ranked),
        };
    }

    let best = best.filter(|b| b.score > 0)?;
    tracing::debug!(
        selected = %best.candidate.target(),
        index = best.index,
        score = best.score,
        "selected candidate"
    );
    Some(best.candidate)
}

/// Compare two candidates; `Greater` means `a` is preferred.
///
/// Tie-breaking rules:
/// 1. Higher score
/// 2. More parameters
/// 3. Earlier in declaration order
fn break_tie(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    a.score
        .cmp(&b.score)
        .then_with(|| a.candidate.parameters.len().cmp(&b.candidate.parameters.len()))
        .then_with(|| b.index.cmp(&a.index))
}
