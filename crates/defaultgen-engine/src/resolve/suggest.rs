//! Typo suggestion for unresolved member names.

/// Closest candidate to `target`, if it is close enough to be a likely typo.
///
/// Distance is case-insensitive unit-cost edit distance. The best candidate
/// is accepted when its distance is at most `max(2, len(target) / 3)`; on a
/// tie the earlier candidate wins.
pub fn suggest<I, S>(target: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let needle = target.to_lowercase();
    let threshold = (target.chars().count() / 3).max(2);

    let mut best: Option<(String, usize)> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let dist = edit_distance(&needle, &candidate.to_lowercase());
        if best.as_ref().is_none_or(|(_, current)| dist < *current) {
            best = Some((candidate.to_string(), dist));
        }
    }

    match best {
        Some((candidate, dist)) if dist <= threshold => Some(candidate),
        _ => None,
    }
}

/// Unit-cost edit distance.
///
/// Strings whose lengths differ by more than half the longer length are
/// reported at the longer length without running the full computation.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if a.len().abs_diff(b.len()) > longest / 2 {
        return longest;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
