//! Disposition outcome resolution.
//!
//! Portals never say who won. The only signal is the free-text "Awarded
//! To"/"Awarded Against" names, which abbreviate and reorder party names,
//! so they are matched word by word with a partial-ratio similarity.

use docket_types::types::{Resolution, Winner};

use crate::config::DEFAULT_FUZZY_THRESHOLD;

/// Raw disposition text the resolver works from. Empty strings are treated
/// the same as missing values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispositionText<'a> {
    pub awarded_against: Option<&'a str>,
    pub awarded_to: Option<&'a str>,
    pub plaintiff: Option<&'a str>,
    /// All defendants, space-joined.
    pub defendant: Option<&'a str>,
    pub disposition_type: Option<&'a str>,
    pub status: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    threshold: u32,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver {
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl Resolver {
    pub fn new(threshold: u32) -> Self {
        Resolver { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Decides who a disposition favours.
    ///
    /// Dismissal checks run first, then the default-judgment rule, then the
    /// word-wise fuzzy comparison of "Awarded To" against both parties.
    /// A tie there is broken with "Awarded Against", where the lower score
    /// wins. Returns `None` when nothing decides it.
    pub fn resolve(&self, text: &DispositionText<'_>) -> Option<Resolution> {
        if let Some(status) = present(text.status) {
            if status.contains("Dismissed") || status.contains("DWOP") {
                return Some(Resolution::new(100, Winner::NoJudgement));
            }
        }
        if let Some(disposition_type) = present(text.disposition_type) {
            if disposition_type.contains("Dismissed") {
                return Some(Resolution::new(100, Winner::NoJudgement));
            }
            if disposition_type.contains("Default") {
                return Some(Resolution::new(100, Winner::Plaintiff));
            }
        }

        let awarded_to = present(text.awarded_to)?;
        let plaintiff = present(text.plaintiff)?;
        let defendant = present(text.defendant)?;

        let (p, d) = self.match_wordwise(awarded_to, plaintiff, defendant);
        if p > d {
            return Some(Resolution::new(p, Winner::Plaintiff));
        }
        if d > p {
            return Some(Resolution::new(d, Winner::Defendant));
        }

        let awarded_against = present(text.awarded_against)?;
        let (p, d) = self.match_wordwise(awarded_against, plaintiff, defendant);
        if p < d {
            Some(Resolution::new(p, Winner::Plaintiff))
        } else if d < p {
            Some(Resolution::new(d, Winner::Defendant))
        } else {
            None
        }
    }

    /// Summed pair scores of `award` against the plaintiff and defendant
    /// words. Pairs at or below the threshold contribute nothing.
    pub fn match_wordwise(&self, award: &str, plaintiff: &str, defendant: &str) -> (u32, u32) {
        let award = words(award);
        let side = |party: &str| -> u32 {
            let party = words(party);
            award
                .iter()
                .flat_map(|a| party.iter().map(move |p| partial_ratio(a, p)))
                .filter(|score| *score > self.threshold)
                .sum()
        };
        (side(plaintiff), side(defendant))
    }
}

/// Upper-cased, whitespace-split, comma-stripped words.
fn words(text: &str) -> Vec<String> {
    text.to_uppercase()
        .split_whitespace()
        .map(|word| word.trim_matches(','))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Partial-ratio similarity (0-100): the shorter string is compared against
/// windows of the longer one that start where a matching block lines up, and
/// each window scores `2 * matches / total_len`. Either side empty scores 0.
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }
    let mut best = 0.0_f64;
    for (i, j, _) in matching_blocks(&short, &long) {
        let start = j.saturating_sub(i);
        let end = (start + short.len()).min(long.len());
        let score = ratio(&short, &long[start..end]);
        if score > 0.995 {
            return 100;
        }
        best = best.max(score);
    }
    (best * 100.0).round_ties_even() as u32
}

/// `2 * matches / total_len`, where matches is the size of all matching blocks.
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches: usize = matching_blocks(a, b).iter().map(|&(_, _, size)| size).sum();
    2.0 * matches as f64 / total as f64
}

/// Non-overlapping common runs `(a_start, b_start, size)` in ascending order,
/// found by taking the longest run and recursing on both sides of it. The
/// last entry is always the `(a.len(), b.len(), 0)` sentinel.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<(usize, usize, usize)> {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, (alo, ahi), (blo, bhi));
        if size == 0 {
            continue;
        }
        blocks.push((i, j, size));
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    blocks.sort_unstable();
    blocks.push((a.len(), b.len(), 0));
    blocks
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`. Ties go to the
/// earliest start in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // run[k + 1] is the length of the common run ending at b[blo + k].
    let mut run = vec![0_usize; bhi - blo + 1];
    for i in alo..ahi {
        let mut next = vec![0_usize; run.len()];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let size = run[j - blo] + 1;
            next[j - blo + 1] = size;
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }
        run = next;
    }
    best
}
