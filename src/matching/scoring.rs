//! String similarity for fuzzy port-name matching.
//!
//! Uses Ratcliff/Obershelp "gestalt" matching: find the longest common
//! contiguous block, then recurse into the unmatched text on either side of
//! it. The ratio is `2 * matched / (len(a) + len(b))`.
//!
//! When several blocks share the maximal length, the one starting earliest in
//! `a` is taken, then the one starting earliest in `b`. Lengths are counted in
//! characters, not bytes.

/// Default score floor when the query appears verbatim inside a candidate name
pub const DEFAULT_CONTAINMENT_FLOOR: f64 = 0.85;

/// Safely convert usize to f64 for ratio calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Ratcliff/Obershelp similarity of two strings, in `[0, 1]`.
///
/// Two empty strings are identical (1.0).
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * count_to_f64(matched_characters(&a, &b)) / count_to_f64(total)
}

/// Similarity of a query to a candidate name, both expected in uppercase.
///
/// A query found verbatim inside the candidate scores at least
/// `containment_floor`, so abbreviated names ("ROTT" for "ROTTERDAM") are not
/// penalised for the missing tail. The floor is one-directional.
#[must_use]
pub fn similarity(query: &str, candidate: &str, containment_floor: f64) -> f64 {
    let ratio = sequence_ratio(query, candidate);
    if candidate.contains(query) {
        ratio.max(containment_floor)
    } else {
        ratio
    }
}

/// Total length of all matching blocks between `a` and `b`
fn matched_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;

        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// Only a strictly longer block replaces the current best, which yields the
/// earliest block in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);

    // curr[col]: length of the common block ending at a[i], b[blo + col - 1]
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[col - 1] + 1;
                curr[col] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            } else {
                curr[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_and_disjoint() {
        assert!(close(sequence_ratio("SINGAPORE", "SINGAPORE"), 1.0));
        assert!(close(sequence_ratio("ABC", "XYZ"), 0.0));
        assert!(close(sequence_ratio("", ""), 1.0));
        assert!(close(sequence_ratio("ABC", ""), 0.0));
    }

    #[test]
    fn test_block_matching() {
        // "BCD" matches, the leftover "A"s sit on opposite sides
        assert!(close(sequence_ratio("ABCD", "BCDA"), 0.75));
        // "SINGAP" + "R" + "E" = 8 of 18 characters on each side
        assert!(close(sequence_ratio("SINGAPROE", "SINGAPORE"), 16.0 / 18.0));
    }

    #[test]
    fn test_longest_match_prefers_earliest_block() {
        let a: Vec<char> = "ABXAB".chars().collect();
        let b: Vec<char> = "AB".chars().collect();
        assert_eq!(longest_match(&a, &b, 0, a.len(), 0, b.len()), (0, 0, 2));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(close(sequence_ratio("SÃO", "SAO"), 4.0 / 6.0));
    }

    #[test]
    fn test_containment_floor() {
        let raw = sequence_ratio("ROTT", "ROTTERDAM");
        assert!(raw < DEFAULT_CONTAINMENT_FLOOR);
        assert!(close(
            similarity("ROTT", "ROTTERDAM", DEFAULT_CONTAINMENT_FLOOR),
            DEFAULT_CONTAINMENT_FLOOR
        ));

        // Only the query-inside-candidate direction is rewarded
        assert!(close(
            similarity("ROTTERDAM", "ROTT", DEFAULT_CONTAINMENT_FLOOR),
            raw
        ));
    }

    #[test]
    fn test_floor_never_lowers_a_score() {
        assert!(close(
            similarity("SINGAPORE", "SINGAPORE", DEFAULT_CONTAINMENT_FLOOR),
            1.0
        ));
    }

    #[test]
    fn test_transposed_letters() {
        let forward = sequence_ratio("SHNAGHAI", "SHANGHAI");
        assert!(forward >= 0.80);
        assert!(close(forward, 14.0 / 16.0));
    }
}
