// ============================================================
// Layer 4 - Fuzzy Sentence Matching
// ============================================================
// Finds the source sentence that looks most like a question,
// so a card whose answer went missing can borrow it.
//
// Similarity is the Ratcliff/Obershelp "gestalt" ratio:
//   1. Find the longest common run of characters
//   2. Recurse on the pieces left and right of it
//   3. ratio = 2 * matched_chars / (len(a) + len(b))
//
// 1.0 means identical, 0.0 means nothing in common. The
// comparison is case-sensitive and works on chars, not bytes,
// so accented text never splits a code point.
//
// Reference: Ratcliff & Metzener (1988) Pattern Matching:
//            The Gestalt Approach

/// Similarity ratio between two strings in [0.0, 1.0].
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Return the candidate with the highest ratio to `query`,
/// provided it reaches `cutoff`. Ties go to the earliest
/// candidate.
pub fn best_match<'a, S: AsRef<str>>(
    query:      &str,
    candidates: &'a [S],
    cutoff:     f64,
) -> Option<&'a str> {
    let mut best: Option<(f64, &'a str)> = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score     = ratio(query, candidate);

        if score < cutoff {
            continue;
        }
        // Strictly greater keeps the first of equal scores
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, s)| s)
}

/// Total characters matched by recursive longest-block search
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }

    len + matching_chars(&a[..i], &b[..j])
        + matching_chars(&a[i + len..], &b[j + len..])
}

/// Longest common substring as (start_in_a, start_in_b, len).
/// Prefers the block starting earliest in `a`, then in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // prev[j + 1] = length of the common run ending at a[i - 1], b[j]
    let mut prev = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                row[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = row;
    }

    best
}
