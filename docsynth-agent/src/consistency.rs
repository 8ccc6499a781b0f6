/// Generated candidates in temperature order. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateSet(Vec<String>);

impl CandidateSet {
    /// Returns `None` for an empty list.
    pub fn new(candidates: Vec<String>) -> Option<Self> {
        if candidates.is_empty() {
            None
        } else {
            Some(Self(candidates))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConsistencyReport {
    pub selected: String,
    pub selected_index: usize,
    pub mean_pairwise_similarity: f64,
    pub similarity_stddev: f64,
    pub all_candidates: CandidateSet,
}

/// Similarity of two strings as `2 * LCS / (len(a) + len(b))` over chars.
///
/// Two empty strings are identical (`1.0`).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };
    let mut prev = vec![0u32; short.len() + 1];
    let mut curr = vec![0u32; short.len() + 1];
    for lc in long.iter() {
        for (j, sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    let lcs = prev[short.len()] as f64;

    2.0 * lcs / total as f64
}

/// Picks the candidate that agrees most with its peers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsistencyEvaluator;

impl ConsistencyEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, candidates: CandidateSet) -> ConsistencyReport {
        let texts = candidates.as_slice();
        let n = texts.len();

        let mut matrix = vec![vec![1.0f64; n]; n];
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let score = similarity(&texts[i], &texts[j]);
                matrix[i][j] = score;
                matrix[j][i] = score;
                pairs.push(score);
            }
        }

        let mut selected_index = 0;
        let mut best = f64::NEG_INFINITY;
        for (i, row) in matrix.iter().enumerate() {
            let score = if n > 1 {
                row.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, s)| s)
                    .sum::<f64>()
                    / (n - 1) as f64
            } else {
                0.0
            };
            // strict comparison keeps the lowest index on ties
            if score > best {
                best = score;
                selected_index = i;
            }
        }

        let (mean, stddev) = mean_and_stddev(&pairs);
        tracing::debug!(
            candidates = n,
            selected_index,
            mean_similarity = mean,
            "consistency evaluation finished"
        );

        ConsistencyReport {
            selected: texts[selected_index].clone(),
            selected_index,
            mean_pairwise_similarity: mean,
            similarity_stddev: stddev,
            all_candidates: candidates,
        }
    }
}

fn mean_and_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::{mean_and_stddev, similarity};

    #[test]
    fn similarity_of_disjoint_strings_is_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn similarity_against_empty_is_zero() {
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn similarity_counts_common_subsequence() {
        // LCS("abcd", "abxd") = 3
        assert!((similarity("abcd", "abxd") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn stddev_uses_sample_variance() {
        let (mean, stddev) = mean_and_stddev(&[1.0, 3.0]);
        assert_eq!(mean, 2.0);
        assert!((stddev - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_pair_has_zero_stddev() {
        assert_eq!(mean_and_stddev(&[0.4]), (0.4, 0.0));
    }
}
