//! Linear-scan similarity ranking
//!
//! Scores are raw inner products. They equal cosine similarity only when
//! the embedding provider emits unit vectors; nothing here normalises.

use std::cmp::Ordering;

/// Inner product of two vectors. Mismatched lengths score over the
/// shorter prefix.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Score `query` against every row of `matrix` and return the best `k`
/// as `(index, score)`, highest score first.
///
/// Equal scores keep index order. `k` larger than the matrix returns every
/// row; an empty matrix returns nothing. NaN scores sort last.
pub fn rank(query: &[f32], matrix: &[Vec<f32>], k: usize) -> Vec<(usize, f32)> {
    if k == 0 || matrix.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f32)> = matrix
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx, dot_product(query, row)))
        .collect();

    // sort_by is stable, so ties stay in index order
    scored.sort_by(|a, b| descending(a.1, b.1));
    scored.truncate(k);
    scored
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_orders_by_descending_score() {
        let matrix = vec![vec![0.1, 0.0], vec![0.9, 0.0], vec![0.5, 0.0]];
        let ranked = rank(&[1.0, 0.0], &matrix, 3);
        let indices: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_index_order() {
        let matrix = vec![vec![1.0], vec![2.0], vec![1.0], vec![2.0]];
        let ranked = rank(&[1.0], &matrix, 4);
        let indices: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_k_larger_than_store_returns_all() {
        let matrix = vec![vec![1.0], vec![2.0]];
        assert_eq!(rank(&[1.0], &matrix, 10).len(), 2);
    }

    #[test]
    fn test_empty_store_and_zero_k() {
        assert!(rank(&[1.0], &[], 5).is_empty());
        assert!(rank(&[1.0], &[vec![1.0]], 0).is_empty());
    }

    #[test]
    fn test_raw_inner_product_not_cosine() {
        let matrix = vec![vec![3.0, 4.0]];
        let ranked = rank(&[1.0, 1.0], &matrix, 1);
        assert_eq!(ranked[0].1, 7.0);
    }

    #[test]
    fn test_nan_sorts_last() {
        let matrix = vec![vec![f32::NAN], vec![1.0]];
        let ranked = rank(&[1.0], &matrix, 2);
        assert_eq!(ranked[0].0, 1);
        assert_eq!(ranked[1].0, 0);
    }

    proptest! {
        #[test]
        fn prop_length_order_and_tiebreak(
            rows in prop::collection::vec(prop::collection::vec(-4i8..4, 3), 0..40),
            query in prop::collection::vec(-4i8..4, 3),
            k in 0usize..50,
        ) {
            // small integers keep dot products exact, so ties are real ties
            let matrix: Vec<Vec<f32>> = rows
                .iter()
                .map(|r| r.iter().map(|x| *x as f32).collect())
                .collect();
            let q: Vec<f32> = query.iter().map(|x| *x as f32).collect();

            let ranked = rank(&q, &matrix, k);
            prop_assert_eq!(ranked.len(), k.min(matrix.len()));

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].1 >= pair[1].1);
                if pair[0].1 == pair[1].1 {
                    prop_assert!(pair[0].0 < pair[1].0);
                }
            }

            // nothing left out scores higher than the last kept entry
            if let Some(&(_, last)) = ranked.last() {
                let kept: std::collections::HashSet<usize> =
                    ranked.iter().map(|(i, _)| *i).collect();
                for (idx, row) in matrix.iter().enumerate() {
                    if !kept.contains(&idx) {
                        prop_assert!(dot_product(&q, row) <= last);
                    }
                }
            }
        }
    }
}
