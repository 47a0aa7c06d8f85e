use ndarray::ArrayView1;

use crate::catalog::SimilarityMatrix;

/// Sorted positions the wishlist ranker keeps: `[2, 4)`.
///
/// Rank 0 is the seed itself and rank 1 its closest match; only ranks 2 and 3
/// are returned, so wishlist output never exceeds two items.
pub const WISHLIST_SLICE: std::ops::Range<usize> = 2..4;

fn sort_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Positions ordered by score, highest first.
///
/// The sort is stable: equal scores keep their original row order. NaN sorts last.
pub fn descending_order(scores: ArrayView1<'_, f32>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| sort_key(scores[b]).total_cmp(&sort_key(scores[a])));
    order
}

/// Ranks candidates for a set of seed rows.
///
/// Scores are summed across `seed_rows`, candidates are the matrix columns
/// (named by `column_ids`), and any candidate whose ID is in `seed_ids` is
/// skipped. Returns at most `n` IDs.
pub fn rank(
    matrix: &SimilarityMatrix,
    seed_rows: &[usize],
    column_ids: &[i64],
    seed_ids: &[i64],
    n: usize,
) -> Vec<i64> {
    if seed_rows.is_empty() || n == 0 {
        return Vec::new();
    }

    let scores = matrix.aggregate(seed_rows);
    descending_order(scores.view())
        .into_iter()
        .filter_map(|col| column_ids.get(col).copied())
        .filter(|id| !seed_ids.contains(id))
        .take(n)
        .collect()
}

/// Feature-similarity ranking for a single wishlist seed.
///
/// Orders every feature row by its cosine similarity to `seed_row`, keeps the
/// [`WISHLIST_SLICE`] positions, drops the seed if it lands there, and caps at `n`.
pub fn rank_wishlist(
    cosine: &SimilarityMatrix,
    seed_row: usize,
    row_ids: &[i64],
    n: usize,
) -> Vec<i64> {
    let Some(scores) = cosine.column(seed_row) else {
        return Vec::new();
    };

    descending_order(scores)
        .into_iter()
        .skip(WISHLIST_SLICE.start)
        .take(WISHLIST_SLICE.len())
        .filter(|&row| row != seed_row)
        .filter_map(|row| row_ids.get(row).copied())
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn scenario_matrix() -> SimilarityMatrix {
        SimilarityMatrix::from_rows(
            "similarity_matrix",
            vec![vec![1.0, 0.9, 0.2], vec![0.9, 1.0, 0.1], vec![0.2, 0.1, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_rank_single_seed_scenario() {
        let ids = [101, 102, 103];
        let ranked = rank(&scenario_matrix(), &[0], &ids, &[101], 5);
        assert_eq!(ranked, vec![102, 103]);
    }

    #[test]
    fn test_rank_multiple_seeds_sums_rows() {
        let ids = [101, 102, 103];
        // Seeds 102 and 103: column sums are [1.1, 1.1, 1.1]; only 101 remains.
        let ranked = rank(&scenario_matrix(), &[1, 2], &ids, &[102, 103], 5);
        assert_eq!(ranked, vec![101]);
    }

    #[test]
    fn test_rank_respects_n_and_empty_seeds() {
        let ids = [101, 102, 103];
        assert_eq!(rank(&scenario_matrix(), &[0], &ids, &[101], 1), vec![102]);
        assert!(rank(&scenario_matrix(), &[0], &ids, &[101], 0).is_empty());
        assert!(rank(&scenario_matrix(), &[], &ids, &[], 5).is_empty());
    }

    #[test]
    fn test_rank_never_returns_seed_even_when_outscored() {
        // Row 0 scores another column above itself.
        let matrix =
            SimilarityMatrix::from_rows("m", vec![vec![0.5, 0.9], vec![0.9, 0.5]]).unwrap();
        let ranked = rank(&matrix, &[0], &[7, 8], &[7], 10);
        assert_eq!(ranked, vec![8]);
    }

    #[test]
    fn test_descending_order_is_stable_and_puts_nan_last() {
        let scores = array![0.5, f32::NAN, 0.9, 0.5, 0.9];
        assert_eq!(descending_order(scores.view()), vec![2, 4, 0, 3, 1]);
    }

    #[test]
    fn test_rank_wishlist_takes_third_and_fourth() {
        let cosine = SimilarityMatrix::from_rows(
            "cos",
            vec![
                vec![1.0, 0.9, 0.8, 0.7, 0.6],
                vec![0.9, 1.0, 0.5, 0.5, 0.5],
                vec![0.8, 0.5, 1.0, 0.5, 0.5],
                vec![0.7, 0.5, 0.5, 1.0, 0.5],
                vec![0.6, 0.5, 0.5, 0.5, 1.0],
            ],
        )
        .unwrap();
        let ids = [10, 11, 12, 13, 14];

        assert_eq!(rank_wishlist(&cosine, 0, &ids, 5), vec![12, 13]);
        assert_eq!(rank_wishlist(&cosine, 0, &ids, 1), vec![12]);
        assert!(rank_wishlist(&cosine, 9, &ids, 5).is_empty());
    }

    #[test]
    fn test_rank_wishlist_drops_seed_inside_slice() {
        // Rows 0 and 1 tie with the seed (row 2) and sort ahead of it.
        let cosine = SimilarityMatrix::from_rows(
            "cos",
            vec![
                vec![1.0, 1.0, 1.0, 0.2],
                vec![1.0, 1.0, 1.0, 0.2],
                vec![1.0, 1.0, 1.0, 0.3],
                vec![0.2, 0.2, 0.3, 1.0],
            ],
        )
        .unwrap();
        assert_eq!(rank_wishlist(&cosine, 2, &[40, 41, 42, 43], 5), vec![43]);
    }
}
