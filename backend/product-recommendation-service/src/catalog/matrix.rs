use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::CatalogError;

/// Precomputed pairwise similarity scores.
///
/// Rows are seeds, columns are candidates. For the cart matrix both axes follow
/// the catalog row order; for a similar-items partition the row is addressed by
/// product ID and the columns follow the partition table.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    name: String,
    scores: Array2<f32>,
}

impl SimilarityMatrix {
    pub fn new(name: impl Into<String>, scores: Array2<f32>) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }

    /// Builds a matrix from row vectors, rejecting ragged input.
    pub fn from_rows(
        name: impl Into<String>,
        rows: Vec<Vec<f32>>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);

        let mut flat = Vec::with_capacity(nrows * ncols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != ncols {
                return Err(CatalogError::RaggedMatrix {
                    name,
                    row,
                    expected: ncols,
                    actual: values.len(),
                });
            }
            flat.extend(values);
        }

        let scores = Array2::from_shape_vec((nrows, ncols), flat).map_err(|e| {
            CatalogError::ShapeMismatch {
                name: name.clone(),
                detail: e.to_string(),
            }
        })?;

        Ok(Self { name, scores })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nrows(&self) -> usize {
        self.scores.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.scores.ncols()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.nrows()).then(|| self.scores.row(index))
    }

    pub fn column(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.ncols()).then(|| self.scores.column(index))
    }

    /// Element-wise sum of the given rows. Out-of-range rows are ignored.
    pub fn aggregate(&self, seed_rows: &[usize]) -> Array1<f32> {
        let mut total = Array1::<f32>::zeros(self.ncols());
        for &seed in seed_rows {
            if let Some(row) = self.row(seed) {
                total += &row;
            }
        }
        total
    }

    /// Cosine similarity between every pair of rows of `features`.
    ///
    /// Rows with zero norm score 0 against everything, themselves included.
    pub fn cosine(name: impl Into<String>, features: &Array2<f32>) -> Self {
        let norms = features.map_axis(Axis(1), |row| row.dot(&row).sqrt());

        let mut normalized = features.clone();
        for (mut row, norm) in normalized.outer_iter_mut().zip(norms.iter()) {
            if *norm > 0.0 {
                row /= *norm;
            } else {
                row.fill(0.0);
            }
        }

        let scores = normalized.dot(&normalized.t());
        Self::new(name, scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = SimilarityMatrix::from_rows("m", vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(
            result,
            Err(CatalogError::RaggedMatrix { row: 1, expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_aggregate_sums_seed_rows() {
        let matrix = SimilarityMatrix::from_rows(
            "m",
            vec![vec![1.0, 0.9, 0.2], vec![0.9, 1.0, 0.1], vec![0.2, 0.1, 1.0]],
        )
        .unwrap();

        assert_eq!(matrix.aggregate(&[0]), array![1.0, 0.9, 0.2]);
        let both = matrix.aggregate(&[0, 2]);
        assert!((both[0] - 1.2).abs() < 1e-6);
        assert!((both[1] - 1.0).abs() < 1e-6);
        assert!((both[2] - 1.2).abs() < 1e-6);
        assert_eq!(matrix.aggregate(&[]), array![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cosine_handles_zero_rows() {
        let features = array![
            [1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0]
        ];
        let cosine = SimilarityMatrix::cosine("cos", &features);

        let first = cosine.row(0).unwrap();
        assert!(cosine.is_square());
        assert!((first[0] - 1.0).abs() < 1e-6);
        assert!((first[1] - 1.0).abs() < 1e-6);
        assert!((first[2] - 0.5).abs() < 1e-6);
        assert_eq!(first[3], 0.0);
        assert_eq!(cosine.row(3).unwrap()[3], 0.0);
    }
}
