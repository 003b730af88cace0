/// Sparse feature vector produced by a vectorizer.
///
/// Entries are sorted by column and hold no duplicates; columns not present
/// are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Builds a vector from unsorted `(column, value)` pairs, summing repeats
    /// and dropping zeros. Columns at or beyond `dim` are discarded.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.retain(|(col, _)| *col < dim);
        pairs.sort_by_key(|(col, _)| *col);

        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (col, value) in pairs {
            match entries.last_mut() {
                Some((last, acc)) if *last == col => *acc += value,
                _ => entries.push((col, value)),
            }
        }
        entries.retain(|(_, v)| *v != 0.0);

        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product with a dense row of the same dimensionality.
    pub fn dot(&self, row: ndarray::ArrayView1<f64>) -> f64 {
        self.entries.iter().map(|(col, v)| row[*col] * v).sum()
    }

    pub(crate) fn scale(&mut self, factor: f64) {
        for (_, v) in self.entries.iter_mut() {
            *v *= factor;
        }
    }

    pub(crate) fn map_values(&mut self, f: impl Fn(usize, f64) -> f64) {
        for (col, v) in self.entries.iter_mut() {
            *v = f(*col, *v);
        }
        self.entries.retain(|(_, v)| *v != 0.0);
    }

    pub(crate) fn l1_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v.abs()).sum()
    }

    pub(crate) fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::FeatureVector;
    use ndarray::array;

    #[test]
    fn test_from_pairs_merges_and_sorts() {
        let v = FeatureVector::from_pairs(5, vec![(3, 1.0), (1, 2.0), (3, 0.5), (9, 4.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.dim(), 5);
    }

    #[test]
    fn test_dot() {
        let v = FeatureVector::from_pairs(3, vec![(0, 2.0), (2, 1.0)]);
        let row = array![1.0, 10.0, 3.0];
        assert_eq!(v.dot(row.view()), 5.0);
    }

    #[test]
    fn test_zero_entries_dropped() {
        let v = FeatureVector::from_pairs(3, vec![(0, 1.0), (0, -1.0)]);
        assert!(v.entries().is_empty());
    }
}
