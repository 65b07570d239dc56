use ndarray::Array2;

/// Coordinates of every cell of a map that matched some predicate, stored as
/// parallel row / column vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSet {
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl CellSet {
    pub fn new(rows: Vec<usize>, cols: Vec<usize>) -> Self {
        assert_eq!(rows.len(), cols.len(), "row and column counts differ");
        Self { rows, cols }
    }

    pub fn matching<F: Fn(u8) -> bool>(map: &Array2<u8>, predicate: F) -> Self {
        let mut rows: Vec<usize> = vec![];
        let mut cols: Vec<usize> = vec![];
        for ((row, col), value) in map.indexed_iter() {
            if predicate(*value) {
                rows.push(row);
                cols.push(col);
            }
        }
        Self { rows, cols }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<(usize, usize)> {
        Some((*self.rows.get(i)?, *self.cols.get(i)?))
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Mean `(row, col)`; `None` when the set is empty.
    pub fn mean(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let n: f64 = self.len() as f64;
        let row: f64 = self.rows.iter().sum::<usize>() as f64 / n;
        let col: f64 = self.cols.iter().sum::<usize>() as f64 / n;
        Some((row, col))
    }

    /// Largest row and largest column, taken independently.
    pub fn max(&self) -> Option<(usize, usize)> {
        Some((*self.rows.iter().max()?, *self.cols.iter().max()?))
    }

    /// Inclusive `((min_row, min_col), (max_row, max_col))`.
    pub fn bounding_box(&self) -> Option<((usize, usize), (usize, usize))> {
        let min: (usize, usize) = (*self.rows.iter().min()?, *self.cols.iter().min()?);
        Some((min, self.max()?))
    }

    pub fn box_contains(&self, row: f64, col: f64) -> bool {
        match self.bounding_box() {
            Some(((min_row, min_col), (max_row, max_col))) => {
                min_row as f64 <= row
                    && row <= max_row as f64
                    && min_col as f64 <= col
                    && col <= max_col as f64
            }
            None => false,
        }
    }
}
