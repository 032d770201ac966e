/// Read-only row-major view over a slice of the parameter buffer.
///
/// The network keeps both weight matrices in one `Vec`; these views give them
/// matrix-shaped access without copying or aliasing mutable pointers.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    pub rows: usize,
    pub cols: usize,
    data: &'a [T],
}

impl<'a, T: Copy> MatrixView<'a, T> {
    /// Wraps `data` as a `rows x cols` matrix.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "Matrix view has incorrect size");
        MatrixView { rows, cols, data }
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &'a [T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }
}

/// Mutable counterpart of `MatrixView`.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    pub rows: usize,
    pub cols: usize,
    data: &'a mut [T],
}

impl<'a, T: Copy> MatrixViewMut<'a, T> {
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn new(data: &'a mut [T], rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "Matrix view has incorrect size");
        MatrixViewMut { rows, cols, data }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.cols + col]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let cols = self.cols;
        &mut self.data[row * cols..(row + 1) * cols]
    }
}

/// Dot product of two equal-length slices, accumulated left to right.
pub fn dot<T: num_traits::Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |sum, (&x, &y)| sum + x * y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_indexes_row_major() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = MatrixView::new(&data, 2, 3);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn mutable_view_writes_through() {
        let mut data = [0.0f32; 4];
        {
            let mut m = MatrixViewMut::new(&mut data, 2, 2);
            *m.get_mut(1, 0) = 7.0;
            m.row_mut(0)[1] = 3.0;
        }
        assert_eq!(data, [0.0, 3.0, 7.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "incorrect size")]
    fn view_rejects_wrong_length() {
        let data = [1.0, 2.0, 3.0];
        MatrixView::new(&data, 2, 2);
    }

    #[test]
    fn dot_accumulates_in_order() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    }
}
