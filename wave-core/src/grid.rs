use std::ops::{Index, IndexMut};

/// Square N×N grid of heights stored flat in row-major order.
///
/// The shape is fixed when the grid is created; nothing on this type can
/// grow or shrink the buffer, so every grid owned by a field keeps the same
/// dimensions for its whole life.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    n: usize,
    cells: Vec<f64>,
}

impl Grid {
    pub fn zeros(n: usize) -> Grid {
        Grid {
            n,
            cells: vec![0.0; n * n],
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.n || j >= self.n {
            return None;
        }
        Some(self.cells[i * self.n + j])
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n;
        &self.cells[start..start + self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks_exact(self.n.max(1))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().copied()
    }

    /// Largest absolute height, 0 for an all-zero grid.
    pub fn max_abs(&self) -> f64 {
        self.cells.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()))
    }

    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.n && j < self.n,
            "cell ({i}, {j}) outside {n}x{n} grid",
            n = self.n
        );
        i * self.n + j
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.cells[self.offset(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let idx = self.offset(i, j);
        &mut self.cells[idx]
    }
}
