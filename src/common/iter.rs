// Iterator for placing codeword symbols in the interior of the grid
//------------------------------------------------------------------------------

// Row major over every position off the perimeter
pub struct ScanIter {
    r: usize,
    c: usize,
    rows: usize,
    cols: usize,
}

impl ScanIter {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { r: 1, c: 1, rows, cols }
    }
}

impl Iterator for ScanIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.rows < 3 || self.cols < 3 || self.r >= self.rows - 1 {
            return None;
        }
        let res = (self.r, self.c);
        self.c += 1;
        if self.c == self.cols - 1 {
            self.c = 1;
            self.r += 1;
        }
        Some(res)
    }
}

// Iterator over the perimeter
//------------------------------------------------------------------------------

// Clockwise from the top left corner
pub struct PerimeterIter {
    i: usize,
    rows: usize,
    cols: usize,
}

impl PerimeterIter {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { i: 0, rows, cols }
    }

    const fn len(&self) -> usize {
        if self.rows < 2 || self.cols < 2 {
            return self.rows * self.cols;
        }
        2 * (self.rows + self.cols) - 4
    }
}

impl Iterator for PerimeterIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.len() {
            return None;
        }
        let (h, w, i) = (self.rows, self.cols, self.i);
        let res = if h == 1 {
            (0, i)
        } else if w == 1 {
            (i, 0)
        } else if i < w {
            (0, i)
        } else if i < w + h - 1 {
            (i + 1 - w, w - 1)
        } else if i < 2 * w + h - 2 {
            (h - 1, 2 * w + h - 3 - i)
        } else {
            (2 * w + 2 * h - 4 - i, 0)
        };
        self.i += 1;
        Some(res)
    }
}
