use crate::common::{
    error::{HccbError, HccbResult},
    iter::{PerimeterIter, ScanIter},
    metadata::{Color, Glyph, Orientation, Palette, SyncMark},
    size::SizeConfig,
};

// Triangle
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Cell {
    Sync(SyncMark),
    Data(u8),
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Triangle {
    row: usize,
    col: usize,
    cell: Cell,
    glyph: Glyph,
}

impl Triangle {
    fn new(row: usize, col: usize, cell: Cell, palette: Palette) -> HccbResult<Self> {
        let orientation = Orientation::at(row, col);
        let glyph = match cell {
            Cell::Sync(mark) => mark.glyph(orientation),
            Cell::Data(s) => palette.to_glyph(s, orientation)?,
        };
        Ok(Self { row, col, cell, glyph })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn color(&self) -> Color {
        self.glyph.color
    }

    pub fn orientation(&self) -> Orientation {
        self.glyph.orientation
    }
}

// Grid
//------------------------------------------------------------------------------

// Row major triangles of a symbol, immutable once laid out
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Grid {
    config: &'static SizeConfig,
    triangles: Vec<Triangle>,
}

impl Grid {
    // Perimeter gets the alternating sync marks, the interior takes the
    // codeword in scan order
    pub fn layout(codeword: &[u8], config: &SizeConfig) -> HccbResult<Self> {
        let config = config.resolve()?;
        if codeword.len() != config.n {
            return Err(HccbError::GridOverflow { expected: config.n, got: codeword.len() });
        }

        let cols = config.cols;
        let mut cells = (0..config.triangle_count())
            .map(|i| Cell::Sync(SyncMark::at(i / cols, i % cols)))
            .collect::<Vec<_>>();
        for ((r, c), &s) in ScanIter::new(config.rows, cols).zip(codeword) {
            cells[r * cols + c] = Cell::Data(s);
        }

        Self::from_cells(config, cells)
    }

    // Rebuilds a grid from row major colors, checking the sync perimeter
    pub fn from_colors(config: &SizeConfig, colors: &[Color]) -> HccbResult<Self> {
        let config = config.resolve()?;
        let expected = config.triangle_count();
        if colors.len() != expected {
            return Err(HccbError::InvalidLength { expected, got: colors.len() });
        }

        let cols = config.cols;
        let cells = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let (row, col) = (i / cols, i % cols);
                if config.is_perimeter(row, col) {
                    let mark = SyncMark::at(row, col);
                    match SyncMark::from_color(color) {
                        Some(m) if m == mark => Ok(Cell::Sync(mark)),
                        _ => Err(HccbError::SyncMismatch { row, col }),
                    }
                } else {
                    let glyph = Glyph::new(color, Orientation::at(row, col));
                    config.palette.to_symbol(glyph).map(Cell::Data)
                }
            })
            .collect::<HccbResult<Vec<_>>>()?;

        Self::from_cells(config, cells)
    }

    fn from_cells(config: &'static SizeConfig, cells: Vec<Cell>) -> HccbResult<Self> {
        let cols = config.cols;
        let triangles = cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| Triangle::new(i / cols, i % cols, cell, config.palette))
            .collect::<HccbResult<Vec<_>>>()?;
        Ok(Self { config, triangles })
    }

    pub fn config(&self) -> &'static SizeConfig {
        self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn palette(&self) -> Palette {
        self.config.palette
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn get(&self, r: usize, c: usize) -> Option<&Triangle> {
        if r >= self.rows() || c >= self.cols() {
            return None;
        }
        self.triangles.get(r * self.cols() + c)
    }

    pub fn colors(&self) -> Vec<Color> {
        self.triangles.iter().map(Triangle::color).collect()
    }

    // Clockwise from the top left corner
    pub fn perimeter(&self) -> impl Iterator<Item = &Triangle> + '_ {
        let cols = self.cols();
        PerimeterIter::new(self.rows(), cols).map(move |(r, c)| &self.triangles[r * cols + c])
    }

    // Codeword symbols read back in scan order
    pub fn codeword(&self) -> Vec<u8> {
        ScanIter::new(self.rows(), self.cols())
            .filter_map(|(r, c)| match self.triangles[r * self.cols() + c].cell {
                Cell::Data(s) => Some(s),
                Cell::Sync(_) => None,
            })
            .collect()
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Size: {}, Grid: {}x{}, Palette: {:?} }}",
            self.config.id,
            self.rows(),
            self.cols(),
            self.palette()
        )
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.rows() * (self.cols() + 1) + 1);
        res.push('\n');
        for row in self.triangles.chunks(self.cols()) {
            for t in row {
                let c = match t.cell {
                    Cell::Sync(SyncMark::Primary) => 'g',
                    Cell::Sync(SyncMark::Secondary) => 'o',
                    Cell::Data(s) => char::from(b'0' + s),
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }
}
