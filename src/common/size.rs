use crate::common::{
    bitstream::Packer,
    ec::{GaloisField, SymbolCodec},
    error::{HccbError, HccbResult},
    metadata::Palette,
};

// Size configuration
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct SizeConfig {
    pub id: u8,
    pub rows: usize,
    pub cols: usize,
    // Total codeword symbols
    pub n: usize,
    // Data symbols
    pub k: usize,
    pub palette: Palette,
    // Field the error correction runs over
    pub field_bits: u8,
    // Width of the embedded payload length
    pub len_bits: usize,
}

impl SizeConfig {
    const fn new(
        id: u8,
        palette: Palette,
        (rows, cols): (usize, usize),
        (n, k): (usize, usize),
        field_bits: u8,
        len_bits: usize,
    ) -> Self {
        Self { id, rows, cols, n, k, palette, field_bits, len_bits }
    }

    pub fn by_id(id: u8) -> HccbResult<&'static Self> {
        SIZE_CONFIGS.iter().find(|c| c.id == id).ok_or(HccbError::UnknownSizeConfiguration)
    }

    // Only entries of the fixed table are accepted, field by field
    pub fn resolve(&self) -> HccbResult<&'static Self> {
        SIZE_CONFIGS.iter().find(|&c| c == self).ok_or(HccbError::UnknownSizeConfiguration)
    }

    pub fn is_supported(&self) -> bool {
        self.resolve().is_ok()
    }

    // Walks the table in increasing capacity and returns the first entry that fits
    pub fn smallest_fit(len: usize, palette: Option<Palette>) -> HccbResult<&'static Self> {
        SIZE_CONFIGS
            .iter()
            .filter(|c| palette.map_or(true, |p| c.palette == p))
            .find(|c| c.fits(len))
            .ok_or(HccbError::NoConfigurationFits { len })
    }
}

// Capacity
//------------------------------------------------------------------------------

impl SizeConfig {
    pub const fn symbol_bits(&self) -> usize {
        self.palette.bits()
    }

    pub const fn capacity_bits(&self) -> usize {
        self.k * self.symbol_bits()
    }

    pub const fn ec_len(&self) -> usize {
        self.n - self.k
    }

    pub const fn packer(&self) -> Packer {
        Packer::new(self.symbol_bits(), self.len_bits, self.k)
    }

    pub fn max_payload_len(&self) -> usize {
        self.packer().max_payload_len()
    }

    pub fn fits(&self, len: usize) -> bool {
        self.packer().fits(len)
    }

    pub fn codec(&self) -> HccbResult<SymbolCodec> {
        let gf = GaloisField::with_bits(self.field_bits)?;
        let codec = SymbolCodec::new(gf, self.symbol_bits(), self.n, self.k)?;
        Ok(codec.with_error_capacity(self.error_capacity()))
    }

    // Glyph symbols per field element
    pub const fn group(&self) -> usize {
        self.field_bits as usize / self.symbol_bits()
    }

    // Correctable field elements per codeword. A code that could fix only one
    // element is used for detection alone: two damaged glyphs in different
    // elements would otherwise decode to a neighbouring codeword.
    pub fn error_capacity(&self) -> usize {
        match self.ec_len() / (2 * self.group()) {
            0 | 1 => 0,
            t => t,
        }
    }

    // Damaged glyphs that are always either corrected or rejected
    pub fn detection_bound(&self) -> usize {
        self.ec_len() / self.group() - self.error_capacity()
    }
}

// Geometry
//------------------------------------------------------------------------------

impl SizeConfig {
    pub const fn triangle_count(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn interior_count(&self) -> usize {
        (self.rows - 2) * (self.cols - 2)
    }

    pub const fn perimeter_count(&self) -> usize {
        self.triangle_count() - self.interior_count()
    }

    pub const fn is_perimeter(&self, r: usize, c: usize) -> bool {
        r == 0 || c == 0 || r == self.rows - 1 || c == self.cols - 1
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static SIZE_CONFIGS: [SizeConfig; 8] = [
    SizeConfig::new(1, Palette::Four, (4, 12), (20, 16), 4, 8),
    SizeConfig::new(2, Palette::Four, (5, 12), (30, 22), 4, 8),
    SizeConfig::new(3, Palette::Four, (6, 22), (80, 64), 8, 8),
    SizeConfig::new(4, Palette::Eight, (8, 20), (108, 88), 6, 8),
    SizeConfig::new(5, Palette::Four, (8, 34), (192, 160), 8, 8),
    SizeConfig::new(6, Palette::Eight, (12, 26), (240, 192), 9, 16),
    SizeConfig::new(7, Palette::Eight, (16, 35), (462, 390), 9, 16),
    SizeConfig::new(8, Palette::Eight, (24, 50), (1056, 864), 9, 16),
];
