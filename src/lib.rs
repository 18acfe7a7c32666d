//! # hccb
//!
//! A Rust library for encoding byte payloads into High Capacity Color Barcode (HCCB)
//! symbols: rectangular grids of colored triangles protected by Reed-Solomon error
//! correction.
//!
//! ## Features
//!
//! - **Symbol Generation**: Pack a payload, add error correction and lay it out as a grid of
//!   triangles
//! - **Grid Reading**: Recover the payload from classified colors, correcting damaged glyphs
//! - **Reed-Solomon Error Correction**: Shortened codes over GF(2^m) that tolerate bursts of
//!   damaged glyphs
//! - **Fixed Sizes**: Eight size configurations, picked automatically by payload length
//!
//! ## Quick Start
//!
//! ### Simple Symbol Generation
//!
//! ```rust
//! use hccb::HccbBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Smallest size that fits the payload is chosen automatically
//! let grid = HccbBuilder::new(b"Hello, World!").build()?;
//!
//! for t in grid.triangles() {
//!     // One polygon per triangle for the renderer
//!     let _ = (t.row(), t.col(), t.color().hex(), t.orientation());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use hccb::{HccbBuilder, Palette, SizeConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = HccbBuilder::new(b"Hello, World!")
//!     .palette(Palette::Eight)            // Restricts automatic selection to 8 color sizes
//!     .size(*SizeConfig::by_id(6)?)       // Explicit size - takes precedence over the palette
//!     .build()?;
//!
//! assert_eq!(grid.rows() * grid.cols(), grid.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a Grid
//!
//! ```rust
//! use hccb::{reader, HccbBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = HccbBuilder::new(b"Hello").build()?;
//!
//! // Colors as sampled from the symbol, row by row
//! let colors = grid.colors();
//! let (payload, corrected) = reader::read_colors(grid.config(), &colors)?;
//! assert_eq!(payload, b"Hello");
//! assert_eq!(corrected, 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Symbol Components
//!
//! ### Palettes
//! - **Four**: Black, yellow, green and red, 2 bits per glyph
//! - **Eight**: Adds white, cyan, pink and blue, 3 bits per glyph
//!
//! ### Layout
//! - The perimeter carries alternating grey and orange sync glyphs
//! - The interior carries the codeword row by row, data first then error correction
//! - Triangles point up where row + column is even, down otherwise

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod reader;

pub use builder::{Cell, Grid, HccbBuilder, Triangle};
pub use common::bitstream::Packer;
pub use common::ec::{
    GaloisField, ReedSolomon, SymbolCodec, GF16, GF256, GF4, GF512, GF64, GF8,
};
pub use common::error::{HccbError, HccbResult};
pub use common::metadata::{Color, Glyph, Orientation, Palette, SyncMark};
pub use common::size::{SizeConfig, SIZE_CONFIGS};

/// Encodes a payload into the smallest size that fits it.
pub fn encode(data: &[u8]) -> HccbResult<Grid> {
    HccbBuilder::new(data).build()
}
