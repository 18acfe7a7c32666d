use log::{debug, info};

use crate::{
    builder::Grid,
    common::{error::HccbResult, metadata::Color, size::SizeConfig},
};

// Reads the payload of a laid out grid, returning it together with the number of
// glyphs the error correction had to fix
pub fn read(grid: &Grid) -> HccbResult<(Vec<u8>, usize)> {
    let config = grid.config();
    info!("Reading HCCB {}...", grid.metadata());

    debug!("Extracting codeword...");
    let codeword = grid.codeword();

    debug!("Rectifying codeword...");
    let (data, corrected) = config.codec()?.decode(&codeword)?;
    if corrected > 0 {
        debug!("Corrected {corrected} glyphs");
    }

    debug!("Unpacking payload...");
    let payload = config.packer().unpack(&data)?;

    info!("HCCB read successfully");
    Ok((payload, corrected))
}

// Row major colors, as a sampler would classify them
pub fn read_colors(config: &SizeConfig, colors: &[Color]) -> HccbResult<(Vec<u8>, usize)> {
    debug!("Verifying sync perimeter...");
    let grid = Grid::from_colors(config, colors)?;
    read(&grid)
}

// Row major samples, snapped to the nearest palette or sync color
pub fn read_rgb(config: &SizeConfig, samples: &[[u8; 3]]) -> HccbResult<(Vec<u8>, usize)> {
    debug!("Classifying {} samples...", samples.len());
    let colors = samples.iter().map(|&s| config.palette.classify(s)).collect::<Vec<_>>();
    read_colors(config, &colors)
}
