mod grid;

pub use grid::{Cell, Grid, Triangle};

use log::{debug, info};

use crate::common::{error::HccbResult, metadata::Palette, size::SizeConfig};

pub struct HccbBuilder<'a> {
    data: &'a [u8],
    size: Option<SizeConfig>,
    palette: Option<Palette>,
}

impl<'a> HccbBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, size: None, palette: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn size(&mut self, size: SizeConfig) -> &mut Self {
        self.size = Some(size);
        self
    }

    pub fn unset_size(&mut self) -> &mut Self {
        self.size = None;
        self
    }

    // Restricts automatic size selection, ignored when a size is set
    pub fn palette(&mut self, palette: Palette) -> &mut Self {
        self.palette = Some(palette);
        self
    }

    pub fn unset_palette(&mut self) -> &mut Self {
        self.palette = None;
        self
    }

    pub fn metadata(&self) -> String {
        match (self.size, self.palette) {
            (Some(s), _) => format!("{{ Size: {}, Palette: {:?} }}", s.id, s.palette),
            (None, Some(p)) => format!("{{ Size: None, Palette: {p:?} }}"),
            (None, None) => "{ Size: None, Palette: None }".to_string(),
        }
    }
}

#[cfg(test)]
mod hccb_builder_util_tests {
    use super::HccbBuilder;
    use crate::common::{metadata::Palette, size::SizeConfig};

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut builder = HccbBuilder::new(data);
        assert_eq!(builder.metadata(), "{ Size: None, Palette: None }");
        builder.palette(Palette::Eight);
        assert_eq!(builder.metadata(), "{ Size: None, Palette: Eight }");
        builder.size(*SizeConfig::by_id(3).unwrap());
        assert_eq!(builder.metadata(), "{ Size: 3, Palette: Four }");
        builder.unset_size().unset_palette();
        assert_eq!(builder.metadata(), "{ Size: None, Palette: None }");
    }
}

impl HccbBuilder<'_> {
    pub fn build(&self) -> HccbResult<Grid> {
        let data_len = self.data.len();

        info!("Generating HCCB {}...", self.metadata());

        let config = match self.size {
            Some(s) => s.resolve()?,
            None => {
                debug!("Finding smallest size...");
                SizeConfig::smallest_fit(data_len, self.palette)?
            }
        };

        debug!("Packing payload into {} data symbols...", config.k);
        let data = config.packer().pack(self.data)?;

        debug!("Computing {} error correction symbols...", config.ec_len());
        let codeword = config.codec()?.encode(&data)?;

        debug!("Laying out grid...");
        let grid = Grid::layout(&codeword, config)?;

        info!("HCCB generated successfully");
        debug!("Report: {}", grid.metadata());
        debug!(
            "Data size: {}, Data capacity: {}, Usage: {}%",
            data_len,
            config.max_payload_len(),
            data_len * 100 / config.max_payload_len()
        );
        debug!(
            "Codeword symbols: {}, Sync symbols: {}, Error capacity: {} elements",
            config.n,
            config.perimeter_count(),
            config.error_capacity()
        );

        Ok(grid)
    }
}
