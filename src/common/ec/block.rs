use super::galois::GaloisField;

// Received codeword held for correction. Coefficients are stored highest
// degree first: data symbols, then error correction symbols.
#[derive(Debug, Clone)]
pub(crate) struct Block {
    pub(super) gf: &'static GaloisField,
    pub(super) data: Vec<u16>,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn with_encoded(gf: &'static GaloisField, encoded: &[u16], dlen: usize) -> Self {
        debug_assert!(dlen <= encoded.len(), "Data length {dlen} exceeds block {}", encoded.len());
        Self { gf, data: encoded.to_vec(), dlen }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn ec_len(&self) -> usize {
        self.len() - self.dlen
    }

    pub fn full(&self) -> &[u16] {
        &self.data
    }

    #[cfg(test)]
    pub fn full_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    #[cfg(test)]
    pub fn data(&self) -> &[u16] {
        &self.data[..self.dlen]
    }

    #[cfg(test)]
    pub fn ecc(&self) -> &[u16] {
        &self.data[self.dlen..]
    }
}
