mod block;
mod decoder;
mod galois;

pub(crate) use block::*;
pub use galois::*;

use crate::common::{
    bitstream::regroup,
    error::{HccbError, HccbResult},
};

// Reed-Solomon codec over GF(2^m)
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReedSolomon {
    gf: &'static GaloisField,
    n: usize,
    k: usize,
    // Generator polynomial, highest degree first
    gen_poly: Vec<u16>,
}

impl ReedSolomon {
    pub fn new(gf: &'static GaloisField, n: usize, k: usize) -> HccbResult<Self> {
        if k == 0 || k >= n || n > gf.order() {
            return Err(HccbError::InvalidCodeParameters { n, k });
        }
        let gen_poly = generator_polynomial(gf, n - k);
        Ok(Self { gf, n, k, gen_poly })
    }

    pub fn field(&self) -> &'static GaloisField {
        self.gf
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn ec_len(&self) -> usize {
        self.n - self.k
    }

    pub fn error_capacity(&self) -> usize {
        self.ec_len() / 2
    }

    // Performs polynomial long division with data polynomial(num)
    // and generator polynomial(den) to compute remainder polynomial,
    // the coefficients of which are the ecc
    pub fn encode(&self, data: &[u16]) -> HccbResult<Vec<u16>> {
        self.check(data, self.k)?;

        let mut res = data.to_vec();
        res.resize(self.n, 0);

        for i in 0..self.k {
            let lead_coeff = res[i];
            if lead_coeff == 0 {
                continue;
            }
            for (u, &v) in res[i + 1..].iter_mut().zip(self.gen_poly[1..].iter()) {
                *u = self.gf.add(*u, self.gf.mul(v, lead_coeff));
            }
        }

        res[..self.k].copy_from_slice(data);
        Ok(res)
    }

    // Returns the corrected codeword along with the number of corrected symbols
    pub fn correct(&self, received: &[u16]) -> HccbResult<(Vec<u16>, usize)> {
        self.check(received, self.n)?;

        let mut blk = Block::with_encoded(self.gf, received, self.k);
        let corrected = blk.rectify()?;
        debug_assert!(corrected <= self.error_capacity(), "Corrected beyond capacity: {corrected}");
        Ok((blk.full().to_vec(), corrected))
    }

    pub fn decode(&self, received: &[u16]) -> HccbResult<(Vec<u16>, usize)> {
        let (mut codeword, corrected) = self.correct(received)?;
        codeword.truncate(self.k);
        Ok((codeword, corrected))
    }

    fn check(&self, symbols: &[u16], expected: usize) -> HccbResult<()> {
        if symbols.len() != expected {
            return Err(HccbError::InvalidLength { expected, got: symbols.len() });
        }
        match symbols.iter().find(|&&s| !self.gf.contains(s)) {
            Some(&s) => Err(HccbError::InvalidSymbol(s)),
            None => Ok(()),
        }
    }
}

// Product of (x - α^i) for i in 0..ec_len, highest degree first
pub fn generator_polynomial(gf: &GaloisField, ec_len: usize) -> Vec<u16> {
    let mut poly = Vec::with_capacity(ec_len + 1);
    poly.push(1);
    for i in 0..ec_len {
        let root = gf.gen_pow(i);
        poly.push(0);
        for j in (1..poly.len()).rev() {
            poly[j] = gf.add(poly[j], gf.mul(poly[j - 1], root));
        }
    }
    poly
}


// Glyph-level codec
//------------------------------------------------------------------------------

// Wraps a shortened Reed-Solomon code whose field elements each carry a fixed
// number of consecutive glyph symbols, most significant first.
#[derive(Debug, Clone)]
pub struct SymbolCodec {
    rs: ReedSolomon,
    sym_bits: usize,
    // Most field elements a decode may change
    max_errors: usize,
}

impl SymbolCodec {
    // n and k are counted in glyph symbols
    pub fn new(gf: &'static GaloisField, sym_bits: usize, n: usize, k: usize) -> HccbResult<Self> {
        let field_bits = gf.bits() as usize;
        if sym_bits == 0 || field_bits % sym_bits != 0 {
            return Err(HccbError::UnsupportedField(gf.bits()));
        }
        let group = field_bits / sym_bits;
        if n % group != 0 || k % group != 0 {
            return Err(HccbError::InvalidCodeParameters { n, k });
        }
        let rs = ReedSolomon::new(gf, n / group, k / group)
            .map_err(|_| HccbError::InvalidCodeParameters { n, k })?;
        let max_errors = rs.error_capacity();
        Ok(Self { rs, sym_bits, max_errors })
    }

    // Lowers the correction radius. Received words needing more element fixes
    // are rejected, which keeps detection sound for anything touching up to
    // ec_len - max_errors elements.
    pub fn with_error_capacity(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors.min(self.rs.error_capacity());
        self
    }

    // Correctable field elements
    pub fn error_capacity(&self) -> usize {
        self.max_errors
    }

    pub fn reed_solomon(&self) -> &ReedSolomon {
        &self.rs
    }

    // Glyph symbols per field element
    pub fn group(&self) -> usize {
        self.rs.field().bits() as usize / self.sym_bits
    }

    pub fn n(&self) -> usize {
        self.rs.n() * self.group()
    }

    pub fn k(&self) -> usize {
        self.rs.k() * self.group()
    }

    pub fn encode(&self, data: &[u8]) -> HccbResult<Vec<u8>> {
        self.check(data, self.k())?;

        let elements = self.to_elements(data);
        let codeword = self.rs.encode(&elements)?;
        Ok(self.to_symbols(&codeword))
    }

    // Returns the data symbols along with the number of glyph symbols corrected
    pub fn decode(&self, received: &[u8]) -> HccbResult<(Vec<u8>, usize)> {
        self.check(received, self.n())?;

        let elements = self.to_elements(received);
        let (codeword, fixed) = self.rs.correct(&elements)?;
        if fixed > self.max_errors {
            return Err(HccbError::UncorrectableError);
        }
        let mut symbols = self.to_symbols(&codeword);
        let corrected = symbols.iter().zip(received).filter(|(a, b)| a != b).count();
        symbols.truncate(self.k());
        Ok((symbols, corrected))
    }

    fn check(&self, symbols: &[u8], expected: usize) -> HccbResult<()> {
        if symbols.len() != expected {
            return Err(HccbError::InvalidLength { expected, got: symbols.len() });
        }
        match symbols.iter().find(|&&s| (s as usize) >> self.sym_bits != 0) {
            Some(&s) => Err(HccbError::InvalidSymbol(s as u16)),
            None => Ok(()),
        }
    }

    fn to_elements(&self, symbols: &[u8]) -> Vec<u16> {
        let symbols = symbols.iter().map(|&s| s as u16).collect::<Vec<_>>();
        regroup(&symbols, self.sym_bits, self.rs.field().bits() as usize)
    }

    fn to_symbols(&self, elements: &[u16]) -> Vec<u8> {
        regroup(elements, self.rs.field().bits() as usize, self.sym_bits)
            .into_iter()
            .map(|s| s as u8)
            .collect()
    }
}
