use std::fmt::{Debug, Formatter};

use crate::common::error::{HccbError, HccbResult};

// Galois field GF(2^m)
//------------------------------------------------------------------------------

pub const MAX_FIELD_SIZE: usize = 512;

// Log/antilog tables for a binary extension field. The exponent table is stored
// twice over so that the sum of two logs never needs a modulo.
pub struct GaloisField {
    bits: u8,
    modulus: u16,
    exp: [u16; 2 * MAX_FIELD_SIZE],
    log: [u16; MAX_FIELD_SIZE],
}

impl GaloisField {
    pub const fn new(bits: u8, modulus: u16) -> Self {
        assert!(bits >= 2 && (1usize << bits) <= MAX_FIELD_SIZE, "Field too large");

        let order = (1usize << bits) - 1;
        let mut exp = [0u16; 2 * MAX_FIELD_SIZE];
        let mut log = [0u16; MAX_FIELD_SIZE];

        let mut x: u16 = 1;
        let mut i = 0;
        while i < order {
            exp[i] = x;
            log[x as usize] = i as u16;
            x <<= 1;
            if x >> bits != 0 {
                x ^= modulus;
            }
            i += 1;
        }
        while i < 2 * order {
            exp[i] = exp[i - order];
            i += 1;
        }

        Self { bits, modulus, exp, log }
    }

    pub fn with_bits(bits: u8) -> HccbResult<&'static Self> {
        match bits {
            2 => Ok(&GF4),
            3 => Ok(&GF8),
            4 => Ok(&GF16),
            6 => Ok(&GF64),
            8 => Ok(&GF256),
            9 => Ok(&GF512),
            _ => Err(HccbError::UnsupportedField(bits)),
        }
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub const fn modulus(&self) -> u16 {
        self.modulus
    }

    pub const fn size(&self) -> usize {
        1 << self.bits
    }

    // Order of the multiplicative group
    pub const fn order(&self) -> usize {
        self.size() - 1
    }

    pub const fn contains(&self, a: u16) -> bool {
        (a as usize) < self.size()
    }
}

impl Debug for GaloisField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GF(2^{})", self.bits)
    }
}

// Arithmetic
//------------------------------------------------------------------------------

impl GaloisField {
    #[inline]
    pub const fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    #[inline]
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        debug_assert!(self.contains(a) && self.contains(b), "Element outside {self:?}: {a}, {b}");

        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
    }

    pub fn inv(&self, a: u16) -> HccbResult<u16> {
        debug_assert!(self.contains(a), "Element outside {self:?}: {a}");

        if a == 0 {
            return Err(HccbError::DivisionByZero);
        }
        Ok(self.exp[self.order() - self.log[a as usize] as usize])
    }

    pub fn div(&self, a: u16, b: u16) -> HccbResult<u16> {
        debug_assert!(self.contains(a) && self.contains(b), "Element outside {self:?}: {a}, {b}");

        if b == 0 {
            return Err(HccbError::DivisionByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        let log_sum = self.log[a as usize] as usize + self.order() - self.log[b as usize] as usize;
        Ok(self.exp[log_sum])
    }

    // α^i, where α = 2 is the primitive element
    #[inline]
    pub fn gen_pow(&self, i: usize) -> u16 {
        self.exp[i % self.order()]
    }

    pub fn log(&self, a: u16) -> Option<usize> {
        match a {
            0 => None,
            _ => Some(self.log[a as usize] as usize),
        }
    }

    pub fn pow(&self, a: u16, e: usize) -> u16 {
        match (a, e) {
            (_, 0) => 1,
            (0, _) => 0,
            _ => self.gen_pow(self.log[a as usize] as usize * e),
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static GF4: GaloisField = GaloisField::new(2, 0b111);
pub static GF8: GaloisField = GaloisField::new(3, 0b1011);
pub static GF16: GaloisField = GaloisField::new(4, 0b1_0011);
pub static GF64: GaloisField = GaloisField::new(6, 0b100_0011);
pub static GF256: GaloisField = GaloisField::new(8, 0b1_0001_1101);
pub static GF512: GaloisField = GaloisField::new(9, 0b10_0001_0001);

#[cfg(test)]
mod galois_tests {
    use test_case::test_case;

    use super::{GaloisField, GF16, GF256, GF4, GF512, GF64, GF8};
    use crate::common::error::HccbError;

    fn fields() -> [&'static GaloisField; 6] {
        [&GF4, &GF8, &GF16, &GF64, &GF256, &GF512]
    }

    #[test]
    fn test_generator_is_primitive() {
        for gf in fields() {
            let mut seen = vec![false; gf.size()];
            for i in 0..gf.order() {
                let x = gf.gen_pow(i) as usize;
                assert!(x != 0 && !seen[x], "{gf:?} repeats α^{i}");
                seen[x] = true;
            }
        }
    }

    #[test_case(&GF16, 4, 0b0011)]
    #[test_case(&GF16, 14, 0b1001)]
    #[test_case(&GF256, 8, 0x1d)]
    #[test_case(&GF256, 25, 0x03)]
    #[test_case(&GF64, 6, 0b000011)]
    #[test_case(&GF512, 9, 0b10001)]
    fn test_gen_pow(gf: &GaloisField, i: usize, exp: u16) {
        assert_eq!(gf.gen_pow(i), exp);
        assert_eq!(gf.log(exp), Some(i));
    }

    #[test]
    fn test_mul_known() {
        assert_eq!(GF256.mul(0x80, 2), 0x1d);
        assert_eq!(GF256.mul(0x53, 0xca), 0x8f);
        assert_eq!(GF16.mul(0b1000, 0b0010), 0b0011);
        assert_eq!(GF4.mul(2, 2), 3);
        assert_eq!(GF4.mul(2, 3), 1);
    }

    #[test]
    fn test_add_is_xor() {
        for gf in fields() {
            for a in 0..gf.size() as u16 {
                assert_eq!(gf.add(a, a), 0);
                assert_eq!(gf.add(a, 0), a);
            }
        }
    }

    #[test]
    fn test_inverse() {
        for gf in fields() {
            for a in 1..gf.size() as u16 {
                let inv = gf.inv(a).unwrap();
                assert_eq!(gf.mul(a, inv), 1, "{gf:?}: {a} * {inv}");
                assert_eq!(gf.div(1, a), Ok(inv));
                assert_eq!(gf.div(a, a), Ok(1));
            }
            assert_eq!(gf.inv(0), Err(HccbError::DivisionByZero));
            assert_eq!(gf.div(1, 0), Err(HccbError::DivisionByZero));
            assert_eq!(gf.div(0, 1), Ok(0));
        }
    }

    #[test]
    fn test_field_axioms_small() {
        for gf in [&GF4, &GF8, &GF16, &GF64] {
            let n = gf.size() as u16;
            for a in 0..n {
                for b in 0..n {
                    let ab = gf.mul(a, b);
                    assert!(gf.contains(ab));
                    assert_eq!(ab, gf.mul(b, a));
                    for c in 0..n {
                        assert_eq!(gf.mul(ab, c), gf.mul(a, gf.mul(b, c)), "{gf:?} assoc");
                        assert_eq!(
                            gf.mul(a, gf.add(b, c)),
                            gf.add(ab, gf.mul(a, c)),
                            "{gf:?} distrib"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_field_axioms_large() {
        for gf in [&GF256, &GF512] {
            let n = gf.size() as u16;
            for a in (0..n).step_by(7) {
                for b in (0..n).step_by(5) {
                    for c in (0..n).step_by(11) {
                        let ab = gf.mul(a, b);
                        assert_eq!(gf.mul(ab, c), gf.mul(a, gf.mul(b, c)), "{gf:?} assoc");
                        assert_eq!(
                            gf.mul(a, gf.add(b, c)),
                            gf.add(ab, gf.mul(a, c)),
                            "{gf:?} distrib"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_pow() {
        for gf in fields() {
            assert_eq!(gf.pow(0, 0), 1);
            assert_eq!(gf.pow(0, 3), 0);
            for a in 1..gf.size() as u16 {
                assert_eq!(gf.pow(a, gf.order()), 1);
                assert_eq!(gf.pow(a, 2), gf.mul(a, a));
            }
        }
    }

    #[test]
    fn test_with_bits() {
        assert_eq!(GaloisField::with_bits(8).unwrap().size(), 256);
        assert_eq!(GaloisField::with_bits(9).unwrap().modulus(), 0x211);
        assert_eq!(GaloisField::with_bits(5).unwrap_err(), HccbError::UnsupportedField(5));
    }
}
