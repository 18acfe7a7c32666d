use std::fmt::Display;

use num_traits::PrimInt;

use crate::common::error::{HccbError, HccbResult};

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity, cursor: 0 }
    }

    #[cfg(test)]
    pub fn from(inp: &[u8]) -> Self {
        let bit_len = inp.len() << 3;
        Self { data: inp.to_vec(), len: bit_len, capacity: bit_len, cursor: 0 }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = std::mem::size_of::<T>() * 8;
        debug_assert!(size <= 16, "Bits from only u8 and u16 can be pushed: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }

    pub fn extend(&mut self, arr: &[u8]) {
        let arr_bits = arr.len() << 3;
        debug_assert!(
            self.len + arr_bits <= self.capacity,
            "Extension shouldn't overflow capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );

        if self.len & 7 == 0 {
            let pos = self.len >> 3;
            self.data[pos..pos + arr.len()].copy_from_slice(arr);
            self.len += arr_bits;
        } else {
            arr.iter().for_each(|&b| self.push_bits(b, 8));
        }
    }

    // Zero fills the stream up to its capacity
    pub fn pad(&mut self) {
        self.len = self.capacity;
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take_bits(&mut self, n: usize) -> Option<u16> {
        debug_assert!(n <= 16, "Cannot take more than 16 bits: N {n}");

        if self.cursor + n > self.len {
            return None;
        }
        if n == 0 {
            return Some(0);
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;

        let mut res = (self.data[pos] as u32) << 16;
        if offset + n > 8 {
            res |= (self.data[pos + 1] as u32) << 8;
        }
        if offset + n > 16 {
            res |= self.data[pos + 2] as u32;
        }
        res >>= 24 - offset - n;
        res &= (1 << n) - 1;

        self.cursor += n;
        Some(res as u16)
    }
}

#[cfg(test)]
mod bit_stream_take_tests {

    use super::BitStream;

    #[test]
    fn test_take_bits() {
        let data = [
            0b11010010, 0b00110100, 0b10001101, 0b00100011, 0b01001000, 0b11010010, 0b00110100,
            0b10001101, 0b00100011, 0b01001000, 0b11010010, 0b00110100, 0b10001100,
        ];
        let mut bs = BitStream::from(&data);
        let bits = bs.take_bits(0);
        assert_eq!(bits, Some(0));
        let bits = bs.take_bits(4);
        assert_eq!(bits, Some(0b1101));
        let bits = bs.take_bits(4);
        assert_eq!(bits, Some(0b0010));
        let bits = bs.take_bits(8);
        assert_eq!(bits, Some(0b00110100));
        let bits = bs.take_bits(9);
        assert_eq!(bits, Some(0b100011010));
        let bits = bs.take_bits(7);
        assert_eq!(bits, Some(0b0100011));
        let bits = bs.take_bits(16);
        assert_eq!(bits, Some(0b01001000_11010010));
        let bits = bs.take_bits(1);
        assert_eq!(bits, Some(0b0));
        let bits = bs.take_bits(11);
        assert_eq!(bits, Some(0b01101001000));
        let bits = bs.take_bits(14);
        assert_eq!(bits, Some(0b11010010001101));
        let bits = bs.take_bits(16);
        assert_eq!(bits, Some(0b0010001101001000));
        let bits = bs.take_bits(4);
        assert_eq!(bits, Some(0b1101));
        let bits = bs.take_bits(4);
        assert_eq!(bits, Some(0b0010));
        assert_eq!(bs.take_bits(7), None);
        assert_eq!(bs.take_bits(6), Some(0b001100));
    }

    #[test]
    fn test_take_to_end() {
        let mut bs = BitStream::from(&[0b10110001]);
        assert_eq!(bs.take_bits(8), Some(0b10110001));
        assert_eq!(bs.take_bits(1), None);
        assert_eq!(bs.take_bits(0), Some(0));
    }

    #[test]
    #[should_panic]
    fn test_take_bits_over_capacity() {
        let data = vec![];
        let mut eb = BitStream::from(&data);
        eb.take_bits(5).unwrap();
    }
}

// Splits a sequence of fixed width values into values of another width, most
// significant bit first. The total bit length must divide evenly.
pub fn regroup(values: &[u16], from_bits: usize, to_bits: usize) -> Vec<u16> {
    let total = values.len() * from_bits;
    debug_assert!(total % to_bits == 0, "Cannot split {total} bits into {to_bits} bit groups");

    let mut bs = BitStream::new(total);
    values.iter().for_each(|&v| bs.push_bits(v, from_bits));
    std::iter::from_fn(|| bs.take_bits(to_bits)).collect()
}


// Symbol packer
//------------------------------------------------------------------------------

// Serializes a byte payload behind a fixed width length header into a fixed
// number of symbols, zero padded to capacity.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Packer {
    sym_bits: usize,
    len_bits: usize,
    sym_count: usize,
}

impl Packer {
    pub const fn new(sym_bits: usize, len_bits: usize, sym_count: usize) -> Self {
        Self { sym_bits, len_bits, sym_count }
    }

    pub const fn symbol_bits(&self) -> usize {
        self.sym_bits
    }

    pub const fn header_bits(&self) -> usize {
        self.len_bits
    }

    pub const fn symbol_count(&self) -> usize {
        self.sym_count
    }

    pub const fn capacity_bits(&self) -> usize {
        self.sym_bits * self.sym_count
    }

    pub fn required_bits(&self, len: usize) -> usize {
        self.len_bits + (len << 3)
    }

    pub fn max_payload_len(&self) -> usize {
        let by_capacity = self.capacity_bits().saturating_sub(self.len_bits) >> 3;
        let by_header = (1usize << self.len_bits) - 1;
        by_capacity.min(by_header)
    }

    pub fn fits(&self, len: usize) -> bool {
        len <= self.max_payload_len()
    }

    pub fn pack(&self, data: &[u8]) -> HccbResult<Vec<u8>> {
        let len = data.len();
        if !self.fits(len) {
            return Err(HccbError::PayloadTooLarge { len, capacity: self.max_payload_len() });
        }

        let mut bs = BitStream::new(self.capacity_bits());
        bs.push_bits(len as u16, self.len_bits);
        bs.extend(data);
        bs.pad();

        let symbols = std::iter::from_fn(|| bs.take_bits(self.sym_bits))
            .map(|s| s as u8)
            .collect::<Vec<_>>();
        debug_assert!(symbols.len() == self.sym_count, "Packed {} symbols", symbols.len());
        Ok(symbols)
    }

    pub fn unpack(&self, symbols: &[u8]) -> HccbResult<Vec<u8>> {
        if symbols.len() != self.sym_count {
            return Err(HccbError::InvalidLength { expected: self.sym_count, got: symbols.len() });
        }

        let mut bs = BitStream::new(self.capacity_bits());
        for &s in symbols {
            if (s as usize) >> self.sym_bits != 0 {
                return Err(HccbError::InvalidSymbol(s as u16));
            }
            bs.push_bits(s, self.sym_bits);
        }

        let len = bs.take_bits(self.len_bits).ok_or(HccbError::InvalidHeader)? as usize;
        if !self.fits(len) {
            return Err(HccbError::InvalidHeader);
        }
        Ok(std::iter::from_fn(|| bs.take_bits(8)).take(len).map(|b| b as u8).collect())
    }
}

#[cfg(test)]
mod packer_tests {
    use test_case::test_case;

    use super::Packer;
    use crate::common::error::HccbError;

    const ABC_SYMBOLS: [u8; 16] = [0, 0, 0, 3, 1, 0, 0, 1, 1, 0, 0, 2, 1, 0, 0, 3];

    #[test]
    fn test_pack() {
        let packer = Packer::new(2, 8, 16);
        assert_eq!(packer.capacity_bits(), 32);
        assert_eq!(packer.max_payload_len(), 3);
        assert_eq!(packer.pack(b"ABC").unwrap(), ABC_SYMBOLS);
        assert_eq!(packer.pack(b"").unwrap(), [0; 16]);
        assert_eq!(packer.pack(b"AB").unwrap(), [0, 0, 0, 2, 1, 0, 0, 1, 1, 0, 0, 2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_pack_wide_header() {
        let packer = Packer::new(3, 16, 192);
        assert_eq!(packer.max_payload_len(), 70);
        let symbols = packer.pack(b"hi").unwrap();
        assert_eq!(symbols.len(), 192);
        assert_eq!(symbols[..12], [0, 0, 0, 0, 1, 1, 5, 0, 3, 2, 2, 0]);
        assert!(symbols[12..].iter().all(|&s| s == 0));
    }

    #[test]
    fn test_pack_too_large() {
        let packer = Packer::new(2, 8, 16);
        assert_eq!(packer.pack(b"ABCD"), Err(HccbError::PayloadTooLarge { len: 4, capacity: 3 }));
    }

    #[test]
    fn test_header_limits_capacity() {
        let packer = Packer::new(4, 4, 100);
        assert_eq!(packer.max_payload_len(), 15);
        assert!(packer.fits(15));
        assert!(!packer.fits(16));
    }

    #[test_case(b"ABC")]
    #[test_case(b"")]
    #[test_case(b"\x00")]
    #[test_case(b"\xff\x00")]
    fn test_unpack(data: &[u8]) {
        let packer = Packer::new(2, 8, 16);
        let symbols = packer.pack(data).unwrap();
        assert_eq!(packer.unpack(&symbols).unwrap(), data);
    }

    #[test]
    fn test_unpack_invalid() {
        let packer = Packer::new(2, 8, 16);
        let err = packer.unpack(&[0; 15]);
        assert_eq!(err, Err(HccbError::InvalidLength { expected: 16, got: 15 }));

        let mut symbols = ABC_SYMBOLS;
        symbols[5] = 4;
        assert_eq!(packer.unpack(&symbols), Err(HccbError::InvalidSymbol(4)));

        // Header claims 4 bytes
        let mut symbols = ABC_SYMBOLS;
        symbols[2] = 1;
        symbols[3] = 0;
        assert_eq!(packer.unpack(&symbols), Err(HccbError::InvalidHeader));
    }
}
