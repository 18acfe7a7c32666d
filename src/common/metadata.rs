use std::fmt::{Display, Formatter};

use crate::common::error::{HccbError, HccbResult};

// Orientation
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Orientation {
    Up,
    Down,
}

impl Orientation {
    // Triangles tessellate by alternating on position parity
    pub const fn at(r: usize, c: usize) -> Self {
        if (r + c) & 1 == 0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub const fn flip(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Black,
    Yellow,
    Green,
    Red,
    White,
    Cyan,
    Pink,
    Blue,
    // Reserved for sync glyphs
    Grey,
    Orange,
}

pub const COLOR_COUNT: usize = 10;

impl Color {
    pub const ALL: [Color; COLOR_COUNT] = [
        Self::Black,
        Self::Yellow,
        Self::Green,
        Self::Red,
        Self::White,
        Self::Cyan,
        Self::Pink,
        Self::Blue,
        Self::Grey,
        Self::Orange,
    ];

    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::Black => [0x00, 0x00, 0x00],
            Self::Yellow => [0xFA, 0xFD, 0x28],
            Self::Green => [0x1C, 0xEC, 0x12],
            Self::Red => [0xDF, 0x02, 0x03],
            Self::White => [0xFA, 0xFA, 0xFA],
            Self::Cyan => [0x1E, 0xF6, 0xEE],
            Self::Pink => [0xF3, 0x8B, 0xED],
            Self::Blue => [0x18, 0x33, 0xDE],
            Self::Grey => [0x80, 0x80, 0x80],
            Self::Orange => [0xFF, 0x80, 0x00],
        }
    }

    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    pub const fn is_sync(self) -> bool {
        matches!(self, Self::Grey | Self::Orange)
    }
}

fn distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter().zip(b.iter()).map(|(&x, &y)| (x as i32 - y as i32).pow(2) as u32).sum()
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

// Glyph
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Glyph {
    pub color: Color,
    pub orientation: Orientation,
}

impl Glyph {
    pub const fn new(color: Color, orientation: Orientation) -> Self {
        Self { color, orientation }
    }
}

// Palette
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Palette {
    Four,
    Eight,
}

const FOUR_COLORS: [Color; 4] = [Color::Black, Color::Yellow, Color::Green, Color::Red];

const EIGHT_COLORS: [Color; 8] = [
    Color::Black,
    Color::Yellow,
    Color::Green,
    Color::Red,
    Color::White,
    Color::Cyan,
    Color::Pink,
    Color::Blue,
];

// Brighter shades printed by the four color palette
const FOUR_RGB: [[u8; 3]; 4] = [
    [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0x45],
    [0x12, 0xFF, 0x0E],
    [0xFF, 0x14, 0x00],
];

// Inverse tables indexed by color discriminant
static FOUR_SYMBOLS: [Option<u8>; COLOR_COUNT] = inverse(&FOUR_COLORS);
static EIGHT_SYMBOLS: [Option<u8>; COLOR_COUNT] = inverse(&EIGHT_COLORS);

const fn inverse(colors: &[Color]) -> [Option<u8>; COLOR_COUNT] {
    let mut res = [None; COLOR_COUNT];
    let mut i = 0;
    while i < colors.len() {
        res[colors[i] as usize] = Some(i as u8);
        i += 1;
    }
    res
}

impl Palette {
    // Alphabet size K
    pub const fn size(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    // Bits carried per glyph
    pub const fn bits(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Eight => 3,
        }
    }

    pub fn colors(self) -> &'static [Color] {
        match self {
            Self::Four => &FOUR_COLORS,
            Self::Eight => &EIGHT_COLORS,
        }
    }

    fn symbols(self) -> &'static [Option<u8>; COLOR_COUNT] {
        match self {
            Self::Four => &FOUR_SYMBOLS,
            Self::Eight => &EIGHT_SYMBOLS,
        }
    }

    pub fn color(self, symbol: u8) -> HccbResult<Color> {
        self.colors().get(symbol as usize).copied().ok_or(HccbError::InvalidSymbol(symbol as u16))
    }

    // The orientation is dictated by the grid position, not by the symbol
    pub fn to_glyph(self, symbol: u8, orientation: Orientation) -> HccbResult<Glyph> {
        Ok(Glyph::new(self.color(symbol)?, orientation))
    }

    pub fn to_symbol(self, glyph: Glyph) -> HccbResult<u8> {
        self.symbols()[glyph.color as usize].ok_or(HccbError::InvalidColor)
    }

    // Rendered value of a color under this palette. Colors outside the palette
    // keep their own values.
    pub fn rgb(self, color: Color) -> [u8; 3] {
        match (self, self.symbols()[color as usize]) {
            (Self::Four, Some(s)) => FOUR_RGB[s as usize],
            _ => color.rgb(),
        }
    }

    pub fn hex(self, color: Color) -> String {
        let [r, g, b] = self.rgb(color);
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    // Nearest palette or sync color by euclidean distance in RGB space
    pub fn classify(self, rgb: [u8; 3]) -> Color {
        self.colors()
            .iter()
            .chain(SYNC_COLORS.iter())
            .copied()
            .min_by_key(|&c| distance(self.rgb(c), rgb))
            .unwrap_or(Color::Black)
    }
}

#[cfg(test)]
mod palette_tests {
    use test_case::test_case;

    use super::{Color, Glyph, Orientation, Palette, SyncMark, COLOR_COUNT};
    use crate::common::error::HccbError;

    #[test_case(Palette::Four)]
    #[test_case(Palette::Eight)]
    fn test_bijection(pal: Palette) {
        assert_eq!(pal.size(), 1 << pal.bits());
        assert_eq!(pal.colors().len(), pal.size());
        for o in [Orientation::Up, Orientation::Down] {
            for s in 0..pal.size() as u8 {
                let glyph = pal.to_glyph(s, o).unwrap();
                assert_eq!(glyph.orientation, o);
                assert_eq!(pal.to_symbol(glyph), Ok(s));
            }
        }
    }

    #[test_case(Palette::Four)]
    #[test_case(Palette::Eight)]
    fn test_distinct_colors(pal: Palette) {
        let colors = pal.colors();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
                assert_ne!(pal.rgb(*a), pal.rgb(*b));
            }
        }
    }

    #[test_case(Palette::Four)]
    #[test_case(Palette::Eight)]
    fn test_sync_disjoint(pal: Palette) {
        for mark in [SyncMark::Primary, SyncMark::Secondary] {
            let color = mark.color();
            assert!(color.is_sync());
            assert!(!pal.colors().contains(&color));
            let glyph = Glyph::new(color, Orientation::Up);
            assert_eq!(pal.to_symbol(glyph), Err(HccbError::InvalidColor));
        }
        assert!(pal.colors().iter().all(|c| !c.is_sync()));
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(Palette::Four.to_glyph(4, Orientation::Up), Err(HccbError::InvalidSymbol(4)));
        assert_eq!(Palette::Eight.to_glyph(8, Orientation::Down), Err(HccbError::InvalidSymbol(8)));
        let white = Glyph::new(Color::White, Orientation::Up);
        assert_eq!(Palette::Four.to_symbol(white), Err(HccbError::InvalidColor));
        assert_eq!(Palette::Eight.to_symbol(white), Ok(4));
    }

    #[test]
    fn test_color_table() {
        assert_eq!(Color::ALL.len(), COLOR_COUNT);
        for (i, c) in Color::ALL.iter().enumerate() {
            assert_eq!(*c as usize, i);
        }
        assert_eq!(Color::Yellow.hex(), "#FAFD28");
        assert_eq!(Color::Orange.to_string(), "#FF8000");
        assert_eq!(Palette::Eight.color(7), Ok(Color::Blue));
    }

    #[test]
    fn test_palette_rgb() {
        assert_eq!(Palette::Four.hex(Color::Yellow), "#FFFF45");
        assert_eq!(Palette::Four.hex(Color::Green), "#12FF0E");
        assert_eq!(Palette::Four.hex(Color::Red), "#FF1400");
        assert_eq!(Palette::Four.rgb(Color::Black), [0, 0, 0]);
        assert_eq!(Palette::Eight.hex(Color::Yellow), "#FAFD28");
        assert_eq!(Palette::Eight.rgb(Color::Red), Color::Red.rgb());
        assert_eq!(Palette::Four.rgb(Color::Orange), Color::Orange.rgb());
        assert_eq!(Palette::Four.rgb(Color::White), Color::White.rgb());
    }

    #[test_case(Palette::Four, [250, 240, 60], Color::Yellow)]
    #[test_case(Palette::Four, [255, 255, 255], Color::Yellow)]
    #[test_case(Palette::Eight, [255, 255, 255], Color::White)]
    #[test_case(Palette::Eight, [10, 40, 200], Color::Blue)]
    #[test_case(Palette::Eight, [120, 130, 128], Color::Grey)]
    #[test_case(Palette::Four, [230, 120, 10], Color::Orange)]
    #[test_case(Palette::Four, [250, 30, 10], Color::Red)]
    #[test_case(Palette::Four, [20, 250, 20], Color::Green)]
    fn test_classify(pal: Palette, rgb: [u8; 3], exp: Color) {
        assert_eq!(pal.classify(rgb), exp);
    }

    #[test]
    fn test_classify_exact() {
        for pal in [Palette::Four, Palette::Eight] {
            for &c in pal.colors() {
                assert_eq!(pal.classify(pal.rgb(c)), c);
            }
        }
    }

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::at(0, 0), Orientation::Up);
        assert_eq!(Orientation::at(0, 1), Orientation::Down);
        assert_eq!(Orientation::at(3, 5), Orientation::Up);
        assert_eq!(Orientation::Up.flip(), Orientation::Down);
    }
}

// Sync glyphs
//------------------------------------------------------------------------------

// Fixed marks placed on the grid perimeter, never data bearing
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum SyncMark {
    Primary,
    Secondary,
}

static SYNC_COLORS: [Color; 2] = [Color::Grey, Color::Orange];

impl SyncMark {
    // Alternates along the perimeter, starting with primary at the origin
    pub const fn at(r: usize, c: usize) -> Self {
        if (r + c) & 1 == 0 {
            Self::Primary
        } else {
            Self::Secondary
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Primary => Color::Grey,
            Self::Secondary => Color::Orange,
        }
    }

    pub const fn glyph(self, orientation: Orientation) -> Glyph {
        Glyph::new(self.color(), orientation)
    }

    pub const fn from_color(color: Color) -> Option<Self> {
        match color {
            Color::Grey => Some(Self::Primary),
            Color::Orange => Some(Self::Secondary),
            _ => None,
        }
    }
}
