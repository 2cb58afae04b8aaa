use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};
use std::str::FromStr;

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::version_db::{ALIGNMENT_PATTERN_POSITIONS, BLOCK_LAYOUT, CHAR_CAPACITY};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

#[cfg(test)]
impl Color {
    pub fn select<T>(&self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl From<Color> for bool {
    fn from(clr: Color) -> Self {
        clr == Color::Dark
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    // Two bit indicator embedded in format info
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl TryFrom<char> for ECLevel {
    type Error = QRError;

    fn try_from(c: char) -> QRResult<Self> {
        match c.to_ascii_uppercase() {
            'L' => Ok(Self::L),
            'M' => Ok(Self::M),
            'Q' => Ok(Self::Q),
            'H' => Ok(Self::H),
            _ => Err(QRError::InvalidParameter(format!("unknown ec level '{c}'"))),
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(QRError::InvalidParameter(format!("unknown ec level '{s}'"))),
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Version {
    type Error = QRError;
    fn try_from(v: u8) -> QRResult<Self> {
        Self::new(v)
    }
}

/// Groups of data blocks sharing one shape within a version & ec level.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockGroup {
    pub ecc_per_block: usize,
    pub count: usize,
    pub data_per_block: usize,
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(v: u8) -> QRResult<Self> {
        match v {
            1..=40 => Ok(Self(v)),
            _ => Err(QRError::InvalidParameter(format!("version {v} is outside 1..=40"))),
        }
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 as usize]
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    // Width of character count indicator
    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        match (mode, self.0) {
            (Mode::Numeric, 1..=9) => 10,
            (Mode::Numeric, 10..=26) => 12,
            (Mode::Numeric, _) => 14,
            (Mode::Alphanumeric, 1..=9) => 9,
            (Mode::Alphanumeric, 10..=26) => 11,
            (Mode::Alphanumeric, _) => 13,
            (Mode::Byte, 1..=9) => 8,
            (Mode::Byte, _) => 16,
        }
    }

    /// Max number of characters (bytes in byte mode) the version can hold.
    pub fn char_capacity(self, ecl: ECLevel, mode: Mode) -> usize {
        let col = match mode {
            Mode::Numeric => 0,
            Mode::Alphanumeric => 1,
            Mode::Byte => 2,
        };
        CHAR_CAPACITY[self.0 as usize][ecl as usize][col]
    }

    /// Number of modules left for codewords once function patterns & infos are drawn.
    pub fn raw_data_modules(self) -> usize {
        let v = self.0 as usize;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align_cnt = v / 7 + 2;
            res -= (25 * align_cnt - 10) * align_cnt - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.raw_data_modules() & 7
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        let (_, c1, d1, c2, d2) = BLOCK_LAYOUT[self.0 as usize][ecl as usize];
        c1 * d1 + c2 * d2
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        BLOCK_LAYOUT[self.0 as usize][ecl as usize].0
    }

    // (Block1 size, Block1 count, Block2 size, Block2 count)
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let (_, c1, d1, c2, d2) = BLOCK_LAYOUT[self.0 as usize][ecl as usize];
        (d1, c1, d2, c2)
    }

    pub fn block_layout(self, ecl: ECLevel) -> Vec<BlockGroup> {
        let (ecc_per_block, c1, d1, c2, d2) = BLOCK_LAYOUT[self.0 as usize][ecl as usize];
        [(c1, d1), (c2, d2)]
            .into_iter()
            .filter(|&(count, _)| count > 0)
            .map(|(count, data_per_block)| BlockGroup { ecc_per_block, count, data_per_block })
            .collect()
    }

    /// Number of erroneous codewords the symbol can correct. Versions 1 to 3 set aside a few
    /// ecc codewords for misdecode protection.
    pub fn error_correction_capacity(self, ecl: ECLevel) -> usize {
        let p = match (self.0, ecl) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };
        let (_, count1, _, count2) = self.data_codewords_per_block(ecl);
        let ec_bytes = (count1 + count2) * self.ecc_per_block(ecl);
        (ec_bytes - p) / 2
    }

    // 18 bit version info: 6 bit version followed by 12 bit BCH(18, 6) remainder
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info only exists for version 7 and above");
        let ver = self.0 as u32;
        let mut rem = ver;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_INFO_GENERATOR);
        }
        (ver << 12) | rem
    }
}

// Format info
//------------------------------------------------------------------------------

// 15 bit format info: 2 bit ec level, 3 bit mask, 10 bit BCH(15, 5) remainder, xored with mask
pub fn generate_format_info_qr(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ecl.format_bits() << 3) | *mask as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_INFO_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_INFO_MASK
}


// Global constants
//------------------------------------------------------------------------------

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static VERSION_INFO_BIT_LEN: usize = 18;

static FORMAT_INFO_GENERATOR: u32 = 0x537;

static FORMAT_INFO_MASK: u32 = 0x5412;

static VERSION_INFO_GENERATOR: u32 = 0x1F25;
