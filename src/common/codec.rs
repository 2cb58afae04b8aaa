use std::borrow::Cow;

use encoding_rs::mem::encode_latin1_lossy;

pub use encode::*;

use super::error::{QRError, QRResult};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
        }
    }

    // Bits taken by `len` characters of data, excluding header
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10 + 2) / 3,
            Self::Alphanumeric => (len * 11 + 1) / 2,
            Self::Byte => len * 8,
        }
    }
}


// Charset for byte mode
//------------------------------------------------------------------------------

/// Character set text is converted to before it's emitted in byte mode. Latin-1 is the
/// ISO/IEC 18004 default; UTF-8 is understood by most modern readers.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Charset {
    #[default]
    Latin1,
    Utf8,
}

impl Charset {
    pub fn encode<'a>(&self, text: &'a str) -> QRResult<Cow<'a, [u8]>> {
        match self {
            Self::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            // Every code point up to U+00FF, C1 controls included, is one Latin-1 byte
            Self::Latin1 => match text.chars().position(|c| c > '\u{FF}') {
                Some(position) => Err(QRError::UnencodableInput { mode: Mode::Byte, position }),
                None => Ok(encode_latin1_lossy(text)),
            },
        }
    }
}

#[cfg(test)]
mod charset_tests {
    use test_case::test_case;

    use super::{Charset, Mode};
    use crate::common::QRError;

    #[test]
    fn test_latin1() {
        assert_eq!(&*Charset::Latin1.encode("Hello").unwrap(), b"Hello");
        assert_eq!(&*Charset::Latin1.encode("café ñ").unwrap(), b"caf\xe9 \xf1");
        assert_eq!(&*Charset::Latin1.encode("\u{ff}").unwrap(), b"\xff");
    }

    #[test]
    fn test_latin1_unencodable() {
        assert_eq!(
            Charset::Latin1.encode("price: 5€"),
            Err(QRError::UnencodableInput { mode: Mode::Byte, position: 8 })
        );
        assert_eq!(
            Charset::Latin1.encode("ab🌎"),
            Err(QRError::UnencodableInput { mode: Mode::Byte, position: 2 })
        );
    }

    #[test_case('\u{80}', 0x80)]
    #[test_case('\u{81}', 0x81)]
    #[test_case('\u{85}', 0x85)]
    #[test_case('\u{8D}', 0x8D)]
    #[test_case('\u{9F}', 0x9F)]
    #[test_case('\u{A0}', 0xA0)]
    fn test_latin1_c1_range(c: char, byte: u8) {
        let text = format!("a{c}b");
        assert_eq!(&*Charset::Latin1.encode(&text).unwrap(), [b'a', byte, b'b']);
    }

    #[test]
    fn test_utf8() {
        assert_eq!(&*Charset::Utf8.encode("5€").unwrap(), "5€".as_bytes());
        assert_eq!(Charset::Utf8.encode("🌎").unwrap().len(), 4);
    }
}

// Payload
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Payload<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> Payload<'a> {
    fn raw(&self) -> &'a [u8] {
        match *self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    // Narrowest mode able to hold the payload along with the data to emit in that mode
    pub fn classify(&self, charset: Charset, fold_case: bool) -> QRResult<(Mode, Cow<'a, [u8]>)> {
        let raw = self.raw();
        if raw.iter().all(|&b| Mode::Numeric.contains(b)) {
            return Ok((Mode::Numeric, Cow::Borrowed(raw)));
        }
        if raw.iter().all(|&b| Mode::Alphanumeric.contains(b)) {
            return Ok((Mode::Alphanumeric, Cow::Borrowed(raw)));
        }
        if fold_case && raw.iter().all(|b| Mode::Alphanumeric.contains(b.to_ascii_uppercase())) {
            return Ok((Mode::Alphanumeric, Cow::Owned(raw.to_ascii_uppercase())));
        }
        Ok((Mode::Byte, self.byte_data(charset)?))
    }

    // Data in `mode`, failing at the first character the mode can't represent
    pub fn with_mode(
        &self,
        mode: Mode,
        charset: Charset,
        fold_case: bool,
    ) -> QRResult<Cow<'a, [u8]>> {
        let raw = self.raw();
        let data = match mode {
            Mode::Byte => return self.byte_data(charset),
            Mode::Alphanumeric if fold_case => Cow::Owned(raw.to_ascii_uppercase()),
            _ => Cow::Borrowed(raw),
        };
        match data.iter().position(|&b| !mode.contains(b)) {
            Some(pos) => Err(QRError::UnencodableInput { mode, position: self.char_index(pos) }),
            None => Ok(data),
        }
    }

    fn byte_data(&self, charset: Charset) -> QRResult<Cow<'a, [u8]>> {
        match *self {
            Self::Text(text) => charset.encode(text),
            Self::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }

    // Character index of the byte at `pos`
    fn char_index(&self, pos: usize) -> usize {
        match *self {
            Self::Text(text) => text.char_indices().take_while(|&(i, _)| i < pos).count(),
            Self::Bytes(_) => pos,
        }
    }
}


// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    mode: Mode,
    mode_bits: usize,
    len_bits: usize, // Bit len of char count
    data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, mode_bits: usize, len_bits: usize, data: &'a [u8]) -> Self {
        Self { mode, mode_bits, len_bits, data }
    }

    pub fn bit_len(&self) -> usize {
        let encoded_bits = self.mode.encoded_len(self.data.len());
        self.mode_bits + self.len_bits + encoded_bits
    }
}


// Writer for encoded data
//------------------------------------------------------------------------------

mod writer {
    use super::{Mode, Segment, PADDING_CODEWORDS};
    use crate::common::BitStream;

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
        }
    }

    pub(super) fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, seg.mode_bits);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    pub(super) fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    pub(super) fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    pub(super) fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for &byte in data {
            out.push_bits(byte, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    pub(super) fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    pub(super) fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}

// Encoder
//------------------------------------------------------------------------------

mod encode {
    use log::debug;

    use super::{
        writer::{pad_remaining_capacity, push_segment, push_terminator},
        Mode, Segment,
    };
    use crate::common::{BitStream, ECLevel, QRError, QRResult, Version};

    /// Smallest version from `min_ver` upwards whose capacity holds `len` characters.
    pub fn find_version(len: usize, mode: Mode, ecl: ECLevel, min_ver: Version) -> QRResult<Version> {
        let found = Version::all().skip_while(|&v| v < min_ver).find(|v| len <= v.char_capacity(ecl, mode));
        match found {
            Some(ver) => Ok(ver),
            None => Err(QRError::DataTooLarge {
                len,
                capacity: Version::MAX.char_capacity(ecl, mode),
                mode,
                ec_level: ecl,
            }),
        }
    }

    /// Mode indicator, char count, data, terminator & padding, filling exactly the data
    /// capacity of `ver` at `ecl`.
    pub fn encode_with_version(data: &[u8], mode: Mode, ecl: ECLevel, ver: Version) -> BitStream {
        let bit_capacity = ver.data_bit_capacity(ecl);
        let seg = Segment::new(mode, ver.mode_bits(), ver.char_cnt_bits(mode), data);
        debug_assert!(
            seg.bit_len() <= bit_capacity,
            "Segment overflows capacity: Segment {}, Capacity {bit_capacity}",
            seg.bit_len()
        );

        let mut bs = BitStream::new(bit_capacity);
        push_segment(seg, &mut bs);
        let encoded_len = bs.len();
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        debug!("Encoded {encoded_len} data bits, padded to {}", bs.len());
        bs
    }

}

// Global constants
//------------------------------------------------------------------------------

static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
