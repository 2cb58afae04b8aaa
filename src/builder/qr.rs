use std::{iter, ops::Deref};

use crate::common::{
    generate_format_info_qr, BitStream, Color, ECLevel, EncRegionIter, MaskPattern, Version,
    FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    // Held for format info until a mask is chosen
    Reserved,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty | Module::Reserved => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    // Every module is settled as light or dark
    pub fn is_complete(&self) -> bool {
        !self.grid.iter().any(|m| matches!(m, Module::Empty | Module::Reserved))
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Reserved => 'r',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count back from the far edge
    fn index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!((-w..w).contains(&r), "Row {r} outside width {w}");
        debug_assert!((-w..w).contains(&c), "Column {c} outside width {w}");
        r.rem_euclid(w) as usize * self.w + c.rem_euclid(w) as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let i = self.index(r, c);
        self.grid[i] = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        let far = self.w as i16 - 4;
        for (r, c) in [(3, 3), (3, far), (far, 3)] {
            // Ring 4 is the separator, clipped by the symbol edge
            self.draw_rings(r, c, 4, |ring| ring != 2 && ring != 4);
        }
    }

    // Square rings around (r, c) out to `radius`. Cells outside the grid are skipped.
    fn draw_rings(&mut self, r: i16, c: i16, radius: i16, is_dark: fn(i16) -> bool) {
        let w = self.w as i16;
        for i in -radius..=radius {
            for j in -radius..=radius {
                let (y, x) = (r + i, c + j);
                if (0..w).contains(&y) && (0..w).contains(&x) {
                    let ring = i.abs().max(j.abs());
                    self.set(y, x, Module::Func(Color::from(is_dark(ring))));
                }
            }
        }
    }
}

#[cfg(test)]
mod finder_pattern_tests {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_finder_pattern_qr() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.draw_finder_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffF.....Ffffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    // Row 6 and column 6 between the finders. Modules already drawn are left alone.
    fn draw_timing_patterns(&mut self) {
        for i in 8..self.w as i16 - 8 {
            let module = Module::Func(Color::from(i % 2 == 0));
            for (r, c) in [(TIMING_LINE, i), (i, TIMING_LINE)] {
                if self.get(r, c) == Module::Empty {
                    self.set(r, c, module);
                }
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    // Centers landing on a finder are skipped, so finders go first
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                if self.get(r, c) == Module::Empty {
                    self.draw_rings(r, c, 2, |ring| ring != 1);
                }
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_patterns();
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    // Holds both format info copies, and sets the dark module beside the bottom left finder
    pub fn reserve_format_area(&mut self) {
        self.draw_info(0, FORMAT_INFO_BIT_LEN, format_info_coords, |_| Module::Reserved);
        self.set(-8, 8, Module::Func(Color::Dark));
    }

    fn draw_format_info(&mut self, format_info: u32) {
        self.draw_info(format_info, FORMAT_INFO_BIT_LEN, format_info_coords, Module::Format);
    }

    pub fn draw_version_info(&mut self) {
        if *self.ver >= 7 {
            let ver_info = self.ver.info();
            self.draw_info(ver_info, VERSION_INFO_BIT_LEN, version_info_coords, Module::Version);
        }
    }

    // Bit `i` of `info`, counting from the most significant, goes to both cells of `coords(i)`
    fn draw_info(
        &mut self,
        info: u32,
        bit_len: usize,
        coords: fn(usize) -> [(i16, i16); 2],
        module: fn(Color) -> Module,
    ) {
        for i in 0..bit_len {
            let clr = Color::from((info >> (bit_len - 1 - i)) & 1 == 1);
            for (r, c) in coords(i) {
                self.set(r, c, module(clr));
            }
        }
    }
}

// Main copy wraps the top left finder, the side copy is split between the other two
fn format_info_coords(i: usize) -> [(i16, i16); 2] {
    let i = i as i16;
    let main = match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    };
    let side = if i < 7 { (-1 - i, 8) } else { (8, i - 15) };
    [main, side]
}

// 6x3 block above the bottom left finder, transposed beside the top right one
fn version_info_coords(i: usize) -> [(i16, i16); 2] {
    let (r, c) = (-9 - (i % 3) as i16, 5 - (i / 3) as i16);
    [(r, c), (c, r)]
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Draws infos and codewords. Function patterns must already be drawn.
    pub fn draw_encoding_region(&mut self, payload: BitStream) {
        self.reserve_format_area();
        self.draw_version_info();

        let path = self.data_path();
        debug_assert!(
            path.len() == self.ver.raw_data_modules(),
            "Data path length mismatch: Path {}, Expected {}",
            path.len(),
            self.ver.raw_data_modules()
        );
        debug_assert!(
            payload.len() == self.ver.total_codewords() << 3,
            "Payload doesn't fill the encoding region: Payload {}, Capacity {}",
            payload.len(),
            self.ver.total_codewords() << 3
        );

        // Remainder bits past the payload stay light
        for ((r, c), bit) in path.into_iter().zip(payload.chain(iter::repeat(false))) {
            self.set(r, c, Module::Data(Color::from(bit)));
        }
    }

    // Free modules in zigzag order
    fn data_path(&self) -> Vec<(i16, i16)> {
        EncRegionIter::new(self.ver).filter(|&(r, c)| self.get(r, c) == Module::Empty).collect()
    }

    // Flips data modules under the mask and writes the matching format info
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_functions();
        let w = self.w;
        for (i, m) in self.grid.iter_mut().enumerate() {
            if let Module::Data(clr) = *m {
                if mask_fn((i / w) as i16, (i % w) as i16) {
                    *m = Module::Data(!clr);
                }
            }
        }
        let format_info = generate_format_info_qr(self.ecl, pattern);
        self.draw_format_info(format_info);
    }
}


// Global constants
//------------------------------------------------------------------------------

static TIMING_LINE: i16 = 6;
