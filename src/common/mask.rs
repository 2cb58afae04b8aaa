use std::ops::Deref;

use log::trace;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidParameter(format!("mask {pattern} is outside 0..=7"))),
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let rc = r as i32 * c as i32;
        (rc & 1) + (rc % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let rc = r as i32 * c as i32;
        ((rc & 1) + (rc % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let rc = r as i32 * c as i32;
        ((((r + c) & 1) as i32) + (rc % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid mask pattern {}", self.0),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Total penalty of `qr` under each of the 8 masks, indexed by mask. `qr` must hold placed but
/// unmasked data. Every candidate is scored on its own copy, with its format info drawn.
pub fn evaluate_masks(qr: &QR) -> [u32; 8] {
    let score = |m: u8| {
        let mut candidate = qr.clone();
        candidate.apply_mask(MaskPattern(m));
        let pen = compute_total_penalty(&candidate);
        trace!("Mask {m} penalty {pen}");
        pen
    };

    let mut penalties = [0; 8];

    #[cfg(feature = "parallel")]
    penalties.par_iter_mut().enumerate().for_each(|(m, p)| *p = score(m as u8));

    #[cfg(not(feature = "parallel"))]
    penalties.iter_mut().enumerate().for_each(|(m, p)| *p = score(m as u8));

    penalties
}

/// Applies the mask with the least penalty, lowest index winning ties.
pub fn apply_best_mask(qr: &mut QR) -> (MaskPattern, u32) {
    let penalties = evaluate_masks(qr);
    let (pen, best) = penalties
        .iter()
        .enumerate()
        .map(|(m, &pen)| (pen, m as u8))
        .min()
        .unwrap_or((penalties[0], 0));
    let best_mask = MaskPattern(best);
    qr.apply_mask(best_mask);
    (best_mask, pen)
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// N1: Runs of 5 or more same colored modules in a row or column
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let run_penalty = |len: u32| if len >= 5 { PENALTY[0] + len - 5 } else { 0 };

    let mut pen = 0;
    for is_hor in [true, false] {
        for i in 0..w {
            let get = |j| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) };
            let mut last = get(0);
            let mut run = 1;
            for j in 1..w {
                let clr = get(j);
                if clr == last {
                    run += 1;
                } else {
                    pen += run_penalty(run);
                    last = clr;
                    run = 1;
                }
            }
            pen += run_penalty(run);
        }
    }
    pen
}

// N2: 2x2 blocks of the same color
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += PENALTY[1];
            }
        }
    }
    pen
}

// N3: 1:1:3:1:1 finder like pattern with 4 light modules on either side. Modules beyond the
// edge are light.
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let get = |j: i16| {
            if !(0..w).contains(&j) {
                Color::Light
            } else if is_hor {
                *qr.get(i, j)
            } else {
                *qr.get(j, i)
            }
        };
        for j in 0..w - 6 {
            if (j..j + 7).map(get).ne(PATTERN.iter().copied()) {
                continue;
            }
            let is_light = |x| get(x) == Color::Light;
            if (j - 4..j).all(is_light) || (j + 7..j + 11).all(is_light) {
                pen += PENALTY[2];
            }
        }
    }
    pen
}

// N4: Deviation of dark module proportion from 50%, in steps of 5%
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules() as i64;
    let w = qr.width() as i64;
    let tot = w * w;
    let k = ((dark_cnt * 20 - tot * 10).abs() + tot - 1) / tot - 1;
    k.max(0) as u32 * PENALTY[3]
}


// Global constants
//------------------------------------------------------------------------------

// Weights of N1 to N4
static PENALTY: [u32; 4] = [3, 3, 40, 10];
