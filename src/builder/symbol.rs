use super::QR;
use crate::common::{ECLevel, MaskPattern, Mode, Version};

// Finished symbol
//------------------------------------------------------------------------------

/// Square grid of modules, `true` being dark, along with the parameters it was built with.
/// The quiet zone isn't included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    modules: Vec<bool>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    mode: Mode,
    penalty: u32,
}

impl Symbol {
    pub(crate) fn new(qr: &QR, mode: Mode, mask: MaskPattern, penalty: u32) -> Self {
        debug_assert!(qr.is_complete(), "Symbol built from an unfinished grid");
        debug_assert!(qr.mask() == Some(mask), "Mask mismatch: {:?} {mask:?}", qr.mask());

        let modules = qr.grid().iter().map(|m| bool::from(**m)).collect();
        Self {
            modules,
            w: qr.width(),
            ver: qr.version(),
            ecl: qr.ec_level(),
            mask,
            mode,
            penalty,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Total penalty of the chosen mask.
    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    /// Module at row `r` and column `c`. Panics if either is outside the grid.
    pub fn get(&self, r: usize, c: usize) -> bool {
        assert!(r < self.w && c < self.w, "Module ({r}, {c}) is outside width {}", self.w);
        self.modules[r * self.w + c]
    }

    /// Modules in row major order.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks_exact(self.w)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {:?}, Mask: {}, Mode: {:?} }}",
            self.ver, self.ecl, *self.mask, self.mode
        )
    }
}
