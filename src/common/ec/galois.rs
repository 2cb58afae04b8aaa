#[cfg(test)]
use std::ops::Div;
use std::ops::{Add, AddAssign, Mul, MulAssign};

// Galois field element of GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct G(pub u8);

impl G {
    // Powers of the generator α = 2
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn log(self) -> usize {
        debug_assert!(!self.is_zero(), "Log of zero is undefined");
        LOG_TABLE[self.0 as usize] as usize
    }
}

impl From<G> for u8 {
    fn from(g: G) -> u8 {
        g.0
    }
}

// Addition and subtraction coincide in characteristic 2
impl Add for G {
    type Output = Self;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return Self(0);
        }
        let log_sum = LOG_TABLE[self.0 as usize] as usize + LOG_TABLE[rhs.0 as usize] as usize;
        Self(EXP_TABLE[log_sum % 255])
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
impl Div for G {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        debug_assert!(!rhs.is_zero(), "Division by zero in GF(256)");
        if self.is_zero() {
            return Self(0);
        }
        let log_diff =
            LOG_TABLE[self.0 as usize] as usize + 255 - LOG_TABLE[rhs.0 as usize] as usize;
        Self(EXP_TABLE[log_diff % 255])
    }
}

// Multiplies polynomials with coefficients in descending order of degree
#[cfg(test)]
pub(crate) fn multiply(lhs: &[G], rhs: &[G]) -> Vec<G> {
    let mut res = vec![G(0); lhs.len() + rhs.len() - 1];
    for (i, &a) in lhs.iter().enumerate() {
        for (j, &b) in rhs.iter().enumerate() {
            res[i + j] += a * b;
        }
    }
    res
}

#[cfg(test)]
mod galois_tests {
    use super::{multiply, G, EXP_TABLE, LOG_TABLE};

    #[test]
    fn test_tables() {
        assert_eq!(EXP_TABLE[0], 1);
        assert_eq!(EXP_TABLE[8], 0x1D);
        assert_eq!(EXP_TABLE[255], 1);
        for i in 1..=255 {
            assert_eq!(EXP_TABLE[LOG_TABLE[i] as usize] as usize, i);
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = G(0x53);
        let b = G(0xCA);
        assert_eq!(a + a, G(0));
        assert_eq!(a * G(1), a);
        assert_eq!(a * G(0), G(0));
        assert_eq!((a * b) / b, a);
        assert_eq!(G::gen_pow(255), G(1));
        assert_eq!(G::gen_pow(1) * G::gen_pow(254), G(1));
    }

    #[test]
    fn test_multiply() {
        // (x + 1)(x + α) = x^2 + (1 + α)x + α
        let res = multiply(&[G(1), G(1)], &[G(1), G(2)]);
        assert_eq!(res, [G(1), G(3), G(2)]);
    }
}

// Global constants
//------------------------------------------------------------------------------

const PRIMITIVE_POLY: u16 = 0x11D;

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    table[255] = 1;
    table
}

const fn build_log_table(exp: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

pub(crate) const EXP_TABLE: [u8; 256] = build_exp_table();

pub(crate) const LOG_TABLE: [u8; 256] = build_log_table(&EXP_TABLE);
