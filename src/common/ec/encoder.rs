use super::{
    galois::{EXP_TABLE, G, LOG_TABLE},
    MAX_BLOCK_SIZE, MAX_EC_SIZE,
};
use crate::common::error::{QRError, QRResult};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

// Performs polynomial long division with data polynomial(num)
// and generator polynomial(den) to compute remainder polynomial,
// the coefficients of which are the ecc
pub fn ecc(block: &[u8], ecc_count: usize) -> QRResult<Vec<u8>> {
    if ecc_count > MAX_EC_SIZE {
        return Err(QRError::InvalidParameter(format!(
            "{ecc_count} ecc codewords per block exceeds max of {MAX_EC_SIZE}"
        )));
    }
    let len = block.len();
    if len + ecc_count > MAX_BLOCK_SIZE {
        return Err(QRError::MessageTooLong { len: len + ecc_count });
    }

    let gen_poly = &GENERATOR_POLYNOMIALS[ecc_count][..ecc_count];

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = G(res[i]);
        if lead_coeff.is_zero() {
            continue;
        }

        let log_lead_coeff = lead_coeff.log();
        for (u, &v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            *u = (G(*u) + G::gen_pow(v as usize + log_lead_coeff)).into();
        }
    }

    Ok(res.split_off(len))
}


// Global constants
//------------------------------------------------------------------------------

const fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP_TABLE[(LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize) % 255]
}

// Log form of the non leading coefficients of (x - α^0)(x - α^1)...(x - α^(n-1))
const fn build_generator_polynomials() -> [[u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1] {
    let mut res = [[0u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1];
    let mut poly = [0u8; MAX_EC_SIZE + 1];
    poly[0] = 1;
    let mut deg = 0;
    while deg < MAX_EC_SIZE {
        let root = EXP_TABLE[deg];
        let mut j = deg + 1;
        while j > 0 {
            poly[j] ^= gf_mul(root, poly[j - 1]);
            j -= 1;
        }
        deg += 1;
        let mut k = 0;
        while k < deg {
            res[deg][k] = LOG_TABLE[poly[k + 1] as usize];
            k += 1;
        }
    }
    res
}

static GENERATOR_POLYNOMIALS: [[u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1] =
    build_generator_polynomials();
