use super::{galois::G, MAX_BLOCK_SIZE, MAX_EC_SIZE};

// Rectifier for encoded blocks, used to check symbols are recoverable
//------------------------------------------------------------------------------

// Corrects `block` (data followed by `ecc_count` ecc codewords) in place. Returns the
// number of corrected codewords, or None if the errors exceed what the ecc can fix.
pub(crate) fn rectify(block: &mut [u8], ecc_count: usize) -> Option<usize> {
    let len = block.len();
    debug_assert!(len <= MAX_BLOCK_SIZE, "Block is too long: {len}");
    debug_assert!(ecc_count <= MAX_EC_SIZE, "Too many ecc codewords: {ecc_count}");

    // Compute syndromes
    let synd = match syndromes(block, ecc_count) {
        Ok(()) => return Some(0),
        Err(s) => s,
    };

    // Error locator polynomial
    let (sig, err_cnt) = berlekamp_massey(&synd, ecc_count);
    if 2 * err_cnt > ecc_count {
        return None;
    }

    // Sigma derivative
    let mut dsig = [G(0); MAX_EC_SIZE + 1];
    for i in (1..=MAX_EC_SIZE).step_by(2) {
        dsig[i - 1] = sig[i];
    }

    // Error evaluator
    let omg = omega(&synd, &sig, ecc_count);

    // Locate & fix errors by XORing with magnitude
    let mut fixed = 0;
    for (i, cw) in block.iter_mut().enumerate() {
        let pow = len - 1 - i;
        let xinv = G::gen_pow(255 - pow % 255);
        if !eval_poly(sig.iter(), xinv).is_zero() {
            continue;
        }
        let mag = G::gen_pow(pow) * eval_poly(omg.iter(), xinv) / eval_poly(dsig.iter(), xinv);
        *cw = (G(*cw) + mag).into();
        fixed += 1;
    }

    if fixed != err_cnt || syndromes(block, ecc_count).is_err() {
        return None;
    }
    Some(fixed)
}

fn syndromes(block: &[u8], ecc_count: usize) -> Result<(), [G; MAX_EC_SIZE]> {
    let mut synd = [G(0); MAX_EC_SIZE];
    for (i, s) in synd.iter_mut().take(ecc_count).enumerate() {
        let x = G::gen_pow(i);
        *s = block.iter().fold(G(0), |acc, &c| acc * x + G(c));
    }

    if synd.iter().all(|s| s.is_zero()) {
        Ok(())
    } else {
        Err(synd)
    }
}

// Sigma polynomial, coefficients in ascending order of degree
fn berlekamp_massey(synd: &[G; MAX_EC_SIZE], ecc_count: usize) -> ([G; MAX_EC_SIZE + 1], usize) {
    let mut l = 0usize;
    let mut m = 1usize;
    let mut b = G(1);
    let mut cx = [G(0); MAX_EC_SIZE + 1];
    let mut bx = [G(0); MAX_EC_SIZE + 1];
    cx[0] = G(1);
    bx[0] = G(1);

    for n in 0..ecc_count {
        // Calculate discrepancy
        let mut d = synd[n];
        for i in 1..=l {
            d += cx[i] * synd[n - i];
        }

        if d.is_zero() {
            m += 1;
            continue;
        }

        let tx = cx;
        let scale = d / b;
        for i in 0..=MAX_EC_SIZE - m {
            cx[i + m] += scale * bx[i];
        }

        if 2 * l <= n {
            bx = tx;
            l = n + 1 - l;
            b = d;
            m = 1;
        } else {
            m += 1;
        }
    }
    (cx, l)
}

// Syndrome polynomial times sigma, mod x^ecc_count
fn omega(
    synd: &[G; MAX_EC_SIZE],
    sig: &[G; MAX_EC_SIZE + 1],
    ecc_count: usize,
) -> [G; MAX_EC_SIZE] {
    let mut omg = [G(0); MAX_EC_SIZE];
    for i in 0..ecc_count {
        for j in 0..ecc_count - i {
            omg[i + j] += synd[i] * sig[j];
        }
    }
    omg
}

// Evaluates polynomial with coefficients in ascending order of degree
fn eval_poly<'a>(poly: impl Iterator<Item = &'a G>, x: G) -> G {
    let mut res = G(0);
    let mut xpow = G(1);
    for &coeff in poly {
        res += coeff * xpow;
        xpow *= x;
    }
    res
}

#[cfg(test)]
mod ec_rectifier_tests {
    use proptest::prelude::*;
    use rand::{rng, seq::index::sample, Rng};
    use test_case::test_case;

    use super::rectify;
    use crate::common::ec::ecc;

    fn encode(data: &[u8], ecc_count: usize) -> Vec<u8> {
        let mut block = data.to_vec();
        block.extend(ecc(data, ecc_count).unwrap());
        block
    }

    #[test_case(&[32, 91, 11, 45, 89, 123, 77, 44, 56, 99, 202], &[(5, 46)])]
    #[test_case(&[32, 91, 11, 45, 89, 123, 77, 44, 56, 99, 202], &[(5, 46), (10, 249)])]
    fn test_rectifier(data: &[u8], errors: &[(usize, u8)]) {
        let exp = encode(data, 4);
        let mut block = exp.clone();
        for &(i, b) in errors {
            block[i] = b;
        }
        assert_eq!(rectify(&mut block, 4), Some(errors.len()));
        assert_eq!(block, exp);
    }

    #[test]
    fn test_rectifier_clean_block() {
        let mut block = encode(b"HELLO", 10);
        assert_eq!(rectify(&mut block, 10), Some(0));
    }

    #[test]
    fn test_rectifier_fail() {
        let data = [32, 91, 11, 45, 89, 123, 77, 44, 56, 99, 202];
        let mut block = encode(&data, 4);
        for (i, b) in [(0, 138), (2, 161), (4, 243), (6, 231), (8, 146)] {
            block[i] = b;
        }
        assert!(rectify(&mut block, 4).map_or(true, |_| block[..11] != data));
    }

    #[test]
    fn test_rectifier_random_errors() {
        let mut rng = rng();
        for _ in 0..200 {
            let ecc_count = rng.random_range(2..=30);
            let len = rng.random_range(1..=255 - ecc_count);
            let data = (0..len).map(|_| rng.random::<u8>()).collect::<Vec<_>>();
            let exp = encode(&data, ecc_count);
            let mut block = exp.clone();
            let err_cnt = rng.random_range(0..=ecc_count / 2);
            for i in sample(&mut rng, block.len(), err_cnt).iter() {
                block[i] ^= rng.random_range(1..=255u8);
            }
            assert_eq!(rectify(&mut block, ecc_count), Some(err_cnt));
            assert_eq!(block, exp);
        }
    }

    proptest! {
        #[test]
        fn proptest_single_error_is_fixed(
            data in prop::collection::vec(any::<u8>(), 1..=100),
            pos in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let exp = encode(&data, 7);
            let mut block = exp.clone();
            let i = pos.index(block.len());
            block[i] ^= flip;
            prop_assert_eq!(rectify(&mut block, 7), Some(1));
            prop_assert_eq!(block, exp);
        }
    }
}
