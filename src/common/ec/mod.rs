#[cfg(test)]
mod decoder;
mod encoder;
mod galois;

#[cfg(test)]
pub(crate) use decoder::*;
pub use encoder::*;

// Max codewords in a Reed-Solomon block over GF(256)
pub(crate) const MAX_BLOCK_SIZE: usize = 255;

// Max ecc codewords per block across all versions & ec levels
pub(crate) const MAX_EC_SIZE: usize = 30;
