//! # qrsmith
//!
//! A Rust library for encoding text and bytes into QR Code symbols (Model 2, versions 1 to 40)
//! with Reed-Solomon error correction. The output is the module grid, without quiet zone or
//! any rendering.
//!
//! ## Features
//!
//! - **Mode Selection**: Numeric, alphanumeric or byte mode, picked as the narrowest fit unless forced
//! - **Version Selection**: Smallest version from a configurable minimum that holds the data
//! - **Reed-Solomon Error Correction**: Error correction levels L, M, Q and H
//! - **Mask Selection**: Penalty scoring of all 8 masks, or a forced mask
//!
//! ## Quick Start
//!
//! ```rust
//! use qrsmith::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let symbol = QRBuilder::new("Hello, World!").build()?;
//!
//! for row in symbol.rows() {
//!     let line: String = row.iter().map(|&dark| if dark { '#' } else { ' ' }).collect();
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsmith::{Charset, ECLevel, MaskPattern, Mode, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new("hello world")
//!     .min_version(Version::new(2)?)   // Smallest version considered - grows if data doesn't fit
//!     .ec_level(ECLevel::Q)            // Error correction level - defaults to ECLevel::H
//!     .fold_case(false)                // Keep lowercase out of alphanumeric mode
//!     .charset(Charset::Utf8)          // Byte mode charset - defaults to Charset::Latin1
//!     .mask(MaskPattern::new(3)?)      // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! assert_eq!(symbol.mode(), Mode::Byte);
//! assert_eq!(symbol.width(), 25);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Each build stage is reported through the [`log`](https://docs.rs/log) facade at `debug`
//! level, and every mask penalty at `trace` level. Install any logger to see them.

#![allow(
    clippy::items_after_test_module,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, Symbol};
pub use common::codec::{Charset, Mode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{BlockGroup, ECLevel, Version};
pub use common::version_db::{block_layout, max_capacity, total_bits};
