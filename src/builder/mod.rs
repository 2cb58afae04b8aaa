mod qr;
mod symbol;

#[cfg(test)]
pub(crate) use qr::Module;
pub(crate) use qr::QR;
pub use symbol::Symbol;

use std::ops::Deref;

use log::debug;

use crate::common::{
    codec::{encode_with_version, find_version, Charset, Mode, Payload},
    ec::ecc,
    error::QRResult,
    mask::{apply_best_mask, compute_total_penalty, evaluate_masks, MaskPattern},
    metadata::{ECLevel, Version},
    BitStream,
};

/// Configures and builds a [`Symbol`].
///
/// ```
/// use qrsmith::{ECLevel, QRBuilder};
///
/// let symbol = QRBuilder::new("HELLO WORLD").ec_level(ECLevel::Q).build().unwrap();
/// assert_eq!(symbol.width(), 21);
/// ```
#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    payload: Payload<'a>,
    ec_level: ECLevel,
    charset: Charset,
    fold_case: bool,
    mode: Option<Mode>,
    min_version: Version,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_payload(Payload::Text(text))
    }

    /// Raw bytes are emitted as is when they fall back to byte mode.
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self::with_payload(Payload::Bytes(data))
    }

    fn with_payload(payload: Payload<'a>) -> Self {
        Self {
            payload,
            ec_level: ECLevel::H,
            charset: Charset::default(),
            fold_case: true,
            mode: None,
            min_version: Version::MIN,
            mask: None,
        }
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Charset text is converted to in byte mode.
    pub fn charset(&mut self, charset: Charset) -> &mut Self {
        self.charset = charset;
        self
    }

    /// Whether lowercase letters may be upper cased to fit alphanumeric mode.
    pub fn fold_case(&mut self, fold_case: bool) -> &mut Self {
        self.fold_case = fold_case;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn unset_mode(&mut self) -> &mut Self {
        self.mode = None;
        self
    }

    /// Smallest version considered. A larger one is picked if the data doesn't fit.
    pub fn min_version(&mut self, version: Version) -> &mut Self {
        self.min_version = version;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let mode = self.mode.map_or("Auto".to_string(), |m| format!("{m:?}"));
        let mask = self.mask.map_or("Auto".to_string(), |m| (*m).to_string());
        format!(
            "{{ Min version: {}, Ec level: {:?}, Mode: {mode}, Charset: {:?}, Mask: {mask} }}",
            self.min_version, self.ec_level, self.charset
        )
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Symbol> {
        let (mut qr, mode) = self.placed_grid()?;

        let (mask, penalty) = match self.mask {
            Some(m) => {
                debug!("Applying mask {}...", *m);
                qr.apply_mask(m);
                (m, compute_total_penalty(&qr))
            }
            None => {
                debug!("Finding & applying best mask...");
                apply_best_mask(&mut qr)
            }
        };
        debug!("Mask {} applied with penalty {penalty}", *mask);

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "Dark modules: {dark_modules}, Light modules: {}, Balance: {}%",
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(Symbol::new(&qr, mode, mask, penalty))
    }

    /// Total penalty under each of the 8 masks, indexed by mask, for the grid this builder
    /// produces before masking.
    pub fn evaluate_masks(&self) -> QRResult<[u32; 8]> {
        let (qr, _) = self.placed_grid()?;
        Ok(evaluate_masks(&qr))
    }

    // Function patterns, infos and codewords drawn, not yet masked
    pub(crate) fn placed_grid(&self) -> QRResult<(QR, Mode)> {
        debug!("Generating QR {}...", self.metadata());

        // Encode data in narrowest mode unless one is forced
        let (mode, data) = match self.mode {
            Some(m) => (m, self.payload.with_mode(m, self.charset, self.fold_case)?),
            None => self.payload.classify(self.charset, self.fold_case)?,
        };
        debug!("Encoding {} characters in {mode:?} mode...", data.len());

        let version = find_version(data.len(), mode, self.ec_level, self.min_version)?;
        debug!(
            "Version {version} selected. Data capacity: {}, Error capacity: {}",
            version.char_capacity(self.ec_level, mode),
            version.error_correction_capacity(self.ec_level)
        );

        let encoded_data = encode_with_version(&data, mode, self.ec_level, version);

        debug!("Constructing payload with ecc & interleaving...");
        let payload = Self::construct_payload(encoded_data.data(), version, self.ec_level)?;

        debug!("Drawing functional patterns & encoding region...");
        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);

        Ok((qr, mode))
    }

    // Interleaved data codewords followed by interleaved ecc codewords
    fn construct_payload(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<BitStream> {
        let (data_blocks, ecc_blocks) = Self::compute_ecc(data, version, ec_level)?;

        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));
        Ok(payload)
    }

    // ECC: Error Correction Codeword generator
    fn compute_ecc(
        data: &[u8],
        version: Version,
        ec_level: ECLevel,
    ) -> QRResult<(Vec<&[u8]>, Vec<Vec<u8>>)> {
        let data_blocks = Self::blockify(data, version, ec_level);

        let ecc_size_per_block = version.ecc_per_block(ec_level);
        let ecc_blocks =
            data_blocks.iter().map(|b| ecc(b, ecc_size_per_block)).collect::<QRResult<Vec<_>>>()?;

        Ok((data_blocks, ecc_blocks))
    }

    pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
        let (block1_size, block1_count, block2_size, block2_count) =
            version.data_codewords_per_block(ec_level);

        let total_blocks = block1_count + block2_count;
        let total_block1_size = block1_size * block1_count;
        let total_size = total_block1_size + block2_size * block2_count;

        debug_assert!(
            total_size == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            total_size
        );

        let mut data_blocks = Vec::with_capacity(total_blocks);
        data_blocks.extend(data[..total_block1_size].chunks(block1_size));
        if block2_size > 0 {
            data_blocks.extend(data[total_block1_size..].chunks(block2_size));
        }
        data_blocks
    }

    pub(crate) fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod builder_tests {
    use rand::{rng, seq::index::sample, Rng};
    use test_case::test_case;

    use super::{Symbol, QR, QRBuilder};
    use crate::builder::Module;
    use crate::common::{
        ec::rectify, encode_with_version, Charset, ECLevel, EncRegionIter, MaskPattern, Mode,
        Payload, QRError, Version,
    };

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (data, ecc) = QRBuilder::compute_ecc(msg, Version::MIN, ECLevel::M).unwrap();
        assert_eq!(data, [&msg[..]]);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_add_ec_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let version = Version::new(5).unwrap();
        let (data, ecc) = QRBuilder::compute_ecc(msg, version, ECLevel::Q).unwrap();
        assert_eq!(data.iter().map(|b| b.len()).collect::<Vec<_>>(), [15, 15, 16, 16]);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = QRBuilder::interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
        assert_eq!(QRBuilder::interleave::<u8, Vec<u8>>(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_construct_payload() {
        let version = Version::new(5).unwrap();
        let data = (0..62).collect::<Vec<u8>>();
        let payload = QRBuilder::construct_payload(&data, version, ECLevel::Q).unwrap();
        assert_eq!(payload.len(), version.total_codewords() << 3);
        // Data of 4 blocks, 15, 15, 16, 16 long, one codeword at a time
        assert_eq!(payload.data()[..8], [0, 15, 30, 46, 1, 16, 31, 47]);
        // Extra codewords of the longer blocks come last
        assert_eq!(payload.data()[60..62], [45, 61]);
    }

    #[test_case("HELLO WORLD", ECLevel::M, Mode::Alphanumeric, 1)]
    #[test_case("hello world", ECLevel::Q, Mode::Alphanumeric, 1)]
    #[test_case("", ECLevel::H, Mode::Numeric, 1)]
    #[test_case("0123456789012345678901234567890123456789", ECLevel::M, Mode::Numeric, 2)]
    #[test_case("Hello, world!", ECLevel::L, Mode::Byte, 1)]
    #[test_case("Grüße aus Köln", ECLevel::H, Mode::Byte, 2)]
    fn test_build(data: &str, ecl: ECLevel, mode: Mode, ver: u8) {
        let sym = QRBuilder::new(data).ec_level(ecl).build().unwrap();
        assert_eq!(sym.mode(), mode);
        assert_eq!(*sym.version(), ver);
        assert_eq!(sym.ec_level(), ecl);
    }

    #[test]
    fn test_build_numeric_l_v3() {
        let data = "1".repeat(120);
        let sym = QRBuilder::new(&data).ec_level(ECLevel::L).build().unwrap();
        assert_eq!(*sym.version(), 3);
        assert_eq!(sym.width(), 29);
    }

    #[test]
    fn test_min_version() {
        let sym =
            QRBuilder::new("42").min_version(Version::new(10).unwrap()).build().unwrap();
        assert_eq!(*sym.version(), 10);
        let data = "A".repeat(500);
        let sym = QRBuilder::new(&data)
            .ec_level(ECLevel::M)
            .min_version(Version::new(2).unwrap())
            .build()
            .unwrap();
        assert_eq!(*sym.version(), 14);
    }

    #[test]
    fn test_default_ec_level() {
        let sym = QRBuilder::new("DEFAULTS").build().unwrap();
        assert_eq!(sym.ec_level(), ECLevel::H);
        assert_eq!(sym.mode(), Mode::Alphanumeric);
    }

    #[test]
    fn test_forced_mode() {
        let sym = QRBuilder::new("12345").mode(Mode::Byte).build().unwrap();
        assert_eq!(sym.mode(), Mode::Byte);
        assert_eq!(
            QRBuilder::new("123a5").mode(Mode::Numeric).build(),
            Err(QRError::UnencodableInput { mode: Mode::Numeric, position: 3 })
        );
    }

    #[test]
    fn test_unencodable_latin1() {
        assert_eq!(
            QRBuilder::new("snow ☃").build(),
            Err(QRError::UnencodableInput { mode: Mode::Byte, position: 5 })
        );
        let sym = QRBuilder::new("snow ☃").charset(Charset::Utf8).build().unwrap();
        assert_eq!(sym.mode(), Mode::Byte);
    }

    #[test]
    fn test_data_too_large() {
        let data = "1234567890".repeat(306);
        assert_eq!(
            QRBuilder::new(&data).ec_level(ECLevel::H).build(),
            Err(QRError::DataTooLarge {
                len: 3060,
                capacity: 3057,
                mode: Mode::Numeric,
                ec_level: ECLevel::H
            })
        );
    }

    #[test]
    fn test_forced_mask() {
        for mask in MaskPattern::all() {
            let sym = QRBuilder::new("MASKED").mask(mask).build().unwrap();
            assert_eq!(sym.mask(), mask);
        }
    }

    #[test]
    fn test_best_mask_has_least_penalty() {
        let builder = QRBuilder::new("Penalty check, 123");
        let penalties = builder.evaluate_masks().unwrap();
        let sym = builder.build().unwrap();
        let min = *penalties.iter().min().unwrap();
        assert_eq!(sym.penalty(), min);
        assert_eq!(penalties[*sym.mask() as usize], min);
        assert!(penalties[..*sym.mask() as usize].iter().all(|&p| p > min));
    }

    // Reads codewords back from a symbol, undoing the mask
    fn read_codewords(sym: &Symbol) -> Vec<u8> {
        let mut template = QR::new(sym.version(), sym.ec_level());
        template.draw_all_function_patterns();
        template.draw_version_info();
        template.reserve_format_area();

        let mask_fn = sym.mask().mask_functions();
        let bits = EncRegionIter::new(sym.version())
            .filter(|&(r, c)| matches!(template.get(r, c), Module::Empty))
            .map(|(r, c)| sym.get(r as usize, c as usize) ^ mask_fn(r, c))
            .collect::<Vec<_>>();
        bits.chunks_exact(8).map(|b| b.iter().fold(0, |acc, &bit| (acc << 1) | bit as u8)).collect()
    }

    // Splits interleaved codewords into blocks of data followed by ecc
    fn deinterleave(codewords: &[u8], version: Version, ecl: ECLevel) -> Vec<Vec<u8>> {
        let (d1, c1, d2, c2) = version.data_codewords_per_block(ecl);
        let sizes = [vec![d1; c1], vec![d2; c2]].concat();
        let mut blocks = vec![vec![]; sizes.len()];
        let mut it = codewords.iter().copied();
        for i in 0..d2.max(d1) {
            for (b, &size) in blocks.iter_mut().zip(&sizes) {
                if i < size {
                    b.extend(it.next());
                }
            }
        }
        for _ in 0..version.ecc_per_block(ecl) {
            for b in blocks.iter_mut() {
                b.extend(it.next());
            }
        }
        blocks
    }

    #[test_case("HELLO WORLD", ECLevel::Q)]
    #[test_case("https://example.com/some/long/path?query=value&other=thing", ECLevel::L)]
    #[test_case(&"3141592653".repeat(30), ECLevel::M)]
    #[test_case(&"Reed Solomon ".repeat(40), ECLevel::H)]
    #[test_case(&"z".repeat(2331), ECLevel::M)]
    fn test_symbol_is_recoverable(data: &str, ecl: ECLevel) {
        let sym = QRBuilder::new(data).ec_level(ecl).build().unwrap();
        let (ver, mode) = (sym.version(), sym.mode());
        let (_, exp_data) = Payload::Text(data).classify(Charset::Latin1, true).unwrap();
        let exp = encode_with_version(&exp_data, mode, ecl, ver);

        let codewords = read_codewords(&sym);
        assert_eq!(codewords.len(), ver.total_codewords());

        let mut rng = rng();
        let ecc_count = ver.ecc_per_block(ecl);
        let mut recovered = vec![];
        for mut block in deinterleave(&codewords, ver, ecl) {
            let dlen = block.len() - ecc_count;
            let err_cnt = rng.random_range(0..=ecc_count / 2);
            for i in sample(&mut rng, block.len(), err_cnt).iter() {
                block[i] ^= rng.random_range(1..=255u8);
            }
            assert_eq!(rectify(&mut block, ecc_count), Some(err_cnt));
            recovered.extend_from_slice(&block[..dlen]);
        }
        assert_eq!(recovered, exp.data());
    }
}
