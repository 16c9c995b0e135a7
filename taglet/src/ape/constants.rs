pub(super) const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];

// https://wiki.hydrogenaud.io/index.php?title=APE_Tags_Header
pub(crate) const APE_PREAMBLE: &[u8; 8] = b"APETAGEX";

/// Size of an APE tag header or footer
pub(crate) const APE_HEADER_LEN: u32 = 32;

pub(crate) const FLAG_READ_ONLY: u32 = 1;
pub(crate) const FLAG_IS_HEADER: u32 = 1 << 29;
pub(crate) const FLAG_HAS_FOOTER: u32 = 1 << 30;
pub(crate) const FLAG_HAS_HEADER: u32 = 1 << 31;
