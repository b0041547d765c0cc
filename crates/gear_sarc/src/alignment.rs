//! Data alignment by content type

/// Alignment used for payloads no rule matches
pub const DEFAULT_ALIGNMENT: u64 = 4;

enum Signature {
    /// Payload starts with these bytes
    Prefix(&'static [u8]),
    /// Payload has these bytes after any single leading byte
    Skip1(&'static [u8]),
}

impl Signature {
    fn matches(&self, data: &[u8]) -> bool {
        match self {
            Signature::Prefix(magic) => data.starts_with(magic),
            Signature::Skip1(magic) => data.get(1..).is_some_and(|rest| rest.starts_with(magic)),
        }
    }
}

#[rustfmt::skip]
const RULES: &[(Signature, u64)] = &[
    (Signature::Prefix(b"SARC"), 0x2000),
    (Signature::Prefix(b"Yaz"), 0x80),
    (Signature::Prefix(b"YB"), 0x80),
    (Signature::Prefix(b"BY"), 0x80),
    (Signature::Prefix(b"FRES"), 0x2000),
    (Signature::Prefix(b"Gfx2"), 0x2000),
    (Signature::Prefix(b"AAHS"), 0x2000),
    (Signature::Prefix(b"BAHS"), 0x2000),
    (Signature::Prefix(b"BNTX"), 0x1000),
    (Signature::Prefix(b"BNSH"), 0x1000),
    (Signature::Prefix(b"FSHA"), 0x1000),
    (Signature::Prefix(b"FFNT"), 0x2000),
    (Signature::Prefix(b"CFNT"), 0x80),
    (Signature::Skip1(b"STM"), 0x20),
    (Signature::Skip1(b"WAV"), 0x20),
    (Signature::Prefix(b"FSTP"), 0x20),
    (Signature::Prefix(b"CTPK"), 0x10),
    (Signature::Prefix(b"CGFX"), 0x80),
    (Signature::Prefix(b"AAMP"), 8),
    (Signature::Prefix(b"MsgStdBn"), 0x80),
    (Signature::Prefix(b"MsgPrjBn"), 0x80),
];

/// Alignment a payload should start on inside the data region, guessed from its
/// leading bytes.
///
/// ```
/// use gear_sarc::guess_file_alignment;
///
/// assert_eq!(guess_file_alignment(b"Yaz0\x00\x00\x10\x00"), 0x80);
/// assert_eq!(guess_file_alignment(b"plain text"), 4);
/// ```
pub fn guess_file_alignment(data: &[u8]) -> u64 {
    RULES
        .iter()
        .find(|(signature, _)| signature.matches(data))
        .map_or(DEFAULT_ALIGNMENT, |&(_, alignment)| alignment)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::alignment::guess_file_alignment;

    #[test]
    fn known_signatures() {
        assert_eq!(guess_file_alignment(b"Yaz0rest"), 0x80);
        assert_eq!(guess_file_alignment(b"BNTX\x00\x00\x00\x00"), 0x1000);
        assert_eq!(guess_file_alignment(b"SARC\x00\x14"), 0x2000);
        assert_eq!(guess_file_alignment(b"FFNT"), 0x2000);
        assert_eq!(guess_file_alignment(b"CTPK"), 0x10);
        assert_eq!(guess_file_alignment(b"AAMP\x02\x00"), 8);
        assert_eq!(guess_file_alignment(b"MsgStdBn\xFE\xFF"), 0x80);
    }

    #[test]
    fn wildcard_first_byte() {
        assert_eq!(guess_file_alignment(b"FSTM"), 0x20);
        assert_eq!(guess_file_alignment(b"CSTM\x00"), 0x20);
        assert_eq!(guess_file_alignment(b"xWAV"), 0x20);
        assert_eq!(guess_file_alignment(b"STM"), 4);
    }

    #[test]
    fn unknown_and_short_payloads() {
        assert_eq!(guess_file_alignment(b"hello"), 4);
        assert_eq!(guess_file_alignment(b"Ya"), 4);
        assert_eq!(guess_file_alignment(&[]), 4);
    }
}
