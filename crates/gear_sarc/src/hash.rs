//! Name hashing

use crate::error::{Error, Result};

/// Multiplier stored in the SFAT header and used by [`name_hash`]
pub const HASH_MULTIPLIER: u32 = 0x65;

/// Hash of a file name, the key the hash table is sorted by.
///
/// ```
/// assert_eq!(gear_sarc::name_hash(""), 0);
/// assert_eq!(gear_sarc::name_hash("a"), 0x61);
/// assert_eq!(gear_sarc::name_hash("ab"), 0x61 * 0x65 + 0x62);
/// ```
pub fn name_hash(name: &str) -> u32 {
    name.chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(c as u32))
}

/// Parse the hash out of the name of a file in a hash only archive.
///
/// Everything from the first `.` on is ignored; what remains must be exactly eight
/// hex digits.
pub fn hash_from_name(name: &str) -> Result<u32> {
    let stem = name.split('.').next().unwrap_or(name);

    if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::EncodingPrecondition(format!(
            "{name:?} does not start with an 8 digit hex hash"
        )));
    }

    u32::from_str_radix(stem, 16)
        .map_err(|e| Error::EncodingPrecondition(format!("{name:?} does not start with a hex hash: {e}")))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::hash::{hash_from_name, name_hash};

    #[test]
    fn hash_orders_names() {
        let mut names = ["b.txt", "a.txt", "c.txt"];
        names.sort_by_key(|name| name_hash(name));

        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
        assert_eq!(name_hash("a.txt"), 0x5C89_7AA7);
        assert_eq!(name_hash("c.txt"), 0x68F1_2689);
    }

    #[test]
    fn hash_wraps() {
        let long = "a".repeat(64);
        let expected = (0..64).fold(0u32, |h, _| h.wrapping_mul(0x65).wrapping_add(0x61));

        assert_eq!(name_hash(&long), expected);
    }

    #[test]
    fn hash_from_hex_names() -> Result<()> {
        assert_eq!(hash_from_name("0000000A")?, 0xA);
        assert_eq!(hash_from_name("DEADBEEF.bfres")?, 0xDEAD_BEEF);
        assert_eq!(hash_from_name("0badf00d.a.b")?, 0x0BAD_F00D);

        Ok(())
    }

    #[test]
    fn hash_from_bad_names() {
        assert!(matches!(hash_from_name("ABC"), Err(Error::EncodingPrecondition(_))));
        assert!(matches!(hash_from_name("123456789"), Err(Error::EncodingPrecondition(_))));
        assert!(matches!(hash_from_name("GGGGGGGG.bin"), Err(Error::EncodingPrecondition(_))));
        assert!(matches!(hash_from_name(".00000000"), Err(Error::EncodingPrecondition(_))));
        assert!(matches!(hash_from_name("+1234567"), Err(Error::EncodingPrecondition(_))));
    }
}
