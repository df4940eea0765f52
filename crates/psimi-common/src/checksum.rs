//! Content checksums used as stable identifiers
//!
//! - **SEGUID**: base64 SHA-1 digest of a normalised sequence, without padding
//! - **ROGID**: SEGUID of a protein sequence followed by its organism taxid
//! - **RIGID**: SEGUID of the sorted, concatenated ROGIDs of an interaction
//! - **CRC64**: SWISS-PROT 64-bit cyclic redundancy check of a sequence

use crate::error::{PsiError, Result};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use sha1::{Digest, Sha1};

/// Reflected SWISS-PROT CRC-64 polynomial.
const CRC64_POLY: u64 = 0xD800_0000_0000_0000;

const CRC64_TABLE: [u64; 256] = build_crc64_table();

const fn build_crc64_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0;
    while i < 256 {
        let mut part = i as u64;
        let mut bit = 0;
        while bit < 8 {
            if part & 1 == 1 {
                part = (part >> 1) ^ CRC64_POLY;
            } else {
                part >>= 1;
            }
            bit += 1;
        }
        table[i] = part;
        i += 1;
    }
    table
}

/// Uppercase a sequence and drop any whitespace (FASTA line breaks etc.).
fn normalise(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Compute the SEGUID of a sequence.
pub fn seguid(sequence: &str) -> Result<String> {
    let normalised = normalise(sequence);
    if normalised.is_empty() {
        return Err(PsiError::Checksum("SEGUID of an empty sequence".to_string()));
    }

    let digest = Sha1::digest(normalised.as_bytes());
    Ok(STANDARD_NO_PAD.encode(digest))
}

/// Compute the ROGID of a protein sequence in the given organism.
pub fn rogid(sequence: &str, tax_id: i32) -> Result<String> {
    Ok(format!("{}{}", seguid(sequence)?, tax_id))
}

/// Compute the RIGID of an interaction from the ROGIDs of its participants.
///
/// Order of the input does not matter; the ROGIDs are sorted before hashing.
pub fn rigid<S: AsRef<str>>(rogids: &[S]) -> Result<String> {
    if rogids.is_empty() {
        return Err(PsiError::Checksum(
            "RIGID needs at least one participant ROGID".to_string(),
        ));
    }

    let mut sorted: Vec<&str> = rogids.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    seguid(&sorted.concat())
}

/// Compute the CRC64 of a sequence as 16 uppercase hex digits.
pub fn crc64(sequence: &str) -> String {
    let crc = normalise(sequence).bytes().fold(0u64, |crc, byte| {
        CRC64_TABLE[((crc ^ u64::from(byte)) & 0xFF) as usize] ^ (crc >> 8)
    });
    format!("{crc:016X}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seguid_known_values() {
        assert_eq!(seguid("ACGT").unwrap(), "IQiZThf2zKn/I1KtqStlEdsHYDQ");
        assert_eq!(seguid("MAAAA").unwrap(), "IZPXYnJCj4F1aDVfrqSitEOEPP4");
    }

    #[test]
    fn test_seguid_normalises_case_and_whitespace() {
        assert_eq!(seguid("ma aa\na").unwrap(), seguid("MAAAA").unwrap());
    }

    #[test]
    fn test_seguid_rejects_empty_sequence() {
        assert!(seguid("").is_err());
        assert!(seguid(" \n").is_err());
    }

    #[test]
    fn test_rogid_appends_taxid() {
        assert_eq!(
            rogid("MKTAYIAKQRQISFVKSHFSRQ", 9606).unwrap(),
            "mxX9X2aOWUk3ChHW0N0w9qTgaH49606"
        );
    }

    #[test]
    fn test_rigid_is_order_independent() {
        let a = rogid("MKTAYIAKQRQISFVKSHFSRQ", 9606).unwrap();
        let b = rogid("MAAAA", 4932).unwrap();

        let forward = rigid(&[a.clone(), b.clone()]).unwrap();
        let backward = rigid(&[b, a]).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward, "hevad33mqd+a+qmnJqJB2QyeLL4");
    }

    #[test]
    fn test_rigid_rejects_empty_input() {
        let none: [&str; 0] = [];
        assert!(rigid(&none).is_err());
    }

    #[test]
    fn test_crc64_known_values() {
        assert_eq!(crc64("MAAAA"), "6DDDDDDDD6F00000");
        assert_eq!(crc64("MKTAYIAKQRQISFVKSHFSRQ"), "B0947C4BDFFF1FE5");
        assert_eq!(crc64(""), "0000000000000000");
    }

    proptest! {
        #[test]
        fn prop_rigid_ignores_participant_order(
            mut rogids in prop::collection::vec("[A-Za-z0-9+/]{27}[0-9]{1,6}", 1..6),
        ) {
            let forward = rigid(&rogids).unwrap();
            rogids.reverse();
            prop_assert_eq!(rigid(&rogids).unwrap(), forward);
        }

        #[test]
        fn prop_checksums_ignore_case(sequence in "[a-zA-Z]{1,64}") {
            let upper = sequence.to_uppercase();
            prop_assert_eq!(seguid(&sequence).unwrap(), seguid(&upper).unwrap());
            prop_assert_eq!(crc64(&sequence), crc64(&upper));
            prop_assert_eq!(crc64(&sequence).len(), 16);
        }
    }
}
