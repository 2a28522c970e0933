use crate::error::AcfError;
use subtle::ConstantTimeEq;

/// Decode a hex string into at most `max_len` bytes. Fails on odd length,
/// on a non-hex character, and on an output that would exceed `max_len`.
pub fn hex_to_bin(hex_str: &str, max_len: usize) -> Result<Vec<u8>, AcfError> {
    if hex_str.len() % 2 != 0 {
        return Err(AcfError::HexToBinOddLength);
    }
    if hex_str.len() / 2 > max_len {
        return Err(AcfError::HexToBinInvalidHexString);
    }
    hex::decode(hex_str).map_err(|_| AcfError::HexToBinInvalidHexString)
}

/// Decode standard base64. The input length must be a multiple of 4,
/// accounting for 0-2 trailing `=` padding characters.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, AcfError> {
    if input.len() % 4 != 0 {
        return Err(AcfError::Base64InvalidLength);
    }
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input)
        .map_err(|_| AcfError::Base64InvalidInput)
}

/// Constant-time byte comparison. Unequal lengths are not short-circuited
/// into an early return that would leak length via timing beyond what the
/// length itself already reveals structurally.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips() {
        let bytes = hex_to_bin("deadbeef", 16).unwrap();
        assert_eq!(bytes, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn hex_rejects_odd_length() {
        assert_eq!(
            hex_to_bin("abc", 16).unwrap_err(),
            AcfError::HexToBinOddLength
        );
    }

    #[test]
    fn hex_rejects_oversized_output() {
        assert_eq!(
            hex_to_bin("deadbeef", 1).unwrap_err(),
            AcfError::HexToBinInvalidHexString
        );
    }

    #[test]
    fn hex_rejects_non_hex() {
        assert_eq!(
            hex_to_bin("zzzz", 16).unwrap_err(),
            AcfError::HexToBinInvalidHexString
        );
    }

    #[test]
    fn base64_requires_length_multiple_of_four() {
        assert_eq!(
            base64_decode("abc").unwrap_err(),
            AcfError::Base64InvalidLength
        );
    }

    #[test]
    fn base64_decodes_valid_input() {
        assert_eq!(base64_decode("aGVsbG8=").unwrap(), b"hello".to_vec());
    }

    #[test]
    fn constant_time_eq_matches_equal_slices() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
