//! Fixed numeric and string limits pulled from the reference implementation.

/// OID for `sha512WithRSAEncryption`, the only algorithm an ACF's outer
/// `AlgorithmIdentifier` is permitted to name.
pub const SIGNATURE_ALGORITHM_OID: &str = "1.2.840.113549.1.1.13";

/// Product tag compared against an ACF's `processingType` field.
/// Integrators building against a different product line should fork this
/// constant rather than patch the decoder.
pub const PROCESSING_TYPE: &str = "ce-login-acf-v1";

/// Maximum length, in bytes, of a decoded admin reset auth code.
pub const ADMIN_AUTH_CODE_MAX_LEN: usize = 256;

/// Maximum length, in bytes, of an ASCII script file carried by a
/// resource-dump or BMC-shell ACF.
pub const MAX_ASCII_SCRIPT_FILE_LENGTH: usize = 1024;

/// Default PBKDF2 iteration count used when an ACF omits `iterations`.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

/// Sentinel serial number meaning "matches any device".
pub const UNSET_SERIAL_NUM_KEYWORD: &str = "UNSET";

/// Sentinel serial number meaning "no serial programmed" (seven spaces).
pub const BLANK_SERIAL_NUMBER: &str = "       ";
