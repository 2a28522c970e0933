//! Error taxonomy for the ACF pipeline.
//!
//! Expressed as a normal Rust error enum rather than a flat status code,
//! but `to_wire_code` can still reproduce a `(component, reason)` byte pair
//! for callers that log a numeric reason code (e.g. a PAM module).

use thiserror::Error;

/// One unified error type for the whole decode/verify/authorize pipeline.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AcfError {
    #[error("operation failed")]
    Failure,
    #[error("ACF version is not supported")]
    UnsupportedVersion,
    #[error("signature verification failed")]
    SignatureNotValid,
    #[error("password does not match the ACF's hashed auth code")]
    PasswordNotValid,
    #[error("ACF has expired")]
    AcfExpired,
    #[error("device serial number does not match any machine entry")]
    SerialNumberMismatch,
    #[error("failed to allocate scratch space for JSON payload")]
    JsonDataAllocationFailure,
    #[error("replay id required but missing")]
    MissingReplayId,
    #[error("unsupported ACF type")]
    UnsupportedAcfType,
    #[error("replay id is not valid for this ACF type")]
    InvalidReplayId,
    #[error("persisted replay id was never updated at upload time")]
    ReplayIdPersistenceFailure,
    #[error("a replay id was present but this upload mode forbids one")]
    PowerVmRequestedReplayFailure,

    // --- decode (DecodeHsf_*) ---
    #[error("JSON payload is not valid UTF-8/JSON")]
    DecodeJsonParseFailure,
    #[error("JSON `version` field is missing or not an integer")]
    DecodeReadVersionFailure,
    #[error("JSON `type` field is missing or unrecognized")]
    DecodeReadTypeFailure,
    #[error("JSON `machines` field is missing or not an array")]
    DecodeReadMachineArrayFailure,
    #[error("`machines` array must be non-empty")]
    DecodeMachineArrayInvalidLength,
    #[error("a machine entry is missing `serialNumber`")]
    DecodeReadSerialNumberFailure,
    #[error("a machine entry is missing or has an unrecognized `frameworkEc`")]
    DecodeReadFrameworkEcFailure,
    #[error("JSON `hashedAuthCode` field is missing or not valid hex")]
    DecodeReadHashedAuthCodeFailure,
    #[error("JSON `salt` field is missing or not valid hex")]
    DecodeReadSaltFailure,
    #[error("JSON `iterations` field is missing or not a positive integer")]
    DecodeReadIterationsFailure,
    #[error("JSON `expiration` field is missing or malformed")]
    DecodeReadExpirationFailure,
    #[error("JSON `requestId` field is missing")]
    DecodeReadRequestIdFailure,
    #[error("JSON `adminAuthCode` field is missing or not valid hex")]
    DecodeReadAdminAuthCodeFailure,
    #[error("JSON `asciiScriptFile` field is missing or oversized")]
    DecodeReadAsciiScriptFailure,
    #[error("JSON `bmcTimeout` field is missing or not an integer")]
    DecodeReadBmcTimeoutFailure,
    #[error("JSON `issueBmcDump` field is missing or not a boolean")]
    DecodeReadIssueBmcDumpFailure,

    // --- verify (VerifyAcf_*) ---
    #[error("failed to decode the outer ASN.1 sequence")]
    VerifyAsnDecodeFailure,
    #[error("algorithm OID does not match the expected signature algorithm")]
    VerifyOidMismatchFailure,
    #[error("processing type does not match the expected product tag")]
    VerifyProcessingTypeMismatch,
    #[error("failed to import the public key")]
    VerifyPublicKeyImportFailure,
    #[error("one or more required parameters were invalid")]
    VerifyInvalidParm,

    // --- authorize (DetermineAuth_* / GetSevAuth_* / GetAuthFromFrameworkEc_*) ---
    #[error("ACF pointer/buffer was empty")]
    GetSevAuthInvalidAcf,
    #[error("password was required but empty")]
    GetSevAuthInvalidPassword,
    #[error("public key buffer was empty")]
    GetSevAuthInvalidPublicKey,
    #[error("serial number buffer was empty")]
    GetSevAuthInvalidSerialNumber,
    #[error("frameworkEc string did not match any known product generation")]
    GetAuthFromFrameworkEcInvalid,

    // --- primitives (CreateDigest_* / CreatePasswordHash_* / HexToBin_* / DateFromString_* / GetUnsignedIntFromString_*) ---
    #[error("digest input was empty")]
    CreateDigestInvalidInput,
    #[error("digest backend call failed")]
    CreateDigestBackendFailure,
    #[error("password hash requires a nonzero iteration count")]
    CreatePasswordHashZeroIterations,
    #[error("iteration count does not fit in a signed 32-bit range")]
    CreatePasswordHashIterationTooLarge,
    #[error("password hash output length request was invalid")]
    CreatePasswordHashInvalidOutputLength,
    #[error("password hash backend call failed")]
    CreatePasswordHashBackendFailure,
    #[error("hex string has an odd number of characters")]
    HexToBinOddLength,
    #[error("hex string contains a non-hex character or overflows the output buffer")]
    HexToBinInvalidHexString,
    #[error("date string is not in yyyy-mm-dd form")]
    DateFromStringInvalidFormat,
    #[error("date component must be positive")]
    DateFromStringNonPositiveComponent,
    #[error("base64 input length is not a multiple of 4")]
    Base64InvalidLength,
    #[error("base64 input contains invalid characters")]
    Base64InvalidInput,
    #[error("integer string is empty, too long, or contains a non-digit")]
    GetUnsignedIntFromStringInvalid,

    // --- orchestrator / adapter ---
    #[error("collaborator I/O failed: {0}")]
    SystemError(String),
    #[error("field mode could not be determined")]
    FieldModeUnreadable,
}

impl AcfError {
    /// Reproduce a `(component, reason)` byte pair for callers that expect
    /// a numeric wire code rather than a typed error. Component is always
    /// `0` (`Base`) — JSON errors are handled by `serde_json` rather than
    /// a bespoke parser with its own component space.
    pub fn to_wire_code(&self) -> (u8, u8) {
        use AcfError::*;
        let reason: u8 = match self {
            Failure => 0x01,
            UnsupportedVersion => 0x02,
            SignatureNotValid => 0x03,
            PasswordNotValid => 0x04,
            AcfExpired => 0x05,
            SerialNumberMismatch => 0x06,
            JsonDataAllocationFailure => 0x07,
            MissingReplayId => 0x08,
            UnsupportedAcfType => 0x09,
            InvalidReplayId => 0x0A,
            ReplayIdPersistenceFailure => 0x0B,
            PowerVmRequestedReplayFailure => 0x0C,

            VerifyAsnDecodeFailure => 0x30,
            VerifyOidMismatchFailure => 0x31,
            VerifyPublicKeyImportFailure => 0x34,
            VerifyInvalidParm => 0x35,
            VerifyProcessingTypeMismatch => 0x38,

            DecodeJsonParseFailure => 0x25,
            DecodeReadVersionFailure => 0x26,
            DecodeReadTypeFailure => 0x26,
            DecodeReadSerialNumberFailure => 0x27,
            DecodeReadFrameworkEcFailure => 0x28,
            DecodeReadMachineArrayFailure => 0x29,
            DecodeMachineArrayInvalidLength => 0x2A,
            DecodeReadHashedAuthCodeFailure => 0x2B,
            DecodeReadExpirationFailure => 0x2C,
            DecodeReadRequestIdFailure => 0x2D,
            DecodeReadSaltFailure => 0x2E,
            DecodeReadIterationsFailure => 0x2F,
            DecodeReadAdminAuthCodeFailure => 0x50,
            DecodeReadAsciiScriptFailure => 0x50,
            DecodeReadBmcTimeoutFailure => 0x50,
            DecodeReadIssueBmcDumpFailure => 0x50,

            GetSevAuthInvalidAcf => 0xD0,
            GetSevAuthInvalidPassword => 0xD2,
            GetSevAuthInvalidPublicKey => 0xD4,
            GetSevAuthInvalidSerialNumber => 0xD6,
            GetAuthFromFrameworkEcInvalid => 0xC1,

            CreateDigestInvalidInput => 0xA0,
            CreateDigestBackendFailure => 0xA4,
            CreatePasswordHashZeroIterations => 0x97,
            CreatePasswordHashIterationTooLarge => 0x98,
            CreatePasswordHashInvalidOutputLength => 0x93,
            CreatePasswordHashBackendFailure => 0x94,
            HexToBinOddLength => 0x61,
            HexToBinInvalidHexString => 0x61,
            DateFromStringInvalidFormat => 0x71,
            DateFromStringNonPositiveComponent => 0x70,
            Base64InvalidLength => 0x01,
            Base64InvalidInput => 0x01,
            GetUnsignedIntFromStringInvalid => 0xB3,

            SystemError(_) => 0x01,
            FieldModeUnreadable => 0x01,
        };
        (0u8, reason)
    }
}

pub type AcfResult<T> = Result<T, AcfError>;
