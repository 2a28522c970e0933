//! DER decode of the outer ACF capsule: `SEQUENCE { AlgorithmIdentifier,
//! PrintableString processingType, OCTET STRING sourceFileData,
//! OCTET STRING signature }`.
//!
//! The owned [`AcfCapsule`] is detached from the input buffer immediately
//! after decode so the pipeline never carries borrowed slices past this
//! point.

use crate::error::AcfError;
use der::asn1::{OctetStringRef, PrintableStringRef};
use der::{Decode, Sequence};
use spki::AlgorithmIdentifierOwned;

#[derive(Debug, Sequence)]
struct RawCapsule<'a> {
    algorithm: AlgorithmIdentifierOwned,
    processing_type: PrintableStringRef<'a>,
    source_file_data: OctetStringRef<'a>,
    signature: OctetStringRef<'a>,
}

/// Owned, detached form of a decoded capsule.
pub(crate) struct AcfCapsule {
    pub algorithm_oid: String,
    pub processing_type: String,
    pub source_file_data: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Decode the outer sequence. `der::Decode::from_der` rejects trailing
/// bytes and malformed length encodings on its own; this wrapper only adds
/// the error mapping and detaches the borrowed fields into owned buffers.
pub(crate) fn decode_capsule(der_bytes: &[u8]) -> Result<AcfCapsule, AcfError> {
    let raw = RawCapsule::from_der(der_bytes).map_err(|_| AcfError::VerifyAsnDecodeFailure)?;
    Ok(AcfCapsule {
        algorithm_oid: raw.algorithm.oid.to_string(),
        processing_type: raw.processing_type.as_str().to_string(),
        source_file_data: raw.source_file_data.as_bytes().to_vec(),
        signature: raw.signature.as_bytes().to_vec(),
    })
}

#[cfg(test)]
pub(crate) fn encode_capsule(
    oid: &str,
    processing_type: &str,
    source_file_data: &[u8],
    signature: &[u8],
) -> Vec<u8> {
    use der::oid::ObjectIdentifier;
    use der::Encode;

    let raw = RawCapsule {
        algorithm: AlgorithmIdentifierOwned {
            oid: ObjectIdentifier::new_unwrap(oid),
            parameters: None,
        },
        processing_type: PrintableStringRef::new(processing_type).expect("valid printable string"),
        source_file_data: OctetStringRef::new(source_file_data).expect("valid octet string"),
        signature: OctetStringRef::new(signature).expect("valid octet string"),
    };
    raw.to_der().expect("encode capsule")
}
