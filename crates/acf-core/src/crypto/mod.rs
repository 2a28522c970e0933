//! Crypto primitives the rest of the pipeline is built from. Each
//! function returns a single bit of verdict on any internal failure — no
//! partial-success states — matching the "never return maybe" requirement
//! on signature verification.

pub mod digest;
pub mod encoding;
pub mod password_hash;
pub mod signature;

pub use digest::sha512;
pub use encoding::{base64_decode, constant_time_eq, hex_to_bin};
pub use password_hash::derive_password_hash;
pub use signature::verify_signature;
