//! Error kinds returned across the public API boundary (`spec.md` §7).
//!
//! Every public entry point returns an explicit `Result`; none of them raise
//! control-flow exceptions for ordinary failure. `VerifyFailure` is
//! deliberately absent here: PSS and signature verification report failure
//! as `false`, never as an `Err` (see `pss::verify_pss` and
//! `types::PublicKey::verify_signature`).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `keyBits` not in {1024, 2048, 3072, 4096}; `l`/`k` out of range; a
    /// supplied `KeyGenParam` field fails one of the invariants in §3; or a
    /// PSS length constraint is violated.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A signature share's proof failed to verify, or its index was zero,
    /// duplicated, or out of range.
    #[error("invalid share: {0}")]
    InvalidShare(String),

    /// A tagged record was malformed, its base64/hex was invalid, or a
    /// post-decode invariant (e.g. a zero index) was violated.
    #[error("decode failure: {0}")]
    DecodeFailure(String),
}

impl Error {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    pub fn invalid_share(msg: impl Into<String>) -> Self {
        Error::InvalidShare(msg.into())
    }

    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Error::DecodeFailure(msg.into())
    }
}
