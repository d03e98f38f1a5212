//! Threshold RSA signatures (Shoup 2000), with a non-interactive proof of
//! correct exponentiation per signature share.
//!
//! See `DESIGN.md` for how each module is grounded, and the module-level
//! docs on `keygen`, `signer`, `combiner`, `pss`, `proof`, `lambda` and
//! `vsss` for the scheme itself.

pub mod bigint;
pub mod combiner;
pub mod error;
pub mod hash;
pub mod keygen;
pub mod lambda;
pub mod proof;
pub mod pss;
pub mod serialize;
pub mod signer;
pub mod types;
pub mod vsss;

pub use combiner::{combine_signatures, combine_signatures_unchecked};
pub use error::{Error, Result};
pub use keygen::{generate_key, generate_key_ex};
pub use proof::Proof;
pub use pss::{encode_pss, verify_pss};
pub use types::{KeyGenParam, KeyMeta, PrivateShare, PublicKey, SaltMode, SigShare};
