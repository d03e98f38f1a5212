//! Per-party signing (`spec.md` §4.5), ported from
//! `examples/original_source/src/crypto-tss-rsa/RSAPrivateKeyShare.cpp`'s
//! `InternalSign`/`Sign`.

use num_bigint::BigUint;

use crate::bigint::{self, Modulo};
use crate::proof;
use crate::types::{KeyMeta, PrivateShare, PublicKey, SigShare};

impl PrivateShare {
    /// Signs `doc` and returns this party's signature share, with its
    /// attached proof of correct exponentiation.
    ///
    /// `doc` is treated as an already-encoded message representative (the
    /// output of `pss::encode_pss`, or any other representative the caller
    /// chooses) — this never applies PSS encoding itself.
    pub fn sign(&self, doc: &[u8], key_meta: &KeyMeta, public_key: &PublicKey) -> SigShare {
        let x = bigint::os2ip(doc);
        self.internal_sign(&x, key_meta, public_key)
    }

    fn internal_sign(&self, x: &BigUint, key_meta: &KeyMeta, public_key: &PublicKey) -> SigShare {
        let m = Modulo::new(&public_key.n);

        // x = x * vku^e mod n, if jacobi(x, n) == -1 — folds x into the
        // Jacobi-residue subgroup J_n so x^(2 s_i) is well-defined.
        let x = if bigint::jacobi(x, &public_key.n) == -1 {
            m.mul(x, &m.pow(&key_meta.vku, &public_key.e))
        } else {
            x.clone()
        };

        let x_i = m.pow(&x, &(BigUint::from(2u32) * &self.s_i));

        let proof = proof::prove(&self.s_i, &key_meta.vkv, key_meta.vki(self.i), &x, &public_key.n, &x_i);

        SigShare {
            index: self.i,
            sig_share: x_i,
            z: proof.z,
            c: proof.c,
        }
    }
}
