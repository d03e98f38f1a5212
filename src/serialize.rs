//! Three wire encodings per record type (`spec.md` §4.7): structured
//! binary, base64, and structured text.
//!
//! Plays the role the original's protobuf schema + `ToProtoObject`/
//! `FromProtoObject`/`ToBase64`/`FromBase64`/`ToJsonString`/`FromJsonString`
//! sextet played (see e.g. `RSAPublicKey.cpp`), without carrying a protobuf
//! toolchain this crate has no other use for. Each domain type in
//! `types.rs` gets a `serde`-derived shadow "wire" struct with big integers
//! as uppercase hex strings — `num_bigint::BigUint` has no `Serialize` impl
//! of its own, so the shadow struct is the seam.
//!
//! Base64 uses the standard alphabet with padding (`base64::STANDARD`);
//! that's the one fixed policy this crate commits to, not a per-call
//! choice. The structured-text form borrows the teacher's `pem.rs`
//! `BEGIN label / ... / END label` framing, flattened to `KEY: VALUE` lines
//! since these records have named fields rather than an opaque blob.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::proof::Proof;
use crate::types::{KeyMeta, PrivateShare, PublicKey, SigShare};

fn to_hex(n: &BigUint) -> String {
    hex::encode_upper(n.to_bytes_be())
}

fn from_hex(s: &str) -> Result<BigUint> {
    let bytes = hex::decode(s).map_err(|e| Error::decode_failure(e.to_string()))?;
    Ok(BigUint::from_bytes_be(&bytes))
}

fn to_bin<T: Serialize>(value: &T) -> Vec<u8> {
    bincode::serialize(value).expect("wire structs contain no unserializable types")
}

fn from_bin<'a, T: Deserialize<'a>>(data: &'a [u8]) -> Result<T> {
    bincode::deserialize(data).map_err(|e| Error::decode_failure(e.to_string()))
}

fn to_base64(data: &[u8]) -> String {
    base64::encode(data)
}

fn from_base64(s: &str) -> Result<Vec<u8>> {
    base64::decode(s).map_err(|e| Error::decode_failure(e.to_string()))
}

/// Wraps `body` in a `-----BEGIN label-----` / `-----END label-----` frame.
fn frame_text(label: &str, body: &str) -> String {
    format!("-----BEGIN {0}-----\n{1}-----END {0}-----\n", label, body)
}

/// Parses a `frame_text` envelope back into its body, checking the label.
fn unframe_text<'a>(label: &str, text: &'a str) -> Result<&'a str> {
    let begin = format!("-----BEGIN {label}-----\n");
    let end = format!("-----END {label}-----\n");
    let body_start = text.find(&begin).ok_or_else(|| Error::decode_failure("missing BEGIN frame"))?;
    let body_start = body_start + begin.len();
    let body_end = text[body_start..].find(&end).ok_or_else(|| Error::decode_failure("missing END frame"))?;
    Ok(&text[body_start..body_start + body_end])
}

fn parse_kv_lines(body: &str) -> std::collections::HashMap<String, String> {
    body.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

fn kv_get<'a>(map: &'a std::collections::HashMap<String, String>, key: &str) -> Result<&'a str> {
    map.get(key).map(|s| s.as_str()).ok_or_else(|| Error::decode_failure(format!("missing field {}", key)))
}

#[derive(Serialize, Deserialize)]
struct PublicKeyWire {
    n: String,
    e: String,
}

impl PublicKey {
    pub fn to_binary(&self) -> Vec<u8> {
        to_bin(&PublicKeyWire { n: to_hex(&self.n), e: to_hex(&self.e) })
    }

    pub fn from_binary(data: &[u8]) -> Result<Self> {
        let wire: PublicKeyWire = from_bin(data)?;
        Ok(PublicKey { n: from_hex(&wire.n)?, e: from_hex(&wire.e)? })
    }

    pub fn to_base64_string(&self) -> String {
        to_base64(&self.to_binary())
    }

    pub fn from_base64_string(s: &str) -> Result<Self> {
        Self::from_binary(&from_base64(s)?)
    }

    pub fn to_text(&self) -> String {
        let body = format!("N: {}\nE: {}\n", to_hex(&self.n), to_hex(&self.e));
        frame_text("RSA PUBLIC KEY", &body)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let body = unframe_text("RSA PUBLIC KEY", text)?;
        let map = parse_kv_lines(body);
        Ok(PublicKey { n: from_hex(kv_get(&map, "N")?)?, e: from_hex(kv_get(&map, "E")?)? })
    }
}

#[derive(Serialize, Deserialize)]
struct PrivateShareWire {
    i: u32,
    si: String,
}

impl PrivateShare {
    pub fn to_binary(&self) -> Vec<u8> {
        to_bin(&PrivateShareWire { i: self.i, si: to_hex(&self.s_i) })
    }

    pub fn from_binary(data: &[u8]) -> Result<Self> {
        let wire: PrivateShareWire = from_bin(data)?;
        if wire.i == 0 {
            return Err(Error::decode_failure("index must not be zero"));
        }
        Ok(PrivateShare { i: wire.i, s_i: from_hex(&wire.si)? })
    }

    pub fn to_base64_string(&self) -> String {
        to_base64(&self.to_binary())
    }

    pub fn from_base64_string(s: &str) -> Result<Self> {
        Self::from_binary(&from_base64(s)?)
    }

    pub fn to_text(&self) -> String {
        let body = format!("I: {}\nSI: {}\n", self.i, to_hex(&self.s_i));
        frame_text("RSA PRIVATE KEY SHARE", &body)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let body = unframe_text("RSA PRIVATE KEY SHARE", text)?;
        let map = parse_kv_lines(body);
        let i: u32 = kv_get(&map, "I")?.parse().map_err(|_| Error::decode_failure("I is not a valid integer"))?;
        if i == 0 {
            return Err(Error::decode_failure("index must not be zero"));
        }
        Ok(PrivateShare { i, s_i: from_hex(kv_get(&map, "SI")?)? })
    }
}

#[derive(Serialize, Deserialize)]
struct KeyMetaWire {
    k: u32,
    l: u32,
    vkv: String,
    vki_arr: Vec<String>,
    vku: String,
}

impl KeyMeta {
    pub fn to_binary(&self) -> Vec<u8> {
        to_bin(&KeyMetaWire {
            k: self.k,
            l: self.l,
            vkv: to_hex(&self.vkv),
            vki_arr: self.vki_arr.iter().map(to_hex).collect(),
            vku: to_hex(&self.vku),
        })
    }

    pub fn from_binary(data: &[u8]) -> Result<Self> {
        let wire: KeyMetaWire = from_bin(data)?;
        if wire.k == 0 || wire.l == 0 {
            return Err(Error::decode_failure("k and l must not be zero"));
        }
        let vki_arr = wire.vki_arr.iter().map(|s| from_hex(s)).collect::<Result<Vec<_>>>()?;
        Ok(KeyMeta { k: wire.k, l: wire.l, vkv: from_hex(&wire.vkv)?, vki_arr, vku: from_hex(&wire.vku)? })
    }

    pub fn to_base64_string(&self) -> String {
        to_base64(&self.to_binary())
    }

    pub fn from_base64_string(s: &str) -> Result<Self> {
        Self::from_binary(&from_base64(s)?)
    }

    pub fn to_text(&self) -> String {
        let vki_line = self.vki_arr.iter().map(to_hex).collect::<Vec<_>>().join(",");
        let body = format!("K: {}\nL: {}\nVKV: {}\nVKI_ARR: {}\nVKU: {}\n", self.k, self.l, to_hex(&self.vkv), vki_line, to_hex(&self.vku));
        frame_text("RSA KEY META", &body)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let body = unframe_text("RSA KEY META", text)?;
        let map = parse_kv_lines(body);
        let k: u32 = kv_get(&map, "K")?.parse().map_err(|_| Error::decode_failure("K is not a valid integer"))?;
        let l: u32 = kv_get(&map, "L")?.parse().map_err(|_| Error::decode_failure("L is not a valid integer"))?;
        if k == 0 || l == 0 {
            return Err(Error::decode_failure("k and l must not be zero"));
        }
        let vki_arr = kv_get(&map, "VKI_ARR")?
            .split(',')
            .filter(|s| !s.is_empty())
            .map(from_hex)
            .collect::<Result<Vec<_>>>()?;
        Ok(KeyMeta { k, l, vkv: from_hex(kv_get(&map, "VKV")?)?, vki_arr, vku: from_hex(kv_get(&map, "VKU")?)? })
    }
}

#[derive(Serialize, Deserialize)]
struct SigShareWire {
    index: u32,
    sig_share: String,
    z: String,
    c: String,
}

impl SigShare {
    pub fn to_binary(&self) -> Vec<u8> {
        to_bin(&SigShareWire { index: self.index, sig_share: to_hex(&self.sig_share), z: to_hex(&self.z), c: to_hex(&self.c) })
    }

    pub fn from_binary(data: &[u8]) -> Result<Self> {
        let wire: SigShareWire = from_bin(data)?;
        if wire.index == 0 {
            return Err(Error::decode_failure("index must not be zero"));
        }
        Ok(SigShare { index: wire.index, sig_share: from_hex(&wire.sig_share)?, z: from_hex(&wire.z)?, c: from_hex(&wire.c)? })
    }

    pub fn to_base64_string(&self) -> String {
        to_base64(&self.to_binary())
    }

    pub fn from_base64_string(s: &str) -> Result<Self> {
        Self::from_binary(&from_base64(s)?)
    }

    pub fn to_text(&self) -> String {
        let body = format!("INDEX: {}\nSIG_SHARE: {}\nZ: {}\nC: {}\n", self.index, to_hex(&self.sig_share), to_hex(&self.z), to_hex(&self.c));
        frame_text("RSA SIG SHARE", &body)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let body = unframe_text("RSA SIG SHARE", text)?;
        let map = parse_kv_lines(body);
        let index: u32 = kv_get(&map, "INDEX")?.parse().map_err(|_| Error::decode_failure("INDEX is not a valid integer"))?;
        if index == 0 {
            return Err(Error::decode_failure("index must not be zero"));
        }
        Ok(SigShare {
            index,
            sig_share: from_hex(kv_get(&map, "SIG_SHARE")?)?,
            z: from_hex(kv_get(&map, "Z")?)?,
            c: from_hex(kv_get(&map, "C")?)?,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct ProofWire {
    z: String,
    c: String,
}

impl Proof {
    pub fn to_binary(&self) -> Vec<u8> {
        to_bin(&ProofWire { z: to_hex(&self.z), c: to_hex(&self.c) })
    }

    pub fn from_binary(data: &[u8]) -> Result<Self> {
        let wire: ProofWire = from_bin(data)?;
        Ok(Proof { z: from_hex(&wire.z)?, c: from_hex(&wire.c)? })
    }

    pub fn to_base64_string(&self) -> String {
        to_base64(&self.to_binary())
    }

    pub fn from_base64_string(s: &str) -> Result<Self> {
        Self::from_binary(&from_base64(s)?)
    }

    pub fn to_text(&self) -> String {
        let body = format!("Z: {}\nC: {}\n", to_hex(&self.z), to_hex(&self.c));
        frame_text("RSA SIG SHARE PROOF", &body)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let body = unframe_text("RSA SIG SHARE PROOF", text)?;
        let map = parse_kv_lines(body);
        Ok(Proof { z: from_hex(kv_get(&map, "Z")?)?, c: from_hex(kv_get(&map, "C")?)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_roundtrips_all_three_encodings() {
        let pk = PublicKey::new(BigUint::from(221u32), BigUint::from(7u32));

        let bin = pk.to_binary();
        assert_eq!(PublicKey::from_binary(&bin).unwrap(), pk);

        let b64 = pk.to_base64_string();
        assert_eq!(PublicKey::from_base64_string(&b64).unwrap(), pk);

        let text = pk.to_text();
        assert_eq!(PublicKey::from_text(&text).unwrap(), pk);
    }

    #[test]
    fn sig_share_rejects_zero_index() {
        let wire = SigShareWire { index: 0, sig_share: "01".into(), z: "01".into(), c: "01".into() };
        let bin = to_bin(&wire);
        assert!(SigShare::from_binary(&bin).is_err());
    }

    #[test]
    fn proof_roundtrips_all_three_encodings() {
        let proof = Proof { z: BigUint::from(123456u32), c: BigUint::from(7890u32) };

        let bin = proof.to_binary();
        assert_eq!(Proof::from_binary(&bin).unwrap(), proof);

        let b64 = proof.to_base64_string();
        assert_eq!(Proof::from_base64_string(&b64).unwrap(), proof);

        let text = proof.to_text();
        assert_eq!(Proof::from_text(&text).unwrap(), proof);
    }

    #[test]
    fn key_meta_text_roundtrip() {
        let km = KeyMeta {
            k: 2,
            l: 3,
            vkv: BigUint::from(5u32),
            vki_arr: vec![BigUint::from(10u32), BigUint::from(20u32), BigUint::from(30u32)],
            vku: BigUint::from(99u32),
        };
        let text = km.to_text();
        assert_eq!(KeyMeta::from_text(&text).unwrap(), km);
    }
}
