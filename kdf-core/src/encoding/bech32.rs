// kdf-core/src/encoding/bech32.rs
//
// Bech32 (BIP-173)
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki
//
// hrp || '1' || data (5-bit groups) || 6-symbol BCH checksum

use crate::error::{AddressError, KdfError, KdfResult};
use std::fmt;
use std::str::FromStr;

/// Data alphabet, indexed by 5-bit value.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

pub const SEPARATOR: char = '1';

pub const CHECKSUM_LEN: usize = 6;

/// Longest valid Bech32 string.
pub const MAX_LENGTH: usize = 90;

pub const MAX_HRP_LEN: usize = 83;

const GENERATOR: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

// =============================================================================
// HUMAN-READABLE PART
// =============================================================================

/// Validated, lower-case human-readable part (the network prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hrp(String);

impl Hrp {
    /// 1..=83 characters in ASCII 33..=126, not mixed case.
    pub fn parse(s: &str) -> KdfResult<Self> {
        let invalid = || KdfError::from(AddressError::InvalidPrefix(s.to_string()));

        if s.is_empty() || s.len() > MAX_HRP_LEN {
            return Err(invalid());
        }
        if !s.bytes().all(|b| (33..=126).contains(&b)) {
            return Err(invalid());
        }
        let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(invalid());
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// high bits of each char, 0, low bits of each char
    fn expand(&self) -> Vec<u8> {
        let bytes = self.0.as_bytes();
        let mut out = Vec::with_capacity(bytes.len() * 2 + 1);
        out.extend(bytes.iter().map(|b| b >> 5));
        out.push(0);
        out.extend(bytes.iter().map(|b| b & 0x1f));
        out
    }
}

impl FromStr for Hrp {
    type Err = KdfError;

    fn from_str(s: &str) -> KdfResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Hrp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Hrp {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// CHECKSUM
// =============================================================================

fn polymod(values: impl IntoIterator<Item = u8>) -> u32 {
    let mut chk: u32 = 1;
    for value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

fn create_checksum(hrp: &Hrp, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let values = hrp
        .expand()
        .into_iter()
        .chain(data.iter().copied())
        .chain([0u8; CHECKSUM_LEN]);
    let modulus = polymod(values) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((modulus >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &Hrp, data: &[u8]) -> bool {
    polymod(hrp.expand().into_iter().chain(data.iter().copied())) == 1
}

// =============================================================================
// BIT GROUPING
// =============================================================================

/// Regroup `data` from `from`-bit to `to`-bit values, MSB first.
///
/// With `pad`, leftover bits are zero-padded into one last group. Without it,
/// more than `from - 1` leftover bits or non-zero padding returns `None`, as
/// does an input value wider than `from` bits.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        let value = u32::from(value);
        if value >> from != 0 {
            return None;
        }
        acc = ((acc << from) | value) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return None;
    }

    Some(out)
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encode 5-bit `data` under `hrp`.
pub fn encode_u5(hrp: &Hrp, data: &[u8]) -> KdfResult<String> {
    let total = hrp.len() + 1 + data.len() + CHECKSUM_LEN;
    if total > MAX_LENGTH {
        return Err(AddressError::Encoding(format!(
            "encoded length {} exceeds {}",
            total, MAX_LENGTH
        ))
        .into());
    }
    if let Some(&value) = data.iter().find(|&&v| v > 0x1f) {
        return Err(AddressError::Encoding(format!("{:#04x} is not a 5-bit value", value)).into());
    }

    let checksum = create_checksum(hrp, data);
    let mut out = String::with_capacity(total);
    out.push_str(hrp.as_str());
    out.push(SEPARATOR);
    out.extend(
        data.iter()
            .chain(checksum.iter())
            .map(|&v| char::from(CHARSET[v as usize])),
    );
    Ok(out)
}

/// Encode an 8-bit payload under `hrp`, regrouping it to 5 bits with padding.
pub fn encode(hrp: &Hrp, payload: &[u8]) -> KdfResult<String> {
    let data = convert_bits(payload, 8, 5, true)
        .ok_or_else(|| AddressError::Encoding("cannot regroup payload".to_string()))?;
    encode_u5(hrp, &data)
}

/// Decode a Bech32 string into its prefix and 5-bit data (checksum removed).
pub fn decode_u5(s: &str) -> KdfResult<(Hrp, Vec<u8>)> {
    let invalid = |reason: &str| KdfError::from(AddressError::InvalidAddress(reason.to_string()));

    if s.len() > MAX_LENGTH {
        return Err(invalid("too long"));
    }
    if !s.bytes().all(|b| (33..=126).contains(&b)) {
        return Err(invalid("character out of range"));
    }
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(invalid("mixed case"));
    }
    let s = s.to_ascii_lowercase();

    let split = s.rfind(SEPARATOR).ok_or_else(|| invalid("missing separator"))?;
    let (hrp, rest) = s.split_at(split);
    let data_part = &rest[1..];
    if hrp.is_empty() {
        return Err(invalid("empty prefix"));
    }
    if data_part.len() < CHECKSUM_LEN {
        return Err(invalid("checksum too short"));
    }
    let hrp = Hrp::parse(hrp).map_err(|_| invalid("invalid prefix"))?;

    let mut data = data_part
        .bytes()
        .map(|c| CHARSET.iter().position(|&x| x == c).map(|v| v as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| invalid("invalid data character"))?;

    if !verify_checksum(&hrp, &data) {
        return Err(invalid("invalid checksum"));
    }

    data.truncate(data.len() - CHECKSUM_LEN);
    Ok((hrp, data))
}

/// Decode a Bech32 string into its prefix and 8-bit payload.
pub fn decode(s: &str) -> KdfResult<(Hrp, Vec<u8>)> {
    let (hrp, data) = decode_u5(s)?;
    let payload = convert_bits(&data, 5, 8, false)
        .ok_or_else(|| AddressError::InvalidAddress("invalid padding".to_string()))?;
    Ok((hrp, payload))
}

// =============================================================================
// TESTS
// =============================================================================
