// kdf-core/src/crypto/paths.rs
//
// Derivation Paths - parser and SLIP-44 path builders
// Grammar: [m/]index['|h|H](/index['|h|H])*  with index < 2^31

use crate::error::{KdfError, KdfResult, PathError};
use std::fmt;
use std::str::FromStr;

/// Bit set on the serialized index of a hardened step.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// SEGMENT
// =============================================================================

/// One step of a derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    index: u32,
    hardened: bool,
}

impl Segment {
    /// Hardened step `index'`. Fails when `index >= 2^31`.
    pub fn hardened(index: u32) -> KdfResult<Self> {
        Self::new(index, true)
    }

    /// Normal step `index`. Fails when `index >= 2^31`.
    pub fn normal(index: u32) -> KdfResult<Self> {
        Self::new(index, false)
    }

    pub fn new(index: u32, hardened: bool) -> KdfResult<Self> {
        if index >= HARDENED_OFFSET {
            return Err(PathError::IndexOutOfRange(index.to_string()).into());
        }
        Ok(Self { index, hardened })
    }

    /// Decode a serialized 32-bit child number.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            index: value & !HARDENED_OFFSET,
            hardened: value & HARDENED_OFFSET != 0,
        }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn is_hardened(self) -> bool {
        self.hardened
    }

    /// index | 0x80000000 for hardened steps, the bare index otherwise.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for Segment {
    type Err = KdfError;

    fn from_str(s: &str) -> KdfResult<Self> {
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PathError::InvalidSegment(s.to_string()).into());
        }

        // all-digit strings only fail to parse on overflow
        let index: u32 = digits
            .parse()
            .map_err(|_| PathError::IndexOutOfRange(digits.to_string()))?;
        if index >= HARDENED_OFFSET {
            return Err(PathError::IndexOutOfRange(digits.to_string()).into());
        }

        Ok(Self { index, hardened })
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================

/// Ordered derivation steps, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<Segment>);

impl DerivationPath {
    /// The empty path; deriving it yields the master key.
    pub const fn master() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[Segment] {
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

    /// True when every step is hardened (required by seed-only curves).
    pub fn is_fully_hardened(&self) -> bool {
        self.0.iter().all(|s| s.is_hardened())
    }

    /// Append a step.
    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    /// This path followed by `other`.
    pub fn join(&self, other: &DerivationPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend_from_slice(&other.0);
        Self(segments)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = KdfError;

    /// Parse `44'/4218'/0'/0'`; a leading `m/` is optional and `m` alone is
    /// the master path.
    fn from_str(s: &str) -> KdfResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PathError::Empty.into());
        }
        if s == "m" || s == "M" {
            return Ok(Self::master());
        }
        let body = s
            .strip_prefix("m/")
            .or_else(|| s.strip_prefix("M/"))
            .unwrap_or(s);

        body.split('/')
            .enumerate()
            .map(|(position, component)| {
                if component.is_empty() {
                    Err(PathError::EmptySegment(position).into())
                } else {
                    component.parse::<Segment>()
                }
            })
            .collect::<KdfResult<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for DerivationPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    pub const IOTA: u32 = 4218;
    pub const SHIMMER: u32 = 4219;
}

// =============================================================================
// PATH BUILDERS
// =============================================================================
/// Pre-built derivation paths.
///
/// # Conventions
/// - IOTA / Shimmer (Ed25519, SLIP-0010): `44'/coin'/account'/change'/address'`
/// - BIP-44 (secp256k1): `44'/coin'/account'/change/address`
pub struct DerivationPaths;

impl DerivationPaths {
    /// Default path of the `kdf` tool: first IOTA account, external chain.
    pub const DEFAULT: &'static str = "44'/4218'/0'/0'";

    pub const IOTA_0: &'static str = "44'/4218'/0'/0'/0'";

    pub const SHIMMER_0: &'static str = "44'/4219'/0'/0'/0'";

    /// IOTA address path, every level hardened.
    #[inline]
    pub fn iota(account: u32, change: u32, address: u32) -> KdfResult<DerivationPath> {
        Self::slip10(coin_type::IOTA, account, &[change, address])
    }

    /// Shimmer address path, every level hardened.
    #[inline]
    pub fn shimmer(account: u32, change: u32, address: u32) -> KdfResult<DerivationPath> {
        Self::slip10(coin_type::SHIMMER, account, &[change, address])
    }

    /// BIP-44 path for public-point curves: hardened purpose/coin/account,
    /// normal change and address index.
    pub fn bip44(coin_type: u32, account: u32, change: u32, address: u32) -> KdfResult<DerivationPath> {
        Ok(DerivationPath(vec![
            Segment::hardened(44)?,
            Segment::hardened(coin_type)?,
            Segment::hardened(account)?,
            Segment::normal(change)?,
            Segment::normal(address)?,
        ]))
    }

    /// SLIP-0010 path for seed-only curves: `44'/coin'/account'` followed by
    /// `sub_paths`, all forced hardened.
    ///
    /// - IOTA:  `slip10(4218, 0, &[0, 0])` -> 44'/4218'/0'/0'/0'
    /// - Short: `slip10(4218, 0, &[])`     -> 44'/4218'/0'
    pub fn slip10(coin_type: u32, account: u32, sub_paths: &[u32]) -> KdfResult<DerivationPath> {
        let mut path = DerivationPath(vec![
            Segment::hardened(44)?,
            Segment::hardened(coin_type)?,
            Segment::hardened(account)?,
        ]);
        for &index in sub_paths {
            path.push(Segment::hardened(index)?);
        }
        Ok(path)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(s: &str) -> KdfResult<DerivationPath> {
        s.parse()
    }

    #[test]
    fn test_parse_hardened_path() {
        let path = parse("44'/4218'/0'/0'").unwrap();
        assert_eq!(path.len(), 4);
        assert!(path.is_fully_hardened());
        assert_eq!(path.segments()[1].index(), 4218);
        assert_eq!(path.segments()[1].to_u32(), 0x8000_107a);
    }

    #[test]
    fn test_parse_preserves_order_and_flags() {
        let path = parse("m/0'/1/2h/2/1000000000").unwrap();
        let flags: Vec<(u32, bool)> = path.iter().map(|s| (s.index(), s.is_hardened())).collect();
        assert_eq!(
            flags,
            vec![(0, true), (1, false), (2, true), (2, false), (1_000_000_000, false)]
        );
    }

    #[test]
    fn test_master_path() {
        assert!(parse("m").unwrap().is_empty());
        assert_eq!(parse("m").unwrap(), DerivationPath::master());
    }

    #[test]
    fn test_display_round_trip() {
        let path = parse("m/44H/4218h/0'/1").unwrap();
        assert_eq!(path.to_string(), "44'/4218'/0'/1");
        assert_eq!(parse(&path.to_string()).unwrap(), path);
    }

    #[test]
    fn test_rejects_invalid_paths() {
        for bad in ["", "44''", "-1", "2147483648", "44'/", "/44'", "44'//0'", "m/", "4a'", "'", "+1", "44'h", "0x10", "99999999999"] {
            let err = parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPath, "path {:?}", bad);
        }
    }

    #[test]
    fn test_largest_index() {
        let path = parse("2147483647'").unwrap();
        assert_eq!(path.segments()[0].to_u32(), u32::MAX);
        assert!(parse("2147483648'").is_err());
    }

    #[test]
    fn test_segment_u32_round_trip() {
        let segment = Segment::hardened(4218).unwrap();
        assert_eq!(Segment::from_u32(segment.to_u32()), segment);
        assert!(Segment::normal(HARDENED_OFFSET).is_err());
    }

    #[test]
    fn test_builders() {
        assert_eq!(
            DerivationPaths::iota(0, 0, 0).unwrap().to_string(),
            DerivationPaths::IOTA_0
        );
        assert_eq!(
            DerivationPaths::shimmer(0, 0, 0).unwrap().to_string(),
            DerivationPaths::SHIMMER_0
        );
        assert_eq!(
            DerivationPaths::slip10(coin_type::IOTA, 0, &[0]).unwrap().to_string(),
            DerivationPaths::DEFAULT
        );
        assert_eq!(
            DerivationPaths::bip44(coin_type::BITCOIN, 0, 0, 5).unwrap().to_string(),
            "44'/0'/0'/0/5"
        );
        assert!(DerivationPaths::slip10(coin_type::IOTA, HARDENED_OFFSET, &[]).is_err());
    }

    #[test]
    fn test_join() {
        let head = parse("44'").unwrap();
        let tail = parse("0'").unwrap();
        assert_eq!(head.join(&tail), parse("44'/0'").unwrap());
    }
}
