//! IPv4 CIDR prefix utilities.
//!
//! Provides [`Ipv4Prefix`] for representing address blocks in `a.b.c.d/mask`
//! notation, along with the bit arithmetic the subnet allocator builds on.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length for an IPv4 prefix mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Errors from parsing CIDR or address text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixParseError {
    /// The text has no `/mask` part. Bare addresses go through
    /// [`parse_address`] instead.
    #[error("invalid CIDR {text:?}: expected address/mask")]
    MissingMask { text: String },
    /// The address part is not a dotted quad.
    #[error("invalid address {text:?}")]
    InvalidAddress { text: String },
    /// The mask part is not a number.
    #[error("invalid mask {text:?}")]
    InvalidMask { text: String },
    /// The mask is numeric but outside 0-32.
    #[error("mask /{mask} is out of range 0-32")]
    MaskOutOfRange { mask: u8 },
}

/// Convert a prefix mask length to its bit mask.
///
/// # Examples
/// ```
/// use azure_e2e_toolkit::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, PrefixParseError> {
    if len > MAX_LENGTH {
        Err(PrefixParseError::MaskOutOfRange { mask: len })
    } else {
        Ok(mask_value(len))
    }
}

// len must already be validated to <= 32; shifting via u64 keeps len == 0 legal.
fn mask_value(len: u8) -> u32 {
    let right_len = u32::from(MAX_LENGTH - len);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Parse a bare dotted-quad address (no `/mask`).
///
/// This is the informational mode used when an IP rather than a block is
/// expected; CIDR text is rejected here just as bare addresses are rejected
/// by [`Ipv4Prefix::new`].
pub fn parse_address(text: &str) -> Result<Ipv4Addr, PrefixParseError> {
    let text = text.trim();
    Ipv4Addr::from_str(text).map_err(|_| PrefixParseError::InvalidAddress {
        text: text.to_string(),
    })
}

/// Bit of `addr` at `index`, counting from the most significant bit.
pub fn bit_at(addr: Ipv4Addr, index: u8) -> u8 {
    debug_assert!(index < MAX_LENGTH, "bit index {index} out of range");
    ((u32::from(addr) >> (31 - index)) & 1) as u8
}

/// Check whether a bare IP address falls inside a CIDR prefix.
///
/// Both arguments are text; parse failures are returned as errors while a
/// well-formed IP outside the prefix yields `Ok(false)`.
pub fn ip_fits_prefix(ip: &str, prefix: &str) -> Result<bool, PrefixParseError> {
    let addr = parse_address(ip)?;
    let prefix = Ipv4Prefix::new(prefix)?;
    Ok(prefix.contains(addr))
}

/// An IPv4 address block in CIDR notation.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Ipv4Prefix {
    /// The base address of the block.
    pub addr: Ipv4Addr,
    /// The prefix mask length (0-32).
    pub mask: u8,
}

impl Ipv4Prefix {
    /// Parse a CIDR string (e.g. `"10.24.0.0/16"`).
    ///
    /// A bare dotted quad without `/mask` is rejected; see [`parse_address`]
    /// for that mode.
    pub fn new(text: &str) -> Result<Ipv4Prefix, PrefixParseError> {
        let text = text.trim();
        let (addr_part, mask_part) =
            text.split_once('/')
                .ok_or_else(|| PrefixParseError::MissingMask {
                    text: text.to_string(),
                })?;
        let addr = parse_address(addr_part)?;
        let mask: u8 = mask_part
            .trim()
            .parse()
            .map_err(|_| PrefixParseError::InvalidMask {
                text: mask_part.to_string(),
            })?;
        if mask > MAX_LENGTH {
            return Err(PrefixParseError::MaskOutOfRange { mask });
        }
        Ok(Ipv4Prefix { addr, mask })
    }

    /// The network (lowest) address of the block.
    pub fn network_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_value(self.mask))
    }

    /// The broadcast (highest) address of the block.
    pub fn broadcast_addr(&self) -> Ipv4Addr {
        let mask = mask_value(self.mask);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Whether `addr` falls inside this block.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & mask_value(self.mask) == u32::from(self.network_addr())
    }

    /// Whether two blocks share any address.
    pub fn overlaps(&self, other: &Ipv4Prefix) -> bool {
        self.contains(other.network_addr()) || other.contains(self.network_addr())
    }
}

impl std::fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl Serialize for Ipv4Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4Prefix::new(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_round_trip() {
        for text in ["10.240.0.0/16", "10.24.2.0/24", "0.0.0.0/0", "192.168.1.42/32"] {
            let prefix = Ipv4Prefix::new(text).expect("valid CIDR should parse");
            assert_eq!(prefix.to_string(), text, "round trip failed for {text}");
        }
    }

    #[test]
    fn test_parse_fields() {
        let prefix = Ipv4Prefix::new("10.240.0.0/16").unwrap();
        assert_eq!(prefix.addr, Ipv4Addr::new(10, 240, 0, 0));
        assert_eq!(prefix.mask, 16);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            Ipv4Prefix::new("10.24.0.0"),
            Err(PrefixParseError::MissingMask {
                text: "10.24.0.0".to_string()
            })
        );
        assert!(matches!(
            Ipv4Prefix::new("10.24.0/16"),
            Err(PrefixParseError::InvalidAddress { .. })
        ));
        assert!(matches!(
            Ipv4Prefix::new("10.24.0.256/16"),
            Err(PrefixParseError::InvalidAddress { .. })
        ));
        assert!(matches!(
            Ipv4Prefix::new("10.24.0.0/abc"),
            Err(PrefixParseError::InvalidMask { .. })
        ));
        assert_eq!(
            Ipv4Prefix::new("10.24.0.0/33"),
            Err(PrefixParseError::MaskOutOfRange { mask: 33 })
        );
    }

    #[test]
    fn test_parse_address_bare_mode() {
        assert_eq!(
            parse_address("10.24.0.100").unwrap(),
            Ipv4Addr::new(10, 24, 0, 100)
        );
        assert!(matches!(
            parse_address("10.24.0.100/32"),
            Err(PrefixParseError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_bit_at() {
        // 10.240.0.0 -> 00001010 11110000 00000000 00000000
        let addr = Ipv4Addr::new(10, 240, 0, 0);
        let expected = [
            0, 0, 0, 0, 1, 0, 1, 0, //
            1, 1, 1, 1, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0,
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(bit_at(addr, i as u8), *want, "bit {i} mismatch");
        }
    }

    #[test]
    fn test_contains() {
        let prefix = Ipv4Prefix::new("10.24.0.0/16").unwrap();
        assert!(prefix.contains(Ipv4Addr::new(10, 24, 0, 100)));
        assert!(!prefix.contains(Ipv4Addr::new(20, 24, 0, 0)));
    }

    #[test]
    fn test_ip_fits_prefix() {
        assert!(ip_fits_prefix("10.24.0.100", "10.24.0.0/16").unwrap());
        assert!(!ip_fits_prefix("20.24.0.0", "10.24.0.0/16").unwrap());
        assert!(ip_fits_prefix("10.24.0.0/24", "10.24.0.0/16").is_err());
    }

    #[test]
    fn test_network_and_broadcast() {
        let prefix = Ipv4Prefix::new("192.168.1.42/24").unwrap();
        assert_eq!(prefix.network_addr(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(prefix.broadcast_addr(), Ipv4Addr::new(192, 168, 1, 255));

        let prefix = Ipv4Prefix::new("192.168.1.42/8").unwrap();
        assert_eq!(prefix.network_addr(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(prefix.broadcast_addr(), Ipv4Addr::new(192, 255, 255, 255));
    }

    #[test]
    fn test_overlaps() {
        let a = Ipv4Prefix::new("10.24.0.0/24").unwrap();
        let b = Ipv4Prefix::new("10.24.0.128/25").unwrap();
        let c = Ipv4Prefix::new("10.24.1.0/24").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&b));
    }

    #[test]
    fn test_serde_as_cidr_string() {
        let prefix = Ipv4Prefix::new("10.24.2.0/24").unwrap();
        let json = serde_json::to_string(&prefix).unwrap();
        assert_eq!(json, "\"10.24.2.0/24\"");
        let back: Ipv4Prefix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefix);
    }
}
