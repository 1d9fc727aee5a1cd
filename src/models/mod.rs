//! Domain models for the e2e toolkit.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Ipv4Prefix`] - IPv4 address block with CIDR notation support
//! - [`TestGroup`], [`SubtestReport`], [`TestStatus`] - skip-list entries

mod ipv4;
mod report;

// Re-export public types
pub use ipv4::{
    bit_at, get_cidr_mask, ip_fits_prefix, parse_address, Ipv4Prefix, PrefixParseError, MAX_LENGTH,
};
pub use report::{SubtestReport, TestGroup, TestStatus};
