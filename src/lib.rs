//! A compact network mask value type.
//!
//! [`Mask`] holds either an IPv4 bitmask or an IPv6 prefix length, or is the
//! invalid (unset) mask. It is `Copy`, `Eq` and `Hash`, so it can be used
//! directly as a map key, and it has round-trip exact binary and text
//! encodings.
//!
//! ```
//! use netmask::Mask;
//!
//! let v4 = Mask::from_prefix(24, 32);
//! assert_eq!(v4, Mask::from_ipv4_bytes([255, 255, 255, 0]));
//! assert_eq!(v4.to_string(), "255.255.255.0");
//!
//! let v6: Mask = "64".parse().unwrap();
//! assert!(v6.is_ipv6());
//! assert_eq!(v6.bits(), 64);
//! ```
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub use self::error::MaskDecodeError;
pub use self::mask::{prefix_length, Mask};

mod binary;
mod error;
mod mask;
#[cfg(feature = "serde")]
mod ser;
mod text;
