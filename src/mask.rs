use alloc::vec::Vec;
use core::fmt;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// An IPv4 network mask or an IPv6 prefix length.
///
/// A `Mask` is one of:
///
/// * the invalid mask, which is also the `Default`,
/// * an IPv4 mask of 32 bits, which is not required to be a prefix,
/// * an IPv6 prefix of 0 to 128 bits. Non-prefix IPv6 masks cannot be
///   represented.
///
/// Masks are immutable `Copy` values. Equality is structural and `Hash` is
/// consistent with it, so two masks describing the same bits compare equal
/// however they were built.
///
/// # Examples
///
/// ```
/// use netmask::Mask;
///
/// assert_eq!(Mask::from_prefix(24, 32), Mask::from_ipv4_bytes([255, 255, 255, 0]));
/// assert_eq!(Mask::from_prefix(64, 128).bits(), 64);
/// assert!(!Mask::default().is_valid());
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mask(pub(crate) Repr);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Repr {
    #[default]
    Invalid,
    V4(u32),
    // always in 0..=128
    V6(u8),
}

const V4_BITS: i32 = 32;
const V6_BITS: i32 = 128;

impl Mask {
    /// The invalid mask.
    pub const INVALID: Mask = Mask(Repr::Invalid);

    /// Creates an IPv4 mask from four bytes in network order.
    ///
    /// Any byte pattern is accepted, including ones that are not a prefix.
    pub const fn from_ipv4_bytes(bytes: [u8; 4]) -> Mask {
        Mask(Repr::V4(u32::from_be_bytes(bytes)))
    }

    /// Creates an IPv6 prefix from sixteen bytes in network order.
    ///
    /// The bytes must be a run of one bits followed only by zero bits. Any
    /// other pattern gives [`Mask::INVALID`].
    ///
    /// ```
    /// use netmask::Mask;
    ///
    /// let mut bytes = [0u8; 16];
    /// bytes[..6].fill(0xff);
    /// assert_eq!(Mask::from_ipv6_bytes(bytes).bits(), 48);
    ///
    /// bytes[0] = 0b1011_0000;
    /// assert!(!Mask::from_ipv6_bytes(bytes).is_valid());
    /// ```
    pub fn from_ipv6_bytes(bytes: [u8; 16]) -> Mask {
        match prefix_length(&bytes) {
            Some(ones) => Mask(Repr::V6(ones)),
            None => {
                log::trace!("non-prefix IPv6 mask {bytes:02x?}");
                Mask::INVALID
            }
        }
    }

    /// Creates a mask from a 4 or 16 byte slice, such as the octets of an
    /// address-shaped mask.
    ///
    /// Returns `None` if the slice has any other length. A 16 byte slice
    /// which is not a prefix gives `Some(Mask::INVALID)`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Mask> {
        if let Ok(bytes) = <[u8; 4]>::try_from(bytes) {
            return Some(Mask::from_ipv4_bytes(bytes));
        }
        if let Ok(bytes) = <[u8; 16]>::try_from(bytes) {
            return Some(Mask::from_ipv6_bytes(bytes));
        }
        None
    }

    /// Creates a mask of `ones` leading one bits out of `total_bits`.
    ///
    /// `total_bits` must be 32 (IPv4) or 128 (IPv6) and `ones` must be in
    /// `0..=total_bits`, otherwise [`Mask::INVALID`] is returned.
    ///
    /// ```
    /// use netmask::Mask;
    ///
    /// assert_eq!(Mask::from_prefix(20, 32).to_string(), "255.255.240.0");
    /// assert_eq!(Mask::from_prefix(48, 128).to_string(), "48");
    /// assert!(!Mask::from_prefix(33, 32).is_valid());
    /// assert!(!Mask::from_prefix(8, 64).is_valid());
    /// ```
    pub fn from_prefix(ones: i32, total_bits: i32) -> Mask {
        if ones < 0 || ones > total_bits {
            return Mask::INVALID;
        }
        match total_bits {
            V4_BITS => Mask::from_ipv4_bytes(prefix_bytes(ones as u8)),
            V6_BITS => Mask(Repr::V6(ones as u8)),
            _ => Mask::INVALID,
        }
    }

    /// Returns `true` unless this is the invalid mask.
    ///
    /// A non-prefix IPv4 mask is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self.0, Repr::Invalid)
    }

    /// Returns `true` for an IPv4 mask, prefix or not.
    pub const fn is_ipv4(&self) -> bool {
        matches!(self.0, Repr::V4(_))
    }

    /// Returns `true` for an IPv6 prefix.
    pub const fn is_ipv6(&self) -> bool {
        matches!(self.0, Repr::V6(_))
    }

    /// Returns the prefix length, or `-1` if there is none.
    ///
    /// The invalid mask has no prefix length. Neither does an IPv4 mask whose
    /// bits are not a prefix: it is recomputed from the bytes on every call.
    ///
    /// ```
    /// use netmask::Mask;
    ///
    /// assert_eq!(Mask::from_ipv4_bytes([255, 255, 0, 0]).bits(), 16);
    /// assert_eq!(Mask::from_ipv4_bytes([0x55, 0, 0, 0]).bits(), -1);
    /// assert_eq!(Mask::INVALID.bits(), -1);
    /// ```
    pub fn bits(&self) -> i32 {
        self.prefix_len().map_or(-1, i32::from)
    }

    /// Returns the prefix length, or `None` if there is none. See
    /// [`Mask::bits`].
    pub fn prefix_len(&self) -> Option<u8> {
        match self.0 {
            Repr::Invalid => None,
            Repr::V4(mask) => prefix_length(&mask.to_be_bytes()),
            Repr::V6(ones) => Some(ones),
        }
    }

    /// Returns the 4 bytes of an IPv4 mask.
    pub const fn to_ipv4_bytes(&self) -> Option<[u8; 4]> {
        match self.0 {
            Repr::V4(mask) => Some(mask.to_be_bytes()),
            _ => None,
        }
    }

    /// Returns the 16 bytes of an IPv6 prefix.
    pub fn to_ipv6_bytes(&self) -> Option<[u8; 16]> {
        match self.0 {
            Repr::V6(ones) => Some(prefix_bytes(ones)),
            _ => None,
        }
    }

    /// Returns the mask as 4 bytes for IPv4, 16 bytes for IPv6, and no bytes
    /// for the invalid mask.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self.0 {
            Repr::Invalid => Vec::new(),
            Repr::V4(mask) => mask.to_be_bytes().to_vec(),
            Repr::V6(ones) => prefix_bytes::<16>(ones).to_vec(),
        }
    }

    /// Returns the mask in address form, e.g. `255.255.255.0` or
    /// `ffff:ffff:ffff:ffff::`.
    pub fn to_ip_addr(&self) -> Option<IpAddr> {
        match self.0 {
            Repr::Invalid => None,
            Repr::V4(mask) => Some(IpAddr::V4(Ipv4Addr::from(mask))),
            Repr::V6(ones) => Some(IpAddr::V6(Ipv6Addr::from(prefix_bytes::<16>(ones)))),
        }
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Invalid => f.write_str("Mask::INVALID"),
            _ => write!(f, "Mask({self})"),
        }
    }
}

impl From<Ipv4Addr> for Mask {
    fn from(mask: Ipv4Addr) -> Mask {
        Mask::from_ipv4_bytes(mask.octets())
    }
}

impl From<Ipv6Addr> for Mask {
    fn from(mask: Ipv6Addr) -> Mask {
        Mask::from_ipv6_bytes(mask.octets())
    }
}

impl From<IpAddr> for Mask {
    fn from(mask: IpAddr) -> Mask {
        match mask {
            IpAddr::V4(mask) => mask.into(),
            IpAddr::V6(mask) => mask.into(),
        }
    }
}

/// Counts the leading one bits of a mask given in network order.
///
/// Returns `None` if a one bit follows the first zero bit, i.e. the mask is
/// not a prefix.
///
/// ```
/// use netmask::prefix_length;
///
/// assert_eq!(prefix_length(&[255, 255, 254, 0]), Some(23));
/// assert_eq!(prefix_length(&[0, 0, 0, 0]), Some(0));
/// assert_eq!(prefix_length(&[255, 0, 1, 0]), None);
/// ```
pub fn prefix_length(mask: &[u8]) -> Option<u8> {
    let mut ones: u32 = 0;
    for (i, &byte) in mask.iter().enumerate() {
        if byte == 0xff {
            ones += 8;
            continue;
        }

        let run = byte.leading_ones();
        if byte.checked_shl(run).unwrap_or(0) != 0 {
            return None;
        }
        ones += run;
        if mask[i + 1..].iter().any(|&rest| rest != 0) {
            return None;
        }
        break;
    }
    u8::try_from(ones).ok()
}

/// `ones` leading one bits spread over `N` bytes, the rest zero.
fn prefix_bytes<const N: usize>(ones: u8) -> [u8; N] {
    let mut bytes = [0u8; N];
    let mut n = u32::from(ones);
    for byte in bytes.iter_mut() {
        if n >= 8 {
            *byte = 0xff;
            n -= 8;
            continue;
        }
        *byte = !(0xffu8 >> n);
        break;
    }
    bytes
}
