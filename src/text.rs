use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::mask::{Mask, Repr};
use crate::MaskDecodeError;

const MAX_PREFIX_LEN: usize = "128".len();
const MIN_DOTTED_LEN: usize = "1.1.1.1".len();
const MAX_DOTTED_LEN: usize = "255.255.255.255".len();

impl Mask {
    /// Appends the text form to `buf`. The invalid mask appends nothing.
    pub fn append_text(&self, buf: &mut String) {
        match self.0 {
            Repr::Invalid => {}
            Repr::V4(mask) => {
                for (i, octet) in mask.to_be_bytes().into_iter().enumerate() {
                    if i > 0 {
                        buf.push('.');
                    }
                    push_decimal(buf, octet);
                }
            }
            Repr::V6(ones) => push_decimal(buf, ones),
        }
    }

    /// Encodes the mask in its text form: dotted decimal for IPv4, the
    /// prefix length for IPv6 and the empty string for the invalid mask.
    ///
    /// This is the [`Display`](fmt::Display) form except for the invalid
    /// mask.
    pub fn to_text(&self) -> String {
        let mut buf = match self.0 {
            Repr::Invalid => String::new(),
            Repr::V4(_) => String::with_capacity(MAX_DOTTED_LEN),
            Repr::V6(_) => String::with_capacity(MAX_PREFIX_LEN),
        };
        self.append_text(&mut buf);
        buf
    }

    /// Decodes a mask from the form written by [`Mask::to_text`].
    ///
    /// One to three characters are read as an IPv6 prefix length, seven to
    /// fifteen as a dotted-decimal IPv4 mask, and the empty string as the
    /// invalid mask.
    ///
    /// ```
    /// use netmask::Mask;
    ///
    /// assert_eq!(Mask::from_text("255.255.0.0"), Ok(Mask::from_prefix(16, 32)));
    /// assert_eq!(Mask::from_text("64"), Ok(Mask::from_prefix(64, 128)));
    /// assert_eq!(Mask::from_text(""), Ok(Mask::INVALID));
    /// assert!(Mask::from_text("/64").is_err());
    /// ```
    ///
    /// # Errors
    /// Returns a [`MaskDecodeError`] if the length fits neither form, a field
    /// is not a decimal number, the dotted form does not have four fields, or
    /// a dotted field is above 255. A prefix length above 128 is not an
    /// error; it gives the invalid mask, as [`Mask::from_prefix`] does.
    pub fn from_text(text: &str) -> Result<Mask, MaskDecodeError> {
        match text.len() {
            0 => Ok(Mask::INVALID),
            1..=MAX_PREFIX_LEN => parse_prefix(text),
            MIN_DOTTED_LEN..=MAX_DOTTED_LEN => parse_dotted(text),
            len => {
                log::debug!("text mask of unexpected length {len}");
                Err(MaskDecodeError::UnexpectedSize(len))
            }
        }
    }
}

fn parse_prefix(text: &str) -> Result<Mask, MaskDecodeError> {
    let ones: u64 = parse_digits(text)?
        .parse()
        .map_err(|_| MaskDecodeError::InvalidDigit)?;
    // at most three digits, so this fits; above 128 gives the invalid mask
    Ok(Mask::from_prefix(ones as i32, 128))
}

fn parse_dotted(text: &str) -> Result<Mask, MaskDecodeError> {
    let fields = text.splitn(4, '.').count();
    if fields != 4 {
        log::debug!("dotted mask {text:?} has {fields} fields");
        return Err(MaskDecodeError::FieldCount(fields));
    }

    let mut octets = [0u8; 4];
    for (octet, field) in octets.iter_mut().zip(text.splitn(4, '.')) {
        *octet = parse_digits(field)?.parse().map_err(|_| {
            log::debug!("dotted field {field:?} out of range");
            MaskDecodeError::OctetOutOfRange
        })?;
    }
    Ok(Mask::from_ipv4_bytes(octets))
}

fn push_decimal(buf: &mut String, n: u8) {
    if n >= 100 {
        buf.push(char::from(b'0' + n / 100));
    }
    if n >= 10 {
        buf.push(char::from(b'0' + n / 10 % 10));
    }
    buf.push(char::from(b'0' + n % 10));
}

/// Passes `field` through if it is a non-empty run of ASCII digits. Signs
/// and whitespace are rejected.
fn parse_digits(field: &str) -> Result<&str, MaskDecodeError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        log::debug!("invalid digit in mask field {field:?}");
        return Err(MaskDecodeError::InvalidDigit);
    }
    Ok(field)
}

/// Writes the text form, or `invalid Mask` for the invalid mask.
impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Invalid => f.write_str("invalid Mask"),
            _ => f.write_str(&self.to_text()),
        }
    }
}

impl FromStr for Mask {
    type Err = MaskDecodeError;

    fn from_str(s: &str) -> Result<Mask, MaskDecodeError> {
        Mask::from_text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Mask::from_ipv4_bytes([255, 255, 255, 0]).to_string(),
            "255.255.255.0"
        );
        assert_eq!(Mask::from_ipv4_bytes([0x55, 0, 7, 1]).to_string(), "85.0.7.1");
        assert_eq!(Mask::from_prefix(64, 128).to_string(), "64");
        assert_eq!(Mask::from_prefix(0, 128).to_string(), "0");
        assert_eq!(Mask::INVALID.to_string(), "invalid Mask");
    }

    #[test]
    fn text_differs_from_display_only_when_invalid() {
        assert_eq!(Mask::INVALID.to_text(), "");
        for mask in [
            Mask::from_prefix(0, 32),
            Mask::from_prefix(32, 32),
            Mask::from_prefix(128, 128),
        ] {
            assert_eq!(mask.to_text(), mask.to_string());
        }
    }

    #[test]
    fn decimal_digits() {
        for n in 0..=u8::MAX {
            let mut buf = String::new();
            push_decimal(&mut buf, n);
            assert_eq!(buf, n.to_string());
        }
    }

    #[test]
    fn append_text_keeps_prefix() {
        let mut buf = String::from("mask=");
        Mask::from_prefix(8, 32).append_text(&mut buf);
        Mask::INVALID.append_text(&mut buf);
        assert_eq!(buf, "mask=255.0.0.0");
    }

    #[test]
    fn decode_prefix() {
        let mask: Mask = "64".parse().unwrap();
        assert!(mask.is_ipv6());
        assert_eq!(mask.bits(), 64);
        assert_eq!(Mask::from_text("0"), Ok(Mask::from_prefix(0, 128)));
        assert_eq!(Mask::from_text("128"), Ok(Mask::from_prefix(128, 128)));
        assert_eq!(Mask::from_text("007"), Ok(Mask::from_prefix(7, 128)));
    }

    #[test]
    fn decode_prefix_above_128_is_invalid() {
        assert_eq!(Mask::from_text("129"), Ok(Mask::INVALID));
        assert_eq!(Mask::from_text("999"), Ok(Mask::INVALID));
        // same outcome as the one byte binary form
        assert_eq!(Mask::from_text("129"), Mask::from_binary(&[129]));
    }

    #[test]
    fn decode_prefix_errors() {
        assert_eq!(Mask::from_text("ab"), Err(MaskDecodeError::InvalidDigit));
        assert_eq!(Mask::from_text("+1"), Err(MaskDecodeError::InvalidDigit));
        assert_eq!(Mask::from_text("-1"), Err(MaskDecodeError::InvalidDigit));
        assert_eq!(Mask::from_text(" 8"), Err(MaskDecodeError::InvalidDigit));
    }

    #[test]
    fn decode_dotted() {
        assert_eq!(
            Mask::from_text("255.255.255.0"),
            Ok(Mask::from_ipv4_bytes([255, 255, 255, 0]))
        );
        assert_eq!(
            Mask::from_text("255.255.255.255"),
            Ok(Mask::from_prefix(32, 32))
        );
        assert_eq!(Mask::from_text("0.0.0.0"), Ok(Mask::from_prefix(0, 32)));
        // non-prefix masks are kept as they are
        let mask = Mask::from_text("1.1.1.1").unwrap();
        assert_eq!(mask, Mask::from_ipv4_bytes([1, 1, 1, 1]));
        assert_eq!(mask.bits(), -1);
    }

    #[test]
    fn decode_dotted_errors() {
        assert_eq!(
            Mask::from_text("255.255.0"),
            Err(MaskDecodeError::FieldCount(3))
        );
        assert_eq!(Mask::from_text("1234567"), Err(MaskDecodeError::FieldCount(1)));
        assert_eq!(
            Mask::from_text("1.2.3.4.5"),
            Err(MaskDecodeError::InvalidDigit)
        );
        assert_eq!(
            Mask::from_text("255.256.0.0"),
            Err(MaskDecodeError::OctetOutOfRange)
        );
        assert_eq!(
            Mask::from_text("255..255.0"),
            Err(MaskDecodeError::InvalidDigit)
        );
        assert_eq!(
            Mask::from_text("255.x.255.0"),
            Err(MaskDecodeError::InvalidDigit)
        );
    }

    #[test]
    fn decode_unexpected_size() {
        assert_eq!(Mask::from_text("1.2.3"), Err(MaskDecodeError::UnexpectedSize(5)));
        assert_eq!(Mask::from_text("1000"), Err(MaskDecodeError::UnexpectedSize(4)));
        assert_eq!(
            Mask::from_text("255.255.255.0.0"),
            Err(MaskDecodeError::InvalidDigit)
        );
        assert_eq!(
            Mask::from_text("255.255.255.255.0"),
            Err(MaskDecodeError::UnexpectedSize(17))
        );
    }
}
