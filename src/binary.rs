use alloc::vec::Vec;

use crate::mask::{Mask, Repr};
use crate::MaskDecodeError;

// Binary form
//
// | mask    | bytes | content                       |
// |---------|-------|-------------------------------|
// | invalid | 0     |                               |
// | IPv4    | 4     | the mask, network order       |
// | IPv6    | 1     | the prefix length, 0 to 128   |
//
// The family is carried by the length alone.
impl Mask {
    /// Length in bytes of the binary form.
    pub const fn binary_len(&self) -> usize {
        match self.0 {
            Repr::Invalid => 0,
            Repr::V4(_) => 4,
            Repr::V6(_) => 1,
        }
    }

    /// Appends the binary form to `buf`.
    pub fn append_binary(&self, buf: &mut Vec<u8>) {
        match self.0 {
            Repr::Invalid => {}
            Repr::V4(mask) => buf.extend_from_slice(&mask.to_be_bytes()),
            Repr::V6(ones) => buf.push(ones),
        }
    }

    /// Encodes the mask in its binary form.
    ///
    /// ```
    /// use netmask::Mask;
    ///
    /// assert_eq!(Mask::from_prefix(24, 32).to_binary(), [255, 255, 255, 0]);
    /// assert_eq!(Mask::from_prefix(64, 128).to_binary(), [64]);
    /// assert!(Mask::INVALID.to_binary().is_empty());
    /// ```
    pub fn to_binary(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.binary_len());
        self.append_binary(&mut buf);
        buf
    }

    /// Decodes a mask from the form written by [`Mask::to_binary`].
    ///
    /// A single byte is read as an IPv6 prefix length through
    /// [`Mask::from_prefix`], so a value above 128 gives the invalid mask.
    ///
    /// # Errors
    /// If the input is not 0, 1 or 4 bytes long this will return
    /// [`MaskDecodeError::UnexpectedSize`].
    pub fn from_binary(bytes: &[u8]) -> Result<Mask, MaskDecodeError> {
        match *bytes {
            [] => Ok(Mask::INVALID),
            [ones] => Ok(Mask::from_prefix(i32::from(ones), 128)),
            [a, b, c, d] => Ok(Mask::from_ipv4_bytes([a, b, c, d])),
            _ => {
                log::debug!("binary mask of unexpected length {}", bytes.len());
                Err(MaskDecodeError::UnexpectedSize(bytes.len()))
            }
        }
    }
}
