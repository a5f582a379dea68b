use thiserror::Error;

/// An error which can be returned when decoding a [`Mask`] from its binary or
/// text form.
///
/// Constructors never produce this error. Input that is well formed but does
/// not describe a prefix decodes to the invalid mask instead.
///
/// [`Mask`]: crate::Mask
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskDecodeError {
    /// The input length matches none of the encodings.
    #[error("unexpected slice size: {0}")]
    UnexpectedSize(usize),
    /// A field is empty or holds something other than decimal digits.
    #[error("invalid digit in mask")]
    InvalidDigit,
    /// A dotted-decimal mask does not have exactly four fields.
    #[error("expected 4 dotted fields, found {0}")]
    FieldCount(usize),
    /// A dotted-decimal field is larger than 255.
    #[error("dotted field out of range")]
    OctetOutOfRange,
}
