use core::fmt;

use alloc::vec::Vec;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::Mask;

/// Human readable formats get the text form, compact ones the binary form.
impl Serialize for Mask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_text())
        } else {
            serializer.serialize_bytes(&self.to_binary())
        }
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(MaskVisitor)
        } else {
            deserializer.deserialize_bytes(MaskVisitor)
        }
    }
}

struct MaskVisitor;

impl<'de> Visitor<'de> for MaskVisitor {
    type Value = Mask;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a network mask in text or binary form")
    }

    fn visit_str<E>(self, v: &str) -> Result<Mask, E>
    where
        E: de::Error,
    {
        Mask::from_text(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Mask, E>
    where
        E: de::Error,
    {
        Mask::from_binary(v).map_err(E::custom)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Mask, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Mask::from_binary(&bytes).map_err(de::Error::custom)
    }
}
