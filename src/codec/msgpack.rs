//! MsgPack codec using `rmp-serde`.
//!
//! Engine bodies are decoded into the [`RawPayload`] tree, not straight
//! into records, so the decoder applies the same rules to every encoding.
//!
//! Non-finite floats (NaN, infinities) are rejected: the value tree cannot
//! hold them, and a silently nulled channel or zoom level would decode to
//! its default instead of failing.
//!
//! Encoding uses `to_vec_named`: structs become maps keyed by field name,
//! which is the shape the decoder reads. `to_vec` would emit positional
//! arrays instead.
//!
//! # Example
//!
//! ```
//! use response_bridge::codec::MsgPackCodec;
//! use serde_json::json;
//!
//! let bytes = MsgPackCodec::encode(&json!({ "tool_name": "Fill" })).unwrap();
//! let payload = MsgPackCodec::decode(&bytes).unwrap();
//! assert_eq!(payload["tool_name"], "Fill");
//! ```

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

use crate::error::Result;
use crate::protocol::RawPayload;

/// MessagePack codec for payload bodies.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map).
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    #[inline]
    pub fn encode<T: serde::Serialize>(
        value: &T,
    ) -> std::result::Result<Vec<u8>, rmp_serde::encode::Error> {
        // to_vec_named, not to_vec
        rmp_serde::to_vec_named(value)
    }

    /// Decode MsgPack bytes into a raw payload tree.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MsgPack`](crate::error::DecodeError::MsgPack)
    /// if the bytes are not valid MsgPack.
    #[inline]
    pub fn decode(bytes: &[u8]) -> Result<RawPayload> {
        let Finite(value) = rmp_serde::from_slice(bytes)?;
        Ok(value)
    }
}

/// Payload tree built only from finite numbers.
struct Finite(Value);

impl<'de> Deserialize<'de> for Finite {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FiniteVisitor)
    }
}

struct FiniteVisitor;

impl<'de> Visitor<'de> for FiniteVisitor {
    type Value = Finite;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a MsgPack value without non-finite floats")
    }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<Finite, E> {
        Ok(Finite(Value::Bool(v)))
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<Finite, E> {
        Ok(Finite(Value::from(v)))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<Finite, E> {
        Ok(Finite(Value::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Finite, E> {
        Number::from_f64(v)
            .map(|n| Finite(Value::Number(n)))
            .ok_or_else(|| E::custom(format!("non-finite float {v}")))
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Finite, E> {
        Ok(Finite(Value::String(v.to_owned())))
    }

    fn visit_string<E>(self, v: String) -> std::result::Result<Finite, E> {
        Ok(Finite(Value::String(v)))
    }

    fn visit_unit<E>(self) -> std::result::Result<Finite, E> {
        Ok(Finite(Value::Null))
    }

    fn visit_none<E>(self) -> std::result::Result<Finite, E> {
        Ok(Finite(Value::Null))
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Finite, D::Error>
    where
        D: Deserializer<'de>,
    {
        Finite::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Finite, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Finite(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Finite(Value::Array(items)))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Finite, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Map::new();
        while let Some((key, Finite(value))) = map.next_entry::<String, Finite>()? {
            entries.insert(key, value);
        }
        Ok(Finite(Value::Object(entries)))
    }
}
