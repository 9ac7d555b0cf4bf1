//! Serde helpers for lenient decoding of Couchbase payloads.

use serde::{
    Deserialize, Deserializer,
    de::{Error, MapAccess, Visitor, value::MapAccessDeserializer},
};
use std::{fmt, marker::PhantomData};

/// Deserialization for integers that Couchbase may encode either as a JSON
/// number or as a string holding a number (e.g. `"uptime": "86400"`).
///
/// `null` and the empty string decode as `0`.
pub mod u64_from_string_or_number {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    /// Deserialize a u64 from a number, a numeric string, or null.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(0),
            Some(Raw::Number(value)) => Ok(value),
            Some(Raw::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(0);
                }
                text.parse::<u64>()
                    .map_err(|_| D::Error::custom(format!("invalid integer string `{text}`")))
            }
        }
    }
}

/// A struct that only decodes from a map.
///
/// Derived struct deserializers also accept a sequence and fill the fields by
/// position. Wrapping the type in `Object` turns a sequence into an error.
#[derive(Debug)]
pub struct Object<T>(pub T);

struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
        T::deserialize(MapAccessDeserializer::new(map))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Object<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(ObjectVisitor(PhantomData))
            .map(Object)
    }
}

/// `deserialize_with` form of [`Object`] for a struct-valued field.
pub mod object {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Object::deserialize(deserializer).map(|Object(value)| value)
    }
}

/// Optional struct-valued field; `null` decodes as `None`.
pub mod optional_object {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<Object<T>>::deserialize(deserializer).map(|value| value.map(|Object(v)| v))
    }
}

/// List of structs, each of which must be an object.
pub mod vec_of_objects {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Vec::<Object<T>>::deserialize(deserializer)
            .map(|items| items.into_iter().map(|Object(v)| v).collect())
    }
}
