// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::marker::PhantomData;

use crate::index::{Index, Key};
use crate::element::Element;
use crate::storage::Storage;
use crate::{ArrayBase, Ix};

/// Version of the serialized array layout.
const ARRAY_FORMAT_VERSION: u8 = 1u8;

/// Verifies that the version of the deserialized array matches the current
/// `ARRAY_FORMAT_VERSION`.
fn verify_version<E>(v: u8) -> Result<(), E>
where
    E: de::Error,
{
    if v != ARRAY_FORMAT_VERSION {
        let err_msg = format!("unknown array version: {}", v);
        Err(de::Error::custom(err_msg))
    } else {
        Ok(())
    }
}

/// Arrays serialize as their shape and their elements in logical
/// (column-major) order. Views serialize their own elements only.
///
/// **Requires crate feature `"serde"`**
impl<A, S> Serialize for ArrayBase<S>
where
    A: Element + Serialize,
    S: Storage<Elem = A>,
{
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        let mut state = serializer.serialize_struct("Array", 3)?;
        state.serialize_field("v", &ARRAY_FORMAT_VERSION)?;
        state.serialize_field("dim", self.shape())?;
        state.serialize_field("data", &Sequence(self))?;
        state.end()
    }
}

// private iterator wrapper
struct Sequence<'a, S>(&'a ArrayBase<S>);

impl<'a, A, S> Serialize for Sequence<'a, S>
where
    A: Element + Serialize,
    S: Storage<Elem = A>,
{
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

struct ArrayVisitor<S> {
    _marker: PhantomData<S>,
}

enum ArrayField {
    Version,
    Dim,
    Data,
}

impl<S> ArrayVisitor<S> {
    fn new() -> Self {
        ArrayVisitor { _marker: PhantomData }
    }
}

static ARRAY_FIELDS: &[&str] = &["v", "dim", "data"];

/// **Requires crate feature `"serde"`**
impl<'de, A, S> Deserialize<'de> for ArrayBase<S>
where
    A: Element + Deserialize<'de>,
    S: Storage<Elem = A>,
{
    fn deserialize<D>(deserializer: D) -> Result<ArrayBase<S>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("Array", ARRAY_FIELDS, ArrayVisitor::new())
    }
}

impl<'de> Deserialize<'de> for ArrayField {
    fn deserialize<D>(deserializer: D) -> Result<ArrayField, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ArrayFieldVisitor;

        impl<'de> Visitor<'de> for ArrayFieldVisitor {
            type Value = ArrayField;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(r#""v", "dim", or "data""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<ArrayField, E>
            where
                E: de::Error,
            {
                match value {
                    "v" => Ok(ArrayField::Version),
                    "dim" => Ok(ArrayField::Dim),
                    "data" => Ok(ArrayField::Data),
                    other => Err(de::Error::unknown_field(other, ARRAY_FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(ArrayFieldVisitor)
    }
}

fn assemble<S, E>(dim: Vec<Ix>, data: Vec<S::Elem>) -> Result<ArrayBase<S>, E>
where
    S: Storage,
    E: de::Error,
{
    ArrayBase::from_shape_vec(&dim, data).map_err(|_| de::Error::custom("data and dimension must match in size"))
}

impl<'de, A, S> Visitor<'de> for ArrayVisitor<S>
where
    A: Element + Deserialize<'de>,
    S: Storage<Elem = A>,
{
    type Value = ArrayBase<S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ndframe representation")
    }

    fn visit_seq<V>(self, mut visitor: V) -> Result<ArrayBase<S>, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let v: u8 = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(0, &self)),
        };
        verify_version(v)?;

        let dim: Vec<Ix> = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(1, &self)),
        };

        let data: Vec<A> = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(2, &self)),
        };

        assemble(dim, data)
    }

    fn visit_map<V>(self, mut visitor: V) -> Result<ArrayBase<S>, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut v: Option<u8> = None;
        let mut data: Option<Vec<A>> = None;
        let mut dim: Option<Vec<Ix>> = None;

        while let Some(key) = visitor.next_key()? {
            match key {
                ArrayField::Version => {
                    let val = visitor.next_value()?;
                    verify_version(val)?;
                    v = Some(val);
                }
                ArrayField::Data => {
                    data = Some(visitor.next_value()?);
                }
                ArrayField::Dim => {
                    dim = Some(visitor.next_value()?);
                }
            }
        }

        if v.is_none() {
            return Err(de::Error::missing_field("v"));
        }
        let data = data.ok_or_else(|| de::Error::missing_field("data"))?;
        let dim = dim.ok_or_else(|| de::Error::missing_field("dim"))?;

        assemble(dim, data)
    }
}

/// Label indices serialize as their keys in position order and whether they
/// are sorted. A sorted index deserializes with the natural key order.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Index")]
struct IndexRepr {
    keys: Vec<Key>,
    sorted: bool,
}

/// **Requires crate feature `"serde"`**
impl Serialize for Index {
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        let keys = (0..self.len()).filter_map(|p| self.key(p).ok()).collect();
        IndexRepr {
            keys,
            sorted: self.is_sorted(),
        }
        .serialize(serializer)
    }
}

/// **Requires crate feature `"serde"`**
impl<'de> Deserialize<'de> for Index {
    fn deserialize<D>(deserializer: D) -> Result<Index, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = IndexRepr::deserialize(deserializer)?;
        let index = if repr.sorted {
            Index::sorted(repr.keys)
        } else {
            Index::from_keys(repr.keys)
        };
        index.map_err(de::Error::custom)
    }
}
