//! The coaster record and its JSON shape.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;

/// One roller coaster.
///
/// Zero-valued fields (`""`, `0`) are left out of the JSON output. Decoding
/// is lenient about everything that still fits the shape:
///
/// - missing fields keep their zero value and unknown ones are ignored;
/// - a `null` field value leaves the field untouched;
/// - a top-level `null` decodes to an empty record;
/// - field names match case-insensitively (`"Name"` sets `name`);
/// - when a key repeats, the last non-null value wins.
///
/// A value of the wrong type (`"height":"tall"`) is still an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Coaster {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub manufacturer: String,
    /// Assigned by the store; a client-supplied value is always replaced.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub in_park: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub height: i64,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

enum Field {
    Name,
    Manufacturer,
    Id,
    InPark,
    Height,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        [
            ("name", Self::Name),
            ("manufacturer", Self::Manufacturer),
            ("id", Self::Id),
            ("in_park", Self::InPark),
            ("height", Self::Height),
        ]
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, field)| field)
    }
}

impl<'de> Deserialize<'de> for Coaster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CoasterVisitor)
    }
}

struct CoasterVisitor;

impl<'de> Visitor<'de> for CoasterVisitor {
    type Value = Coaster;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a coaster object or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Coaster, E> {
        Ok(Coaster::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Coaster, E> {
        Ok(Coaster::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Coaster, A::Error> {
        let mut coaster = Coaster::default();

        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key(&key) {
                Some(Field::Name) => assign(&mut coaster.name, map.next_value()?),
                Some(Field::Manufacturer) => assign(&mut coaster.manufacturer, map.next_value()?),
                Some(Field::Id) => assign(&mut coaster.id, map.next_value()?),
                Some(Field::InPark) => assign(&mut coaster.in_park, map.next_value()?),
                Some(Field::Height) => assign(&mut coaster.height, map.next_value()?),
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(coaster)
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
