//! # Message Records
//!
//! Hand-maintained message records for the RPC surface, mirroring the
//! service's wire schema. Each record carries two projections:
//!
//! * a `prost` derive for the binary transport;
//! * a `serde` derive (camelCase keys, enum values by name, unknown fields
//!   ignored on decode) for the JSON transport.
//!
//! Tags follow the published schema so both transports interoperate with the
//! real service. Fields the client runtime never touches are omitted; the
//! records are opaque payloads as far as the runtime is concerned.

pub mod common;
pub mod job;
pub mod longrunning;
pub mod study;

/// Serializes a prost enumeration field by its wire name, the way the JSON
/// projection renders integer enums. Unknown values round-trip as numbers.
macro_rules! enum_as_name {
    ($module:ident, $enum_ty:ty) => {
        pub(crate) mod $module {
            use serde::de::{self, Visitor};
            use std::fmt;

            pub fn serialize<S: serde::Serializer>(
                value: &i32,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                match <$enum_ty>::try_from(*value) {
                    Ok(known) => serializer.serialize_str(known.as_str_name()),
                    Err(_) => serializer.serialize_i32(*value),
                }
            }

            pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<i32, D::Error> {
                struct NameOrNumber;

                impl Visitor<'_> for NameOrNumber {
                    type Value = i32;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("an enum value name or number")
                    }

                    fn visit_str<E: de::Error>(self, value: &str) -> Result<i32, E> {
                        <$enum_ty>::from_str_name(value)
                            .map(|v| v as i32)
                            .ok_or_else(|| E::custom(format!("unknown enum value '{value}'")))
                    }

                    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i32, E> {
                        i32::try_from(value).map_err(E::custom)
                    }

                    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i32, E> {
                        i32::try_from(value).map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(NameOrNumber)
            }
        }
    };
}

pub(crate) use enum_as_name;
