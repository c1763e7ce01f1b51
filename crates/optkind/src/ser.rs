//! Serde support.
//!
//! A scalar option serializes like `Option<K>`. An erased option serializes
//! as an externally tagged enum: `"None"`, `"Null"`, `{"I32": 5}`,
//! `{"Ref": ...}`. Deserialization always goes back through the construction
//! router, so cached values come back as their canonical instances and the
//! empty and null options as their singletons.
//!
//! `f32` and `f64` travel as their raw IEEE-754 bits (`u32`/`u64`). Formats
//! such as JSON write NaN and the infinities as `null`, which would read back
//! as an empty option; bits also keep NaN payloads and signed zeros.

use core::fmt;
use core::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::kind::Value;
use crate::router;
use crate::scalar::Scalar;
use crate::variant::{Opt, ScalarOpt};

/// Serde wire form of a scalar kind.
pub trait SerdeScalar: Scalar {
    type Wire: Serialize + DeserializeOwned;

    fn to_wire(self) -> Self::Wire;
    fn from_wire(wire: Self::Wire) -> Self;
}

macro_rules! impl_serde_scalar_as_is {
    ($($t:ty),*) => {
        $(
            impl SerdeScalar for $t {
                type Wire = $t;

                #[inline]
                fn to_wire(self) -> $t {
                    self
                }

                #[inline]
                fn from_wire(wire: $t) -> Self {
                    wire
                }
            }
        )*
    };
}

impl_serde_scalar_as_is!(bool, i8, i16, char, i32, i64);

impl SerdeScalar for f32 {
    type Wire = u32;

    #[inline]
    fn to_wire(self) -> u32 {
        self.to_bits()
    }

    #[inline]
    fn from_wire(wire: u32) -> Self {
        f32::from_bits(wire)
    }
}

impl SerdeScalar for f64 {
    type Wire = u64;

    #[inline]
    fn to_wire(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_wire(wire: u64) -> Self {
        f64::from_bits(wire)
    }
}

impl<K: SerdeScalar> Serialize for ScalarOpt<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.present() {
            Some(p) => serializer.serialize_some(&p.get().to_wire()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, K: SerdeScalar> Deserialize<'de> for ScalarOpt<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OptVisitor<K>(PhantomData<K>);
        impl<'de, K: SerdeScalar> serde::de::Visitor<'de> for OptVisitor<K> {
            type Value = ScalarOpt<K>;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an optional {}", K::KIND)
            }
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ScalarOpt::none())
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ScalarOpt::none())
            }
            fn visit_some<De>(self, deserializer: De) -> Result<Self::Value, De::Error>
            where
                De: serde::Deserializer<'de>,
            {
                let wire = <K::Wire as Deserialize<'de>>::deserialize(deserializer)?;
                let opt = ScalarOpt::of(K::from_wire(wire));
                if opt.is_cached() {
                    log::trace!("deserialized {} option resolved to its canonical instance", K::KIND);
                }
                Ok(opt)
            }
        }
        deserializer.deserialize_option(OptVisitor(PhantomData))
    }
}

#[derive(Serialize)]
#[serde(rename = "Opt")]
enum WireRef<'a, R> {
    None,
    Null,
    Ref(&'a R),
    Bool(bool),
    I8(i8),
    I16(i16),
    Char(char),
    I32(i32),
    I64(i64),
    F32(u32),
    F64(u64),
}

#[derive(Deserialize)]
#[serde(rename = "Opt")]
enum Wire<R> {
    None,
    Null,
    Ref(R),
    Bool(bool),
    I8(i8),
    I16(i16),
    Char(char),
    I32(i32),
    I64(i64),
    F32(u32),
    F64(u64),
}

impl<R: Serialize> Serialize for Opt<R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wire = match self {
            Opt::None => WireRef::None,
            Opt::Null => WireRef::Null,
            Opt::Ref(r) => WireRef::Ref(r),
            Opt::Bool(p) => WireRef::Bool(p.get()),
            Opt::I8(p) => WireRef::I8(p.get()),
            Opt::I16(p) => WireRef::I16(p.get()),
            Opt::Char(p) => WireRef::Char(p.get()),
            Opt::I32(p) => WireRef::I32(p.get()),
            Opt::I64(p) => WireRef::I64(p.get()),
            Opt::F32(p) => WireRef::F32(p.get().to_wire()),
            Opt::F64(p) => WireRef::F64(p.get().to_wire()),
        };
        wire.serialize(serializer)
    }
}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for Opt<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = match Wire::<R>::deserialize(deserializer)? {
            Wire::None => return Ok(Opt::None),
            Wire::Null => Value::Null,
            Wire::Ref(r) => Value::Ref(r),
            Wire::Bool(v) => Value::Bool(v),
            Wire::I8(v) => Value::I8(v),
            Wire::I16(v) => Value::I16(v),
            Wire::Char(v) => Value::Char(v),
            Wire::I32(v) => Value::I32(v),
            Wire::I64(v) => Value::I64(v),
            Wire::F32(bits) => Value::F32(f32::from_wire(bits)),
            Wire::F64(bits) => Value::F64(f64::from_wire(bits)),
        };
        let kind = value.kind();
        let opt = router::option_of(value);
        if opt.is_cached() {
            log::trace!("deserialized {} option resolved to its canonical instance", kind);
        }
        Ok(opt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::Optional;
    use crate::cache::params;
    use crate::variant::{BoolOpt, F32Opt, F64Opt, I32Opt};

    #[test]
    fn scalar_option_uses_plain_option_shape() {
        assert_eq!(serde_json::to_string(&I32Opt::of(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&I32Opt::none()).unwrap(), "null");
        let back: I32Opt = serde_json::from_str("5").unwrap();
        assert!(back.same_instance(&I32Opt::of(5)));
        let empty: BoolOpt = serde_json::from_str("null").unwrap();
        assert_eq!(empty, BoolOpt::NONE);
    }

    #[test]
    fn erased_option_is_externally_tagged() {
        let cases: [(Opt<String>, &str); 4] = [
            (Opt::None, r#""None""#),
            (Opt::Null, r#""Null""#),
            (Opt::some_nullable(5i32), r#"{"I32":5}"#),
            (Opt::of_ref("hi".to_string()), r#"{"Ref":"hi"}"#),
        ];
        for (opt, json) in cases {
            assert_eq!(serde_json::to_string(&opt).unwrap(), json);
            let back: Opt<String> = serde_json::from_str(json).unwrap();
            assert_eq!(back, opt);
        }
    }

    #[test]
    fn deserialized_cached_scalar_is_canonical() {
        let back: Opt<String> = serde_json::from_str(r#"{"I16":-128}"#).unwrap();
        assert!(back.same_instance(&Opt::some_nullable(-128i16)));
        let back: Opt<String> = serde_json::from_str(r#"{"I16":300}"#).unwrap();
        assert!(!back.is_cached());
    }

    #[test]
    fn floats_travel_as_bits() {
        assert_eq!(serde_json::to_string(&F32Opt::of(1.0)).unwrap(), "1065353216");
        assert_eq!(
            serde_json::to_string(&F64Opt::of(f64::NAN)).unwrap(),
            params::F64_CANONICAL_NAN_BITS.to_string()
        );
        assert_eq!(
            serde_json::to_string(&Opt::<String>::some_nullable(f32::INFINITY)).unwrap(),
            r#"{"F32":2139095040}"#
        );
    }

    #[test]
    fn non_finite_floats_survive_json() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0] {
            let opt = F64Opt::of(v);
            let back: F64Opt = serde_json::from_str(&serde_json::to_string(&opt).unwrap()).unwrap();
            assert!(back.same_instance(&opt), "{v} lost its canonical instance");

            let erased: Opt<String> = Opt::some_nullable(v);
            let back: Opt<String> =
                serde_json::from_str(&serde_json::to_string(&erased).unwrap()).unwrap();
            assert!(back.same_instance(&erased));
        }
        for v in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let opt = F32Opt::of(v);
            let back: F32Opt = serde_json::from_str(&serde_json::to_string(&opt).unwrap()).unwrap();
            assert!(back.is_present());
            assert!(back.same_instance(&opt));
        }
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(serde_json::from_str::<Opt<String>>(r#"{"U128":1}"#).is_err());
        assert!(serde_json::from_str::<I32Opt>(r#""five""#).is_err());
    }
}
