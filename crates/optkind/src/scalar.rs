//! The eight scalar kinds and their per-kind rules.
//!
//! Every piece of behavior that differs between scalar kinds lives behind the
//! [`Scalar`] trait: which cache partition to consult, how two values compare,
//! how they hash, and which [`Opt`] case carries them. Everything else is
//! written once, generically.

use core::fmt;

use crate::cache;
use crate::codec::ScalarWire;
use crate::kind::{Kind, Value};
use crate::variant::{Opt, Present};

mod sealed {
    pub trait Sealed {}
}

/// A primitive kind that options store unboxed.
///
/// Sealed: the set of scalar kinds is closed.
pub trait Scalar:
    sealed::Sealed + ScalarWire + Copy + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const KIND: Kind;

    /// Prefix used when displaying a present option, e.g. `IntOption[5]`.
    const LABEL: &'static str;

    /// The canonical shared instance for `self`, if `self` is in this kind's
    /// cached set.
    fn cached(self) -> Option<&'static Self>;

    /// Kind-defined equality.
    fn same(self, other: Self) -> bool;

    /// Bits fed to the hasher; equal values produce equal bits.
    fn hash_bits(self) -> u64;

    fn into_value<R>(self) -> Value<R>;

    fn from_value<R>(value: &Value<R>) -> Option<Self>;

    /// Lifts a present scalar into the erased option family.
    fn wrap<R>(present: Present<Self>) -> Opt<R>;

    /// The present scalar held by `opt`, if it holds this kind.
    fn project<R>(opt: &Opt<R>) -> Option<Present<Self>>;
}

macro_rules! impl_scalar_common {
    ($t:ty, $variant:ident, $label:literal, $cache:path) => {
        impl sealed::Sealed for $t {}

        impl Scalar for $t {
            const KIND: Kind = Kind::$variant;
            const LABEL: &'static str = $label;

            #[inline]
            fn cached(self) -> Option<&'static Self> {
                $cache(self)
            }

            #[inline]
            fn same(self, other: Self) -> bool {
                self.canonical_bits() == other.canonical_bits()
            }

            #[inline]
            fn hash_bits(self) -> u64 {
                self.canonical_bits()
            }

            #[inline]
            fn into_value<R>(self) -> Value<R> {
                Value::$variant(self)
            }

            #[inline]
            fn from_value<R>(value: &Value<R>) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            #[inline]
            fn wrap<R>(present: Present<Self>) -> Opt<R> {
                Opt::$variant(present)
            }

            #[inline]
            fn project<R>(opt: &Opt<R>) -> Option<Present<Self>> {
                match opt {
                    Opt::$variant(p) => Some(*p),
                    _ => None,
                }
            }
        }
    };
}

/// Bit image used for equality and hashing.
trait CanonicalBits {
    fn canonical_bits(self) -> u64;
}

macro_rules! impl_integer_bits {
    ($($t:ty),*) => {
        $(
            impl CanonicalBits for $t {
                #[inline]
                fn canonical_bits(self) -> u64 {
                    // Sign extension keeps distinct values distinct.
                    self as i64 as u64
                }
            }
        )*
    };
}

impl_integer_bits!(i8, i16, i32, i64);

impl CanonicalBits for bool {
    #[inline]
    fn canonical_bits(self) -> u64 {
        u64::from(self)
    }
}

impl CanonicalBits for char {
    #[inline]
    fn canonical_bits(self) -> u64 {
        u64::from(u32::from(self))
    }
}

// Every NaN payload collapses onto the canonical pattern; everything else
// keeps its raw bits, so the signed zeros stay apart.
impl CanonicalBits for f32 {
    #[inline]
    fn canonical_bits(self) -> u64 {
        if self.is_nan() {
            u64::from(cache::params::F32_CANONICAL_NAN_BITS)
        } else {
            u64::from(self.to_bits())
        }
    }
}

impl CanonicalBits for f64 {
    #[inline]
    fn canonical_bits(self) -> u64 {
        if self.is_nan() {
            cache::params::F64_CANONICAL_NAN_BITS
        } else {
            self.to_bits()
        }
    }
}

impl_scalar_common!(bool, Bool, "BooleanOption", cache::bool_slot);
impl_scalar_common!(i8, I8, "ByteOption", cache::i8_slot);
impl_scalar_common!(i16, I16, "ShortOption", cache::i16_slot);
impl_scalar_common!(char, Char, "CharOption", cache::char_slot);
impl_scalar_common!(i32, I32, "IntOption", cache::i32_slot);
impl_scalar_common!(i64, I64, "LongOption", cache::i64_slot);
impl_scalar_common!(f32, F32, "FloatOption", cache::f32_slot);
impl_scalar_common!(f64, F64, "DoubleOption", cache::f64_slot);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zeros_are_distinct() {
        assert!(!0.0f64.same(-0.0));
        assert!(!0.0f32.same(-0.0));
        assert_ne!(0.0f64.hash_bits(), (-0.0f64).hash_bits());
    }

    #[test]
    fn every_nan_payload_is_the_same_value() {
        let odd = f64::from_bits(0xfff0_0000_dead_beef);
        assert!(odd.is_nan());
        assert!(odd.same(f64::NAN));
        assert_eq!(odd.hash_bits(), f64::NAN.hash_bits());

        let odd32 = f32::from_bits(0x7fa0_0001);
        assert!(odd32.same(f32::NAN));
    }

    #[test]
    fn integers_compare_by_value() {
        assert!(7i64.same(7));
        assert!(!(-1i8).same(1));
        assert_ne!((-1i16).hash_bits(), 0xffffu64);
        assert!('a'.same('a'));
        assert!(!true.same(false));
    }

    #[test]
    fn value_conversion_checks_kind() {
        let v: Value<()> = 3i16.into_value();
        assert_eq!(i16::from_value(&v), Some(3));
        assert_eq!(i32::from_value(&v), None);
        assert_eq!(<f32 as Scalar>::KIND, Kind::F32);
    }
}
