//! Kind tags and the erased runtime value the router dispatches on.

use core::fmt;

use crate::scalar::Scalar;

/// Closed set of value kinds an option can hold.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Null,
    Bool,
    I8,
    I16,
    Char,
    I32,
    I64,
    F32,
    F64,
    /// Any non-scalar value, held as-is.
    Ref,
}

impl Kind {
    /// The eight kinds that get unboxed, interned treatment.
    pub const SCALARS: [Kind; 8] = [
        Kind::Bool,
        Kind::I8,
        Kind::I16,
        Kind::Char,
        Kind::I32,
        Kind::I64,
        Kind::F32,
        Kind::F64,
    ];

    pub fn is_scalar(self) -> bool {
        !matches!(self, Kind::Null | Kind::Ref)
    }

    /// Stable one-byte tag used by the canonical encoding.
    pub const fn tag(self) -> u8 {
        match self {
            Kind::Null => 0x01,
            Kind::Bool => 0x02,
            Kind::I8 => 0x03,
            Kind::I16 => 0x04,
            Kind::Char => 0x05,
            Kind::I32 => 0x06,
            Kind::I64 => 0x07,
            Kind::F32 => 0x08,
            Kind::F64 => 0x09,
            Kind::Ref => 0x0a,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Kind> {
        let kind = match tag {
            0x01 => Kind::Null,
            0x02 => Kind::Bool,
            0x03 => Kind::I8,
            0x04 => Kind::I16,
            0x05 => Kind::Char,
            0x06 => Kind::I32,
            0x07 => Kind::I64,
            0x08 => Kind::F32,
            0x09 => Kind::F64,
            0x0a => Kind::Ref,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::Char => "char",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Ref => "reference",
        };
        f.write_str(name)
    }
}

/// A value whose kind is only known at runtime: null, one of the scalar
/// kinds, or an arbitrary reference `R`.
///
/// This is what the construction router inspects. A scalar that arrives here
/// (for example an `i32` passed through generic code) is still upgraded to its
/// specialized option.
#[derive(Clone, Copy, Debug)]
pub enum Value<R> {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    Char(char),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Ref(R),
}

impl<R> Value<R> {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::Char(_) => Kind::Char,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Ref(_) => Kind::Ref,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_ref(&self) -> Value<&R> {
        self.by_ref_map(|r| r)
    }

    /// Transforms the reference payload, leaving null and scalars untouched.
    pub fn map_ref<U, F>(self, f: F) -> Value<U>
    where
        F: FnOnce(R) -> U,
    {
        match self {
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(v),
            Value::I8(v) => Value::I8(v),
            Value::I16(v) => Value::I16(v),
            Value::Char(v) => Value::Char(v),
            Value::I32(v) => Value::I32(v),
            Value::I64(v) => Value::I64(v),
            Value::F32(v) => Value::F32(v),
            Value::F64(v) => Value::F64(v),
            Value::Ref(r) => Value::Ref(f(r)),
        }
    }

    fn by_ref_map<'a, U, F>(&'a self, f: F) -> Value<U>
    where
        F: FnOnce(&'a R) -> U,
    {
        match self {
            Value::Ref(r) => Value::Ref(f(r)),
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(*v),
            Value::I8(v) => Value::I8(*v),
            Value::I16(v) => Value::I16(*v),
            Value::Char(v) => Value::Char(*v),
            Value::I32(v) => Value::I32(*v),
            Value::I64(v) => Value::I64(*v),
            Value::F32(v) => Value::F32(*v),
            Value::F64(v) => Value::F64(*v),
        }
    }

    /// The reference payload, if this is one.
    pub fn into_ref(self) -> Option<R> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// The scalar payload, if this holds exactly kind `K`.
    pub fn scalar<K: Scalar>(&self) -> Option<K> {
        K::from_value(self)
    }
}

impl<R: Clone> Value<&R> {
    pub fn cloned(self) -> Value<R> {
        self.map_ref(R::clone)
    }
}

/// Kind-defined equality: floats compare by canonicalized bits, so NaN equals
/// NaN and `0.0` differs from `-0.0`.
impl<R: PartialEq> PartialEq for Value<R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a.same(*b),
            (Value::I8(a), Value::I8(b)) => a.same(*b),
            (Value::I16(a), Value::I16(b)) => a.same(*b),
            (Value::Char(a), Value::Char(b)) => a.same(*b),
            (Value::I32(a), Value::I32(b)) => a.same(*b),
            (Value::I64(a), Value::I64(b)) => a.same(*b),
            (Value::F32(a), Value::F32(b)) => a.same(*b),
            (Value::F64(a), Value::F64(b)) => a.same(*b),
            (Value::Ref(a), Value::Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl<R: Eq> Eq for Value<R> {}

impl<R: fmt::Display> fmt::Display for Value<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => fmt::Display::fmt(v, f),
            Value::I8(v) => fmt::Display::fmt(v, f),
            Value::I16(v) => fmt::Display::fmt(v, f),
            Value::Char(v) => fmt::Display::fmt(v, f),
            Value::I32(v) => fmt::Display::fmt(v, f),
            Value::I64(v) => fmt::Display::fmt(v, f),
            Value::F32(v) => fmt::Display::fmt(v, f),
            Value::F64(v) => fmt::Display::fmt(v, f),
            Value::Ref(r) => fmt::Display::fmt(r, f),
        }
    }
}

macro_rules! impl_value_from_scalar {
    ($t:ty, $variant:ident) => {
        impl<R> From<$t> for Value<R> {
            #[inline]
            fn from(v: $t) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_value_from_scalar!(bool, Bool);
impl_value_from_scalar!(i8, I8);
impl_value_from_scalar!(i16, I16);
impl_value_from_scalar!(char, Char);
impl_value_from_scalar!(i32, I32);
impl_value_from_scalar!(i64, I64);
impl_value_from_scalar!(f32, F32);
impl_value_from_scalar!(f64, F64);
