//! The closed family of option variants.
//!
//! - [`Present<K>`]: a present scalar, either the canonical cached instance or
//!   a fresh inline value. Never heap-allocated.
//! - [`ScalarOpt<K>`]: a statically typed scalar option. It has no null
//!   state, so scalar accessors on a present-null option cannot be written.
//! - [`Opt<R>`]: the erased family. Empty, present-null, a generic reference,
//!   or one case per scalar kind.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ptr;

use crate::error::{OptionError, Result};
use crate::kind::{Kind, Value};
use crate::router;
use crate::scalar::Scalar;

/// Hash written for every empty option.
pub(crate) const NONE_HASH: i32 = 0;
/// Hash written for every present-null option.
pub(crate) const NULL_HASH: i32 = -1;

#[derive(Clone, Copy)]
enum Slot<K: 'static> {
    Canonical(&'static K),
    Fresh(K),
}

/// A present scalar value of kind `K`.
#[derive(Clone, Copy)]
pub struct Present<K: Scalar>(Slot<K>);

impl<K: Scalar> Present<K> {
    /// Builds a present value, returning the canonical instance when `value`
    /// is in the cached set.
    #[inline]
    pub fn new(value: K) -> Self {
        match value.cached() {
            Some(canonical) => Present(Slot::Canonical(canonical)),
            None => Present(Slot::Fresh(value)),
        }
    }

    #[inline]
    pub fn get(self) -> K {
        match self.0 {
            Slot::Canonical(v) => *v,
            Slot::Fresh(v) => v,
        }
    }

    /// Whether this is the shared canonical instance for its value.
    pub fn is_cached(self) -> bool {
        matches!(self.0, Slot::Canonical(_))
    }

    /// Instance identity: both point at the same canonical slot.
    pub fn same_instance(self, other: Self) -> bool {
        match (self.0, other.0) {
            (Slot::Canonical(a), Slot::Canonical(b)) => ptr::eq(a, b),
            _ => false,
        }
    }
}

impl<K: Scalar> PartialEq for Present<K> {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(*other) || self.get().same(other.get())
    }
}

impl<K: Scalar> Eq for Present<K> {}

impl<K: Scalar> Hash for Present<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.get().hash_bits());
    }
}

impl<K: Scalar> fmt::Debug for Present<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Present")
            .field("value", &self.get())
            .field("cached", &self.is_cached())
            .finish()
    }
}

/// An optional scalar of kind `K`, stored without boxing.
#[derive(Clone, Copy, Debug)]
pub struct ScalarOpt<K: Scalar>(Option<Present<K>>);

pub type BoolOpt = ScalarOpt<bool>;
pub type I8Opt = ScalarOpt<i8>;
pub type I16Opt = ScalarOpt<i16>;
pub type CharOpt = ScalarOpt<char>;
pub type I32Opt = ScalarOpt<i32>;
pub type I64Opt = ScalarOpt<i64>;
pub type F32Opt = ScalarOpt<f32>;
pub type F64Opt = ScalarOpt<f64>;

impl<K: Scalar> ScalarOpt<K> {
    pub const NONE: Self = ScalarOpt(None);

    #[inline]
    pub const fn none() -> Self {
        Self::NONE
    }

    /// Present option for `value`; cached values return the canonical
    /// instance.
    #[inline]
    pub fn of(value: K) -> Self {
        ScalarOpt(Some(Present::new(value)))
    }

    /// Empty for `None`, present otherwise.
    #[inline]
    pub fn maybe(value: Option<K>) -> Self {
        value.map_or(Self::NONE, Self::of)
    }

    pub(crate) fn from_present(present: Option<Present<K>>) -> Self {
        ScalarOpt(present)
    }

    pub fn present(self) -> Option<Present<K>> {
        self.0
    }

    /// Scalar-typed accessor, same as `get` but without the trait in scope.
    pub fn value(self) -> Result<K> {
        self.0.map(Present::get).ok_or(OptionError::ValueAbsent)
    }

    pub fn is_cached(&self) -> bool {
        self.0.is_some_and(Present::is_cached)
    }

    /// Instance identity. Empty options are all the same instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_instance(b),
            _ => false,
        }
    }

    /// Maps the held value within the same kind.
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(K) -> K,
    {
        self.map_to(f)
    }

    /// Maps the held value into another scalar kind.
    pub fn map_to<U, F>(self, f: F) -> ScalarOpt<U>
    where
        U: Scalar,
        F: FnOnce(K) -> U,
    {
        match self.0 {
            Some(p) => ScalarOpt::of(f(p.get())),
            None => ScalarOpt::NONE,
        }
    }

    /// Maps the held value to an arbitrary runtime value; the result is
    /// routed like any other construction.
    pub fn map_to_value<R, F>(self, f: F) -> Opt<R>
    where
        F: FnOnce(K) -> Value<R>,
    {
        match self.0 {
            Some(p) => router::option_of(f(p.get())),
            None => Opt::None,
        }
    }

    /// Lifts this option into the erased family.
    pub fn into_opt<R>(self) -> Opt<R> {
        match self.0 {
            Some(p) => K::wrap(p),
            None => Opt::None,
        }
    }
}

impl<K: Scalar> Default for ScalarOpt<K> {
    fn default() -> Self {
        Self::NONE
    }
}

// Manual impls: the float kinds are not `Eq`/`Hash` themselves, but the
// kind-defined equality is reflexive.
impl<K: Scalar> PartialEq for ScalarOpt<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K: Scalar> Eq for ScalarOpt<K> {}

impl<K: Scalar> Hash for ScalarOpt<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Some(p) => p.hash(state),
            None => state.write_i32(NONE_HASH),
        }
    }
}

impl<K: Scalar> fmt::Display for ScalarOpt<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "{}[{}]", K::LABEL, p.get()),
            None => f.write_str("Option.none"),
        }
    }
}

/// An optional value whose kind is decided at construction time.
#[derive(Clone, Copy, Debug)]
pub enum Opt<R> {
    /// No value. Every empty option is this one instance.
    None,
    /// Present, and the value is null. Distinct from `None`.
    Null,
    /// A generic reference, held as-is and never interned.
    Ref(R),
    Bool(Present<bool>),
    I8(Present<i8>),
    I16(Present<i16>),
    Char(Present<char>),
    I32(Present<i32>),
    I64(Present<i64>),
    F32(Present<f32>),
    F64(Present<f64>),
}

/// Evaluates `$body` with `$p` bound to the present scalar of any scalar
/// case, `$fallback` otherwise.
macro_rules! with_scalar {
    ($opt:expr, $p:ident => $body:expr, $otherwise:pat => $fallback:expr) => {
        match $opt {
            Opt::Bool($p) => $body,
            Opt::I8($p) => $body,
            Opt::I16($p) => $body,
            Opt::Char($p) => $body,
            Opt::I32($p) => $body,
            Opt::I64($p) => $body,
            Opt::F32($p) => $body,
            Opt::F64($p) => $body,
            $otherwise => $fallback,
        }
    };
}

impl<R> Opt<R> {
    /// Wraps a reference as-is. Use the router for values that may be null
    /// or scalars.
    #[inline]
    pub fn of_ref(value: R) -> Self {
        Opt::Ref(value)
    }

    /// Kind of the held value; `None` when empty.
    pub fn kind(&self) -> Option<Kind> {
        let kind = match self {
            Opt::None => return None,
            Opt::Null => Kind::Null,
            Opt::Ref(_) => Kind::Ref,
            Opt::Bool(_) => Kind::Bool,
            Opt::I8(_) => Kind::I8,
            Opt::I16(_) => Kind::I16,
            Opt::Char(_) => Kind::Char,
            Opt::I32(_) => Kind::I32,
            Opt::I64(_) => Kind::I64,
            Opt::F32(_) => Kind::F32,
            Opt::F64(_) => Kind::F64,
        };
        Some(kind)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Opt::Null)
    }

    pub fn as_ref(&self) -> Opt<&R> {
        match self {
            Opt::None => Opt::None,
            Opt::Null => Opt::Null,
            Opt::Ref(r) => Opt::Ref(r),
            Opt::Bool(p) => Opt::Bool(*p),
            Opt::I8(p) => Opt::I8(*p),
            Opt::I16(p) => Opt::I16(*p),
            Opt::Char(p) => Opt::Char(*p),
            Opt::I32(p) => Opt::I32(*p),
            Opt::I64(p) => Opt::I64(*p),
            Opt::F32(p) => Opt::F32(*p),
            Opt::F64(p) => Opt::F64(*p),
        }
    }

    /// Whether this holds a canonical cached scalar.
    pub fn is_cached(&self) -> bool {
        with_scalar!(self, p => p.is_cached(), _ => false)
    }

    /// Instance identity: both empty, both null, or the same canonical
    /// scalar. Reference and fresh scalar values are never identical here.
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Opt::None, Opt::None) | (Opt::Null, Opt::Null) => true,
            (Opt::Bool(a), Opt::Bool(b)) => a.same_instance(*b),
            (Opt::I8(a), Opt::I8(b)) => a.same_instance(*b),
            (Opt::I16(a), Opt::I16(b)) => a.same_instance(*b),
            (Opt::Char(a), Opt::Char(b)) => a.same_instance(*b),
            (Opt::I32(a), Opt::I32(b)) => a.same_instance(*b),
            (Opt::I64(a), Opt::I64(b)) => a.same_instance(*b),
            (Opt::F32(a), Opt::F32(b)) => a.same_instance(*b),
            (Opt::F64(a), Opt::F64(b)) => a.same_instance(*b),
            _ => false,
        }
    }

    /// This option as a kind-`K` scalar option; empty unless it holds `K`.
    pub fn filter_to<K: Scalar>(&self) -> ScalarOpt<K> {
        ScalarOpt::from_present(K::project(self))
    }

    /// Keeps only a generic reference value.
    pub fn filter_ref(self) -> Self {
        match self {
            Opt::Ref(r) => Opt::Ref(r),
            _ => Opt::None,
        }
    }

    /// Drops a present null; everything else passes through.
    pub fn filter_non_null(self) -> Self {
        match self {
            Opt::Null => Opt::None,
            other => other,
        }
    }

    /// Extracts a value of kind `K`.
    pub fn get_as<K: Scalar>(&self) -> Result<K> {
        match K::project(self) {
            Some(p) => Ok(p.get()),
            None => Err(self.mismatch(K::KIND)),
        }
    }

    /// Borrows the reference value.
    pub fn get_ref(&self) -> Result<&R> {
        match self {
            Opt::Ref(r) => Ok(r),
            other => Err(other.mismatch(Kind::Ref)),
        }
    }

    /// Converts to a std option of the reference value. Empty maps to `None`;
    /// a present null has no std representation and is `ValueAbsent`.
    pub fn into_ref(self) -> Result<Option<R>> {
        match self {
            Opt::None => Ok(None),
            Opt::Ref(r) => Ok(Some(r)),
            other => Err(other.mismatch(Kind::Ref)),
        }
    }

    fn mismatch(&self, expected: Kind) -> OptionError {
        match self.kind() {
            None | Some(Kind::Null) => OptionError::ValueAbsent,
            Some(found) => OptionError::TypeMismatch { expected, found },
        }
    }

    /// The held value in erased form; `None` when empty.
    pub(crate) fn into_value(self) -> Option<Value<R>> {
        let value = match self {
            Opt::None => return None,
            Opt::Null => Value::Null,
            Opt::Ref(r) => Value::Ref(r),
            Opt::Bool(p) => Value::Bool(p.get()),
            Opt::I8(p) => Value::I8(p.get()),
            Opt::I16(p) => Value::I16(p.get()),
            Opt::Char(p) => Value::Char(p.get()),
            Opt::I32(p) => Value::I32(p.get()),
            Opt::I64(p) => Value::I64(p.get()),
            Opt::F32(p) => Value::F32(p.get()),
            Opt::F64(p) => Value::F64(p.get()),
        };
        Some(value)
    }
}

impl<R> Default for Opt<R> {
    fn default() -> Self {
        Opt::None
    }
}

impl<R: PartialEq> PartialEq for Opt<R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Opt::None, Opt::None) | (Opt::Null, Opt::Null) => true,
            (Opt::Ref(a), Opt::Ref(b)) => a == b,
            (Opt::Bool(a), Opt::Bool(b)) => a == b,
            (Opt::I8(a), Opt::I8(b)) => a == b,
            (Opt::I16(a), Opt::I16(b)) => a == b,
            (Opt::Char(a), Opt::Char(b)) => a == b,
            (Opt::I32(a), Opt::I32(b)) => a == b,
            (Opt::I64(a), Opt::I64(b)) => a == b,
            (Opt::F32(a), Opt::F32(b)) => a == b,
            (Opt::F64(a), Opt::F64(b)) => a == b,
            _ => false,
        }
    }
}

impl<R: Eq> Eq for Opt<R> {}

impl<R: Hash> Hash for Opt<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Opt::None => state.write_i32(NONE_HASH),
            Opt::Null => state.write_i32(NULL_HASH),
            Opt::Ref(r) => {
                state.write_u8(Kind::Ref.tag());
                r.hash(state);
            }
            other => with_scalar!(other, p => {
                state.write_u8(scalar_tag(other));
                p.hash(state);
            }, _ => {}),
        }
    }
}

fn scalar_tag<R>(opt: &Opt<R>) -> u8 {
    opt.kind().map_or(0, Kind::tag)
}

impl<R: fmt::Display> fmt::Display for Opt<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opt::None => f.write_str("Option.none"),
            Opt::Null => f.write_str("Option[null]"),
            Opt::Ref(r) => write!(f, "Option[{r}]"),
            other => with_scalar!(
                other,
                p => write!(f, "{}", ScalarOpt::from_present(Some(*p))),
                _ => Ok(())
            ),
        }
    }
}
