//! Construction entry points.
//!
//! [`option_of`] is the single dispatch point: null becomes the present-null
//! option, each scalar kind goes to its specialized constructor (and through
//! its cache partition), anything else is held as a generic reference.
//!
//! Two null policies exist and are spelled differently at call sites:
//! [`some_nullable`] keeps a null as present-null, [`maybe`] turns it into
//! empty.

use crate::error::{OptionError, Result};
use crate::kind::Value;
use crate::scalar::Scalar;
use crate::variant::{
    BoolOpt, CharOpt, F32Opt, F64Opt, I16Opt, I32Opt, I64Opt, I8Opt, Opt, Present, ScalarOpt,
};

/// The empty option.
#[inline]
pub fn none<R>() -> Opt<R> {
    Opt::None
}

/// Routes a runtime value to its variant. Null is kept as present-null.
pub fn option_of<R>(value: Value<R>) -> Opt<R> {
    match value {
        Value::Null => Opt::Null,
        Value::Bool(v) => Opt::Bool(Present::new(v)),
        Value::I8(v) => Opt::I8(Present::new(v)),
        Value::I16(v) => Opt::I16(Present::new(v)),
        Value::Char(v) => Opt::Char(Present::new(v)),
        Value::I32(v) => Opt::I32(Present::new(v)),
        Value::I64(v) => Opt::I64(Present::new(v)),
        Value::F32(v) => Opt::F32(Present::new(v)),
        Value::F64(v) => Opt::F64(Present::new(v)),
        Value::Ref(r) => Opt::Ref(r),
    }
}

/// Present option for a value that must not be null.
pub fn some<R>(value: Value<R>) -> Result<Opt<R>> {
    if value.is_null() {
        log::debug!("rejected null passed to some()");
        return Err(OptionError::InvalidArgument("some() requires a non-null value"));
    }
    Ok(option_of(value))
}

/// Present option for any value; null becomes present-null.
#[inline]
pub fn some_nullable<R>(value: Value<R>) -> Opt<R> {
    option_of(value)
}

/// Present option for a non-null value; null becomes empty.
pub fn maybe<R>(value: Value<R>) -> Opt<R> {
    match value {
        Value::Null => Opt::None,
        other => option_of(other),
    }
}

/// Statically typed scalar construction, skipping runtime dispatch.
#[inline]
pub fn option_of_scalar<K: Scalar>(value: K) -> ScalarOpt<K> {
    ScalarOpt::of(value)
}

/// Scalar counterpart of [`maybe`].
#[inline]
pub fn maybe_scalar<K: Scalar>(value: Option<K>) -> ScalarOpt<K> {
    ScalarOpt::maybe(value)
}

#[inline]
pub fn option_of_bool(value: bool) -> BoolOpt {
    ScalarOpt::of(value)
}

#[inline]
pub fn option_of_byte(value: i8) -> I8Opt {
    ScalarOpt::of(value)
}

#[inline]
pub fn option_of_short(value: i16) -> I16Opt {
    ScalarOpt::of(value)
}

#[inline]
pub fn option_of_char(value: char) -> CharOpt {
    ScalarOpt::of(value)
}

#[inline]
pub fn option_of_int(value: i32) -> I32Opt {
    ScalarOpt::of(value)
}

#[inline]
pub fn option_of_long(value: i64) -> I64Opt {
    ScalarOpt::of(value)
}

#[inline]
pub fn option_of_float(value: f32) -> F32Opt {
    ScalarOpt::of(value)
}

#[inline]
pub fn option_of_double(value: f64) -> F64Opt {
    ScalarOpt::of(value)
}

impl<R> Opt<R> {
    #[inline]
    pub fn none() -> Self {
        none()
    }

    /// See [`some`].
    pub fn some(value: impl Into<Value<R>>) -> Result<Self> {
        some(value.into())
    }

    /// See [`some_nullable`].
    pub fn some_nullable(value: impl Into<Value<R>>) -> Self {
        some_nullable(value.into())
    }

    /// See [`maybe`].
    pub fn maybe(value: impl Into<Value<R>>) -> Self {
        maybe(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    #[test]
    fn boxed_scalars_upgrade_to_their_kind() {
        let cases: [(Value<String>, Kind); 8] = [
            (Value::Bool(true), Kind::Bool),
            (Value::I8(1), Kind::I8),
            (Value::I16(1), Kind::I16),
            (Value::Char('c'), Kind::Char),
            (Value::I32(1), Kind::I32),
            (Value::I64(1), Kind::I64),
            (Value::F32(1.5), Kind::F32),
            (Value::F64(1.5), Kind::F64),
        ];
        for (value, kind) in cases {
            assert_eq!(option_of(value).kind(), Some(kind));
        }
    }

    #[test]
    fn references_are_held_as_is() {
        let opt = option_of(Value::Ref(String::from("text")));
        assert_eq!(opt.get_ref().map(String::as_str), Ok("text"));
        assert!(!opt.is_cached());
    }

    #[test]
    fn null_policies_differ() {
        assert!(some_nullable::<String>(Value::Null).is_null());
        assert!(matches!(maybe::<String>(Value::Null), Opt::None));
        assert_eq!(
            some::<String>(Value::Null),
            Err(OptionError::InvalidArgument("some() requires a non-null value"))
        );
        assert_eq!(some::<String>(Value::I32(4)), Ok(Opt::I32(Present::new(4))));
    }

    #[test]
    fn routed_cached_scalars_share_an_instance() {
        let a = option_of::<()>(Value::I32(100));
        let b = option_of::<()>(Value::I32(100));
        assert!(a.same_instance(&b));
        let c = option_of::<()>(Value::I32(100_000));
        let d = option_of::<()>(Value::I32(100_000));
        assert!(!c.same_instance(&d));
        assert_eq!(c, d);
    }

    #[test]
    fn generic_scalar_constructors_match_typed_ones() {
        assert!(option_of_scalar(-3i64).same_instance(&option_of_long(-3)));
        assert!(option_of_scalar('\u{7f}').same_instance(&option_of_char('\u{7f}')));
        assert!(maybe_scalar(Some(true)).same_instance(&option_of_bool(true)));
        assert_eq!(maybe_scalar::<f32>(None), F32Opt::NONE);
    }

    #[test]
    fn associated_constructors_accept_plain_scalars() {
        assert_eq!(Opt::<String>::some(7i64), Ok(Opt::I64(Present::new(7))));
        assert!(Opt::<String>::maybe(Value::Null) == Opt::None);
        assert!(Opt::<String>::some_nullable('q').filter_to::<char>().is_cached());
    }
}
