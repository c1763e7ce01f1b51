//! Conversions to and from `std::option::Option`.
//!
//! Both directions route through the construction router, so a cached scalar
//! coming in from a std option is the canonical instance.

use crate::kind::Value;
use crate::router;
use crate::scalar::Scalar;
use crate::variant::{Opt, ScalarOpt};

impl<K: Scalar> From<Option<K>> for ScalarOpt<K> {
    fn from(value: Option<K>) -> Self {
        ScalarOpt::maybe(value)
    }
}

impl<K: Scalar> From<ScalarOpt<K>> for Option<K> {
    fn from(opt: ScalarOpt<K>) -> Self {
        opt.present().map(|p| p.get())
    }
}

impl<K: Scalar> From<K> for ScalarOpt<K> {
    fn from(value: K) -> Self {
        ScalarOpt::of(value)
    }
}

/// `Some(Value::Null)` becomes present-null, so the round trip through
/// [`Opt::into_std`](crate::combinator::Optional::into_std) is lossless.
impl<R> From<Option<Value<R>>> for Opt<R> {
    fn from(value: Option<Value<R>>) -> Self {
        value.map_or(Opt::None, router::some_nullable)
    }
}

impl<R> From<Value<R>> for Opt<R> {
    fn from(value: Value<R>) -> Self {
        router::option_of(value)
    }
}

impl<K: Scalar, R> From<ScalarOpt<K>> for Opt<R> {
    fn from(opt: ScalarOpt<K>) -> Self {
        opt.into_opt()
    }
}
