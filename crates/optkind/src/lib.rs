//! optkind: optional values with per-kind specialization and canonical
//! instances.
//!
//! Every scalar kind (bool, i8, i16, char, i32, i64, f32, f64) has its own
//! option type, [`ScalarOpt<K>`], and a fixed cache range whose values are
//! interned: constructing a cached value twice yields the same instance.
//! [`Opt<R>`] is the erased family: it can be empty, hold null, hold any
//! scalar (upgraded to the scalar's representation) or hold a reference `R`.
//! Construction goes through the [`router`], and the combinator surface is
//! shared through the [`Optional`] trait.

pub mod cache;
pub mod codec;
pub mod combinator;
pub mod convert;
pub mod error;
pub mod kind;
pub mod router;
pub mod scalar;
#[cfg(feature = "serde")]
pub mod ser;
pub mod variant;

pub use codec::RefCodec;
pub use combinator::Optional;
pub use error::{DecodeError, EncodeError, OptionError, Result};
pub use kind::{Kind, Value};
pub use router::{
    maybe, maybe_scalar, none, option_of, option_of_bool, option_of_byte, option_of_char,
    option_of_double, option_of_float, option_of_int, option_of_long, option_of_scalar,
    option_of_short, some, some_nullable,
};
pub use scalar::Scalar;
#[cfg(feature = "serde")]
pub use ser::SerdeScalar;
pub use variant::{
    BoolOpt, CharOpt, F32Opt, F64Opt, I16Opt, I32Opt, I64Opt, I8Opt, Opt, Present, ScalarOpt,
};

/// Everything needed to build and chain options.
pub mod prelude {
    pub use crate::combinator::Optional;
    pub use crate::error::OptionError;
    pub use crate::kind::{Kind, Value};
    pub use crate::router::*;
    pub use crate::variant::{
        BoolOpt, CharOpt, F32Opt, F64Opt, I16Opt, I32Opt, I64Opt, I8Opt, Opt, ScalarOpt,
    };
}
