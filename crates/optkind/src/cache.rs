//! Canonical instance tables, one partition per scalar kind.
//!
//! Integer-like kinds keep a contiguous table indexed by `value - MIN`;
//! float kinds keep five singletons picked by bit pattern. Each partition is
//! a process-wide static built once on first use and read-only afterwards,
//! so lookups never lock.
//!
//! Lookups are total: a value outside the cached set yields `None`, there is
//! no separate membership test to keep in sync with the fetch.

use std::sync::LazyLock;

use crate::kind::Kind;

/// Cached ranges and float bit patterns.
pub mod params {
    pub const I16_MIN: i16 = -128;
    pub const I16_MAX: i16 = 127;

    pub const CHAR_MIN: char = '\u{0}';
    pub const CHAR_MAX: char = '\u{ff}';

    pub const I32_MIN: i32 = -128;
    pub const I32_MAX: i32 = 127;

    pub const I64_MIN: i64 = -128;
    pub const I64_MAX: i64 = 127;

    /// The one NaN pattern that is interned; other payloads stay fresh.
    pub const F32_CANONICAL_NAN_BITS: u32 = 0x7fc0_0000;
    pub const F64_CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

    /// Number of interned float values: both zeros, both infinities, NaN.
    pub const FLOAT_SLOTS: usize = 5;
}

static BOOL_TABLE: LazyLock<Box<[bool]>> =
    LazyLock::new(|| build(Kind::Bool, [false, true].into_iter()));

static I8_TABLE: LazyLock<Box<[i8]>> = LazyLock::new(|| build(Kind::I8, i8::MIN..=i8::MAX));

static I16_TABLE: LazyLock<Box<[i16]>> =
    LazyLock::new(|| build(Kind::I16, params::I16_MIN..=params::I16_MAX));

static CHAR_TABLE: LazyLock<Box<[char]>> =
    LazyLock::new(|| build(Kind::Char, params::CHAR_MIN..=params::CHAR_MAX));

static I32_TABLE: LazyLock<Box<[i32]>> =
    LazyLock::new(|| build(Kind::I32, params::I32_MIN..=params::I32_MAX));

static I64_TABLE: LazyLock<Box<[i64]>> =
    LazyLock::new(|| build(Kind::I64, params::I64_MIN..=params::I64_MAX));

static F32_TABLE: LazyLock<[f32; params::FLOAT_SLOTS]> = LazyLock::new(|| {
    log::trace!("initialized {} cache partition", Kind::F32);
    [
        0.0,
        -0.0,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::from_bits(params::F32_CANONICAL_NAN_BITS),
    ]
});

static F64_TABLE: LazyLock<[f64; params::FLOAT_SLOTS]> = LazyLock::new(|| {
    log::trace!("initialized {} cache partition", Kind::F64);
    [
        0.0,
        -0.0,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::from_bits(params::F64_CANONICAL_NAN_BITS),
    ]
});

fn build<T>(kind: Kind, values: impl Iterator<Item = T>) -> Box<[T]> {
    let table: Box<[T]> = values.collect();
    log::trace!("initialized {} cache partition with {} entries", kind, table.len());
    table
}

/// Offset of `value` into a table covering `[min, max]`.
#[inline]
fn offset(value: i64, min: i64, max: i64) -> Option<usize> {
    if (min..=max).contains(&value) {
        usize::try_from(value - min).ok()
    } else {
        None
    }
}

#[inline]
fn slot<T>(table: &'static [T], index: Option<usize>) -> Option<&'static T> {
    index.and_then(|i| table.get(i))
}

pub fn bool_slot(value: bool) -> Option<&'static bool> {
    slot(&BOOL_TABLE, Some(usize::from(value)))
}

pub fn i8_slot(value: i8) -> Option<&'static i8> {
    let index = offset(i64::from(value), i64::from(i8::MIN), i64::from(i8::MAX));
    slot(&I8_TABLE, index)
}

pub fn i16_slot(value: i16) -> Option<&'static i16> {
    let index = offset(
        i64::from(value),
        i64::from(params::I16_MIN),
        i64::from(params::I16_MAX),
    );
    slot(&I16_TABLE, index)
}

pub fn char_slot(value: char) -> Option<&'static char> {
    let index = offset(
        i64::from(u32::from(value)),
        i64::from(u32::from(params::CHAR_MIN)),
        i64::from(u32::from(params::CHAR_MAX)),
    );
    slot(&CHAR_TABLE, index)
}

pub fn i32_slot(value: i32) -> Option<&'static i32> {
    let index = offset(
        i64::from(value),
        i64::from(params::I32_MIN),
        i64::from(params::I32_MAX),
    );
    slot(&I32_TABLE, index)
}

pub fn i64_slot(value: i64) -> Option<&'static i64> {
    slot(&I64_TABLE, offset(value, params::I64_MIN, params::I64_MAX))
}

// Dispatch on raw bits: `==` cannot tell the zeros apart and never matches
// NaN.
pub fn f32_slot(value: f32) -> Option<&'static f32> {
    let index = match value.to_bits() {
        0x0000_0000 => 0,
        0x8000_0000 => 1,
        0x7f80_0000 => 2,
        0xff80_0000 => 3,
        params::F32_CANONICAL_NAN_BITS => 4,
        _ => return None,
    };
    slot(&*F32_TABLE, Some(index))
}

pub fn f64_slot(value: f64) -> Option<&'static f64> {
    let index = match value.to_bits() {
        0x0000_0000_0000_0000 => 0,
        0x8000_0000_0000_0000 => 1,
        0x7ff0_0000_0000_0000 => 2,
        0xfff0_0000_0000_0000 => 3,
        params::F64_CANONICAL_NAN_BITS => 4,
        _ => return None,
    };
    slot(&*F64_TABLE, Some(index))
}

/// Forces every partition to initialize now instead of on first use.
pub fn warm_up() {
    LazyLock::force(&BOOL_TABLE);
    LazyLock::force(&I8_TABLE);
    LazyLock::force(&I16_TABLE);
    LazyLock::force(&CHAR_TABLE);
    LazyLock::force(&I32_TABLE);
    LazyLock::force(&I64_TABLE);
    LazyLock::force(&F32_TABLE);
    LazyLock::force(&F64_TABLE);
}
