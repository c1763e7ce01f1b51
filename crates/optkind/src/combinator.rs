//! Combinators, written once for every option type.
//!
//! [`Optional`] asks each option type for a handful of primitives (empty
//! constructor, routed constructor, presence, null-ness and value extraction)
//! and derives the whole combinator surface from them.
//!
//! Combinators consume `self`, as on `std::option::Option`. Scalar options are
//! `Copy`, and `Opt::as_ref` gives a cheap borrowed view of an erased option,
//! so inspecting without giving up the original never clones or allocates.
//!
//! Callbacks run synchronously, at most once, and are skipped entirely when the
//! option is empty.

use crate::error::{OptionError, Result};
use crate::kind::Value;
use crate::router;
use crate::scalar::Scalar;
use crate::variant::{Opt, ScalarOpt};

pub trait Optional: Sized {
    /// What callbacks and accessors see.
    type Item;

    /// The empty option.
    fn none() -> Self;

    /// Builds a present option, routed exactly like a fresh construction.
    fn from_item(item: Self::Item) -> Self;

    fn is_present(&self) -> bool;

    /// Whether this is the present-null option.
    fn holds_null(&self) -> bool {
        false
    }

    /// The held item; present-null yields its null item.
    fn take(self) -> Option<Self::Item>;

    fn is_empty(&self) -> bool {
        !self.is_present()
    }

    /// The held value. Empty and present-null are both `ValueAbsent`.
    fn get(self) -> Result<Self::Item> {
        if self.holds_null() {
            return Err(OptionError::ValueAbsent);
        }
        self.take().ok_or(OptionError::ValueAbsent)
    }

    fn or_else(self, default: Self::Item) -> Self::Item {
        self.take().unwrap_or(default)
    }

    fn or_else_compute<F>(self, fallback: F) -> Self::Item
    where
        F: FnOnce() -> Self::Item,
    {
        self.take().unwrap_or_else(fallback)
    }

    fn or_else_fail<E, F>(self, error: F) -> core::result::Result<Self::Item, E>
    where
        F: FnOnce() -> E,
    {
        self.take().ok_or_else(error)
    }

    /// Keeps the option only if `predicate` accepts its value.
    fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&Self::Item) -> bool,
    {
        match self.take() {
            Some(item) if predicate(&item) => Self::from_item(item),
            _ => Self::none(),
        }
    }

    /// Maps into any option type; the target decides how the result is
    /// represented.
    fn map_into<O, F>(self, f: F) -> O
    where
        O: Optional,
        F: FnOnce(Self::Item) -> O::Item,
    {
        match self.take() {
            Some(item) => O::from_item(f(item)),
            None => O::none(),
        }
    }

    fn flat_map<O, F>(self, f: F) -> O
    where
        O: Optional,
        F: FnOnce(Self::Item) -> O,
    {
        match self.take() {
            Some(item) => f(item),
            None => O::none(),
        }
    }

    /// Present and accepted by `predicate`.
    fn matches<P>(self, predicate: P) -> bool
    where
        P: FnOnce(Self::Item) -> bool,
    {
        self.take().is_some_and(predicate)
    }

    fn if_present<F>(self, f: F)
    where
        F: FnOnce(Self::Item),
    {
        if let Some(item) = self.take() {
            f(item);
        }
    }

    fn if_absent<F>(self, f: F)
    where
        F: FnOnce(),
    {
        if self.is_empty() {
            f();
        }
    }

    fn if_present_or_else<F, G>(self, present: F, absent: G)
    where
        F: FnOnce(Self::Item),
        G: FnOnce(),
    {
        match self.take() {
            Some(item) => present(item),
            None => absent(),
        }
    }

    /// `other` if this is present, empty otherwise.
    fn and<O: Optional>(self, other: O) -> O {
        if self.is_present() {
            other
        } else {
            O::none()
        }
    }

    /// Like [`Optional::and`], but `other` is only computed when needed.
    fn and_compute<O, F>(self, other: F) -> O
    where
        O: Optional,
        F: FnOnce() -> O,
    {
        if self.is_present() {
            other()
        } else {
            O::none()
        }
    }

    /// This option if present, `other` otherwise.
    fn or(self, other: Self) -> Self {
        if self.is_present() {
            self
        } else {
            other
        }
    }

    fn or_compute<F>(self, other: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        if self.is_present() {
            self
        } else {
            other()
        }
    }

    /// A sequence of zero or one items.
    fn stream(self) -> core::option::IntoIter<Self::Item> {
        self.take().into_iter()
    }

    fn into_std(self) -> Option<Self::Item> {
        self.take()
    }
}

impl<K: Scalar> Optional for ScalarOpt<K> {
    type Item = K;

    #[inline]
    fn none() -> Self {
        ScalarOpt::NONE
    }

    #[inline]
    fn from_item(item: K) -> Self {
        ScalarOpt::of(item)
    }

    #[inline]
    fn is_present(&self) -> bool {
        self.present().is_some()
    }

    #[inline]
    fn take(self) -> Option<K> {
        self.present().map(|p| p.get())
    }
}

impl<R> Optional for Opt<R> {
    type Item = Value<R>;

    #[inline]
    fn none() -> Self {
        Opt::None
    }

    #[inline]
    fn from_item(item: Value<R>) -> Self {
        router::option_of(item)
    }

    #[inline]
    fn is_present(&self) -> bool {
        !matches!(self, Opt::None)
    }

    #[inline]
    fn holds_null(&self) -> bool {
        self.is_null()
    }

    #[inline]
    fn take(self) -> Option<Value<R>> {
        self.into_value()
    }
}

impl<K: Scalar> IntoIterator for ScalarOpt<K> {
    type Item = K;
    type IntoIter = core::option::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.stream()
    }
}

impl<R> IntoIterator for Opt<R> {
    type Item = Value<R>;
    type IntoIter = core::option::IntoIter<Value<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stream()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{option_of_int, option_of_long};
    use crate::variant::{I32Opt, I64Opt};
    use std::cell::Cell;

    #[test]
    fn empty_never_invokes_callbacks() {
        let calls = Cell::new(0);
        let none = I32Opt::none();
        let mapped: I32Opt = none.map_into(|x| {
            calls.set(calls.get() + 1);
            x
        });
        let filtered = none.filter(|_| {
            calls.set(calls.get() + 1);
            true
        });
        let flat: I64Opt = none.flat_map(|_| {
            calls.set(calls.get() + 1);
            I64Opt::of(1)
        });
        none.if_present(|_| calls.set(calls.get() + 1));
        assert!(!none.matches(|_| {
            calls.set(calls.get() + 1);
            true
        }));
        assert!(mapped.is_empty() && filtered.is_empty() && flat.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn and_skips_supplier_on_empty() {
        let calls = Cell::new(0);
        let out: I64Opt = I32Opt::none().and_compute(|| {
            calls.set(calls.get() + 1);
            option_of_long(1)
        });
        assert!(out.is_empty());
        assert_eq!(calls.get(), 0);

        let out: I64Opt = option_of_int(1).and_compute(|| {
            calls.set(calls.get() + 1);
            option_of_long(99)
        });
        assert_eq!(out.get(), Ok(99));
        assert_eq!(calls.get(), 1);
        assert_eq!(option_of_int(1).and(option_of_long(5)), option_of_long(5));
        assert!(I32Opt::none().and(option_of_long(5)).is_empty());
    }

    #[test]
    fn or_prefers_self_when_present() {
        assert_eq!(option_of_int(1).or(option_of_int(2)).get(), Ok(1));
        assert_eq!(I32Opt::none().or(option_of_int(2)).get(), Ok(2));
        let calls = Cell::new(0);
        let kept = option_of_int(3).or_compute(|| {
            calls.set(1);
            option_of_int(4)
        });
        assert_eq!(kept.get(), Ok(3));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn fallbacks_only_run_when_empty() {
        assert_eq!(option_of_int(8).or_else_compute(|| unreachable!()), 8);
        assert_eq!(I32Opt::none().or_else_fail(|| "gone"), Err("gone"));
        assert_eq!(option_of_int(8).or_else_fail(|| "gone"), Ok(8));
    }

    #[test]
    fn if_present_or_else_picks_one_branch() {
        let hit = Cell::new(None);
        option_of_int(6).if_present_or_else(|v| hit.set(Some(v)), || hit.set(Some(-1)));
        assert_eq!(hit.get(), Some(6));
        I32Opt::none().if_present_or_else(|v| hit.set(Some(v)), || hit.set(Some(-1)));
        assert_eq!(hit.get(), Some(-1));
        let absent = Cell::new(false);
        I32Opt::none().if_absent(|| absent.set(true));
        assert!(absent.get());
    }

    #[test]
    fn null_is_present_but_get_fails() {
        let null: Opt<String> = Opt::Null;
        assert!(null.is_present());
        assert_eq!(null.clone().get(), Err(OptionError::ValueAbsent));
        assert!(null.clone().matches(|v| v.is_null()));
        assert_eq!(null.clone().or_else(Value::I32(1)), Value::Null);
        assert!(null.clone().or(Opt::of_ref("x".into())).is_null());
        assert_eq!(null.stream().count(), 1);
    }

    #[test]
    fn borrowed_view_leaves_original_usable() {
        let opt = Opt::of_ref(String::from("abc"));
        assert!(opt.as_ref().matches(|v| v.into_ref().is_some_and(|s| s.len() == 3)));
        let len: I64Opt = opt
            .as_ref()
            .flat_map(|v| ScalarOpt::maybe(v.into_ref().map(|s| s.len() as i64)));
        assert_eq!(len.get(), Ok(3));
        assert_eq!(opt.get_ref().map(String::as_str), Ok("abc"));
    }

    #[test]
    fn filter_keeps_canonical_identity() {
        let a = option_of_int(10).filter(|v| *v > 0);
        assert!(a.same_instance(&option_of_int(10)));
    }
}
