use std::cell::Cell;

use optkind::prelude::*;

#[test]
fn filter_map_or_else_chain() {
    let chain = |x: i32| option_of_int(x).filter(|v| *v > 0).map(|v| v * 2).or_else(-1);
    assert_eq!(chain(5), 10);
    assert_eq!(chain(-5), -1);
    assert_eq!(chain(0), -1);
}

#[test]
fn fallback_supplier_runs_once_and_only_when_empty() {
    let calls = Cell::new(0);
    let v = I32Opt::none().or_else_compute(|| {
        calls.set(calls.get() + 1);
        42
    });
    assert_eq!(v, 42);
    assert_eq!(calls.get(), 1);

    let v = option_of_int(7).or_else_compute(|| {
        calls.set(calls.get() + 1);
        42
    });
    assert_eq!(v, 7);
    assert_eq!(calls.get(), 1);
}

#[test]
fn null_policies_are_distinct() {
    let kept: Opt<String> = some_nullable(Value::Null);
    let dropped: Opt<String> = maybe(Value::Null);
    assert!(kept.is_present() && kept.is_null());
    assert!(dropped.is_empty());
    assert_eq!(kept.clone().get(), Err(OptionError::ValueAbsent));
    assert!(kept.filter_non_null().is_empty());
    assert!(some::<String>(Value::Null).is_err());
}

#[test]
fn null_is_handed_to_callbacks() {
    let null: Opt<String> = Opt::Null;
    let seen = Cell::new(false);
    null.clone().if_present(|v| seen.set(v.is_null()));
    assert!(seen.get());

    let described: Opt<String> = null.map_into(|v| {
        Value::Ref(if v.is_null() { "was null".to_string() } else { "value".to_string() })
    });
    assert_eq!(described.get_ref().map(String::as_str), Ok("was null"));
}

#[test]
fn mapping_across_kinds_routes_through_the_cache() {
    let widened: I64Opt = option_of_int(9).map_to(i64::from);
    assert!(widened.same_instance(&option_of_long(9)));

    let narrowed: I8Opt = option_of_long(300).map_to(|v| (v % 100) as i8);
    assert!(narrowed.same_instance(&option_of_byte(0)));

    let erased: Opt<String> = option_of_short(4).map_to_value(|v| Value::I32(i32::from(v) * 1000));
    assert_eq!(erased.get_as::<i32>(), Ok(4000));
    assert!(!erased.is_cached());

    let to_null: Opt<String> = option_of_bool(true).map_to_value(|_| Value::Null);
    assert!(to_null.is_null());
}

#[test]
fn erased_filter_to_selects_by_kind() {
    let opt: Opt<String> = Opt::some_nullable(2.5f64);
    assert_eq!(opt.filter_to::<f64>().value(), Ok(2.5));
    assert!(opt.filter_to::<f32>().is_empty());
    assert_eq!(
        opt.get_as::<i64>(),
        Err(OptionError::TypeMismatch { expected: Kind::I64, found: Kind::F64 })
    );
    assert!(opt.filter_ref().is_empty());
    assert_eq!(
        Opt::of_ref("s".to_string()).get_as::<bool>(),
        Err(OptionError::TypeMismatch { expected: Kind::Bool, found: Kind::Ref })
    );
}

#[test]
fn flat_map_chains_fallible_steps() {
    let parse = |s: &String| ScalarOpt::maybe(s.parse::<i32>().ok());
    let ok: I32Opt = Opt::of_ref("12".to_string())
        .as_ref()
        .flat_map(|v| v.into_ref().map_or(I32Opt::NONE, parse));
    assert!(ok.same_instance(&option_of_int(12)));

    let bad: I32Opt = Opt::of_ref("x".to_string())
        .as_ref()
        .flat_map(|v| v.into_ref().map_or(I32Opt::NONE, parse));
    assert!(bad.is_empty());
}

#[test]
fn streams_have_zero_or_one_items() {
    assert_eq!(option_of_char('z').stream().collect::<Vec<_>>(), vec!['z']);
    assert_eq!(CharOpt::none().stream().count(), 0);
    let total: i64 = [option_of_long(1), I64Opt::NONE, option_of_long(2)]
        .into_iter()
        .flatten()
        .sum();
    assert_eq!(total, 3);
}

#[test]
fn display_matches_kind_labels() {
    assert_eq!(option_of_int(5).to_string(), "IntOption[5]");
    assert_eq!(option_of_bool(false).to_string(), "BooleanOption[false]");
    assert_eq!(option_of_double(1.5).to_string(), "DoubleOption[1.5]");
    assert_eq!(I32Opt::none().to_string(), "Option.none");
    assert_eq!(Opt::<String>::Null.to_string(), "Option[null]");
    assert_eq!(Opt::of_ref("abc".to_string()).to_string(), "Option[abc]");
    assert_eq!(Opt::<String>::some_nullable(3i16).to_string(), "ShortOption[3]");
}
