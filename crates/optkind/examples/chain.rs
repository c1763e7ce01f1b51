use anyhow::Result;
use optkind::prelude::*;

fn halve_positive(x: i32) -> i32 {
    option_of_int(x).filter(|v| *v > 0).map(|v| v / 2).or_else(-1)
}

fn main() -> Result<()> {
    env_logger::init();
    optkind::cache::warm_up();

    for x in [10, -4, 1_000] {
        println!("halve_positive({x}) = {}", halve_positive(x));
    }

    // Cached values share one instance; others are only equal.
    let a = option_of_long(42);
    let b = option_of_long(42);
    println!("{a} same instance as {b}: {}", a.same_instance(&b));
    let c = option_of_long(4_200);
    let d = option_of_long(4_200);
    println!("{c} same instance as {d}: {}, equal: {}", c.same_instance(&d), c == d);

    // Runtime values are routed to their kind.
    let inputs: [Value<String>; 4] = [
        Value::Null,
        Value::F64(f64::NAN),
        Value::Char('x'),
        Value::Ref("text".to_string()),
    ];
    for value in inputs {
        let kept = some_nullable(value.clone());
        let dropped = maybe(value);
        println!("some_nullable -> {kept}, maybe -> {dropped}");
    }

    let bytes = option_of_short(-3).to_canonical_bytes();
    let back = I16Opt::from_canonical_bytes(&bytes)?;
    println!("decoded {back}, canonical: {}", back.same_instance(&option_of_short(-3)));

    let n = Opt::<String>::some(7i32)?.get_as::<i32>()?;
    println!("extracted {n}");
    Ok(())
}
