use json_ext::{
    decode, decode_unsafe, encode, encode_unsafe, BigInt, Decoder, DecodeOptions, Function,
    FunctionRegistry, Indent, Pattern, Replacer, TypedArray, Url, Value,
};
use std::sync::Arc;

fn obj(fields: Vec<(&str, Value)>) -> Value {
    Value::object(fields)
}

fn big(text: &str) -> Value {
    Value::BigInt(text.parse::<BigInt>().unwrap())
}

fn round_trip(value: &Value) -> Value {
    let text = encode(value, &Replacer::None, &Indent::None).unwrap();
    decode(&text, None).unwrap()
}

fn round_trip_unsafe(value: &Value) -> Value {
    let text = encode_unsafe(value, &Replacer::None, &Indent::None).unwrap();
    decode_unsafe(&text, None).unwrap()
}

#[test]
fn big_integers_round_trip_at_any_depth() {
    let input = obj(vec![
        ("balance", big("1")),
        ("decimals", Value::Integer(18)),
        ("nested", obj(vec![("big", big("9999999999999999999"))])),
        ("list", Value::Array(vec![big("2"), big("-3")])),
    ]);
    assert_eq!(round_trip(&input), input);
    assert_eq!(round_trip(&big("123")), big("123"));
}

#[test]
fn balance_and_bytes_wire_shape() {
    let input = obj(vec![
        ("balance", big("123456789012345678901234567890")),
        ("data", Value::Bytes(vec![1, 2, 3, 255])),
    ]);
    let text = encode(&input, &Replacer::None, &Indent::None).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"balance":{"__@json.bigint__":"123456789012345678901234567890"},"#,
            r#""data":{"__@json.typedarray__":{"type":"Uint8Array","bytes":"0x010203ff"}}}"#
        )
    );
    assert_eq!(decode(&text, None).unwrap(), input);
}

#[test]
fn plain_values_are_unchanged() {
    let input = obj(vec![
        ("balance", Value::Integer(10)),
        ("decimals", Value::Integer(6)),
        ("active", Value::Bool(true)),
        ("name", Value::from("ETH")),
        ("nothing", Value::Null),
        ("ratio", Value::Float(0.25)),
    ]);
    assert_eq!(round_trip(&input), input);
    for scalar in [Value::Null, Value::Bool(false), Value::Integer(-4), Value::from("s")] {
        assert_eq!(round_trip(&scalar), scalar);
    }
}

#[test]
fn bytes_round_trip_including_empty_and_large() {
    assert_eq!(round_trip(&Value::Bytes(vec![])), Value::Bytes(vec![]));
    let large: Vec<u8> = (0..4096u32).map(|i| (i % 256) as u8).collect();
    let input = obj(vec![("blob", Value::Bytes(large))]);
    assert_eq!(round_trip(&input), input);
}

#[test]
fn every_typed_array_kind_round_trips() {
    let arrays = vec![
        TypedArray::Int8(vec![-128, 0, 127]),
        TypedArray::Uint8Clamped(vec![0, 128, 255]),
        TypedArray::Int16(vec![-32768, 1, 32767]),
        TypedArray::Uint16(vec![0, 65535]),
        TypedArray::Int32(vec![i32::MIN, -1, i32::MAX]),
        TypedArray::Uint32(vec![0, u32::MAX]),
        TypedArray::float16_from_f64(&[1.0, -2.5, 0.0]),
        TypedArray::Float32(vec![1.5, -0.25, f32::MAX]),
        TypedArray::Float64(vec![std::f64::consts::PI, -1e300]),
        TypedArray::BigInt64(vec![i64::MIN, 0, i64::MAX]),
        TypedArray::BigUint64(vec![0, u64::MAX]),
    ];
    for array in arrays {
        let input = obj(vec![("arr", Value::TypedArray(array.clone()))]);
        assert_eq!(round_trip(&input), input, "{:?}", array.kind());
    }
}

#[test]
fn typed_array_bytes_are_little_endian() {
    let input = Value::TypedArray(TypedArray::Uint16(vec![0x0102]));
    let text = encode(&input, &Replacer::None, &Indent::None).unwrap();
    assert_eq!(
        text,
        r#"{"__@json.typedarray__":{"type":"Uint16Array","bytes":"0x0201"}}"#
    );
}

#[test]
fn non_finite_numbers_round_trip() {
    let input = obj(vec![
        ("nan", Value::Float(f64::NAN)),
        ("pos", Value::Float(f64::INFINITY)),
        ("neg", Value::Float(f64::NEG_INFINITY)),
    ]);
    let text = encode(&input, &Replacer::None, &Indent::None).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"nan":{"__@json.number__":"NaN"},"pos":{"__@json.number__":"Infinity"},"#,
            r#""neg":{"__@json.number__":"-Infinity"}}"#
        )
    );
    let output = decode(&text, None).unwrap();
    assert!(output.get("nan").and_then(Value::as_number).unwrap().is_nan());
    assert_eq!(output.get("pos"), Some(&Value::Float(f64::INFINITY)));
    assert_eq!(output.get("neg"), Some(&Value::Float(f64::NEG_INFINITY)));
}

#[test]
fn dates_travel_as_epoch_millis() {
    let input = obj(vec![("d", Value::Date(1_577_934_245_006))]);
    let text = encode(&input, &Replacer::None, &Indent::None).unwrap();
    assert_eq!(text, r#"{"d":{"__@json.date__":1577934245006}}"#);
    assert_eq!(decode(&text, None).unwrap(), input);
}

#[test]
fn collections_patterns_and_urls_round_trip() {
    let input = obj(vec![
        ("map", Value::map([(Value::from("hello"), Value::from("world"))])),
        ("set", Value::set([Value::Integer(123), Value::Integer(456)])),
        ("re", Value::RegExp(Pattern::new(r"([^\s]+)", "g").unwrap())),
        ("url", Value::Url(Url::parse("https://example.com/").unwrap())),
    ]);
    assert_eq!(round_trip(&input), input);
    assert_eq!(round_trip_unsafe(&input), input);
}

#[test]
fn nested_extended_values_inside_collections() {
    let input = Value::map([
        (big("1"), Value::set([Value::Date(0), Value::Bytes(vec![9])])),
        (Value::from("k"), Value::Array(vec![Value::Float(f64::INFINITY)])),
    ]);
    assert_eq!(round_trip(&input), input);
}

#[test]
fn functions_need_unsafe_on_both_sides() {
    let input = obj(vec![("fn", Value::Function(Function::new("(arg) => arg")))]);

    assert_eq!(encode(&input, &Replacer::None, &Indent::None).unwrap(), "{}");
    let root = encode(&Value::Function(Function::new("f")), &Replacer::None, &Indent::None);
    assert_eq!(root.unwrap(), "null");

    let text = encode_unsafe(&input, &Replacer::None, &Indent::None).unwrap();
    assert_eq!(
        decode(&text, None).unwrap(),
        obj(vec![(
            "fn",
            obj(vec![("__@json.function__", Value::from("(arg) => arg"))])
        )])
    );
    assert_eq!(decode_unsafe(&text, None).unwrap(), input);
}

#[test]
fn registered_function_bodies_are_callable_after_decode() {
    let source = "(arg) => arg";
    let registry = FunctionRegistry::new().register(source, |args| {
        args.first().cloned().unwrap_or(Value::Undefined)
    });
    let decoder = Decoder::with_options(DecodeOptions::unsafe_mode().with_loader(Arc::new(registry)));

    let text = r#"{"fn":{"__@json.function__":"(arg) => arg"},"other":{"__@json.function__":"x"}}"#;
    let output = decoder.decode(text, None).unwrap();

    let Some(Value::Function(echo)) = output.get("fn") else {
        panic!("expected a function, got {output:?}");
    };
    assert_eq!(echo.call(&[Value::from("ok")]), Some(Value::from("ok")));
    let Some(Value::Function(other)) = output.get("other") else {
        panic!("expected a function, got {output:?}");
    };
    assert!(!other.is_callable());
    assert_eq!(other.call(&[]), None);
}

#[test]
fn reviver_observes_decoded_values() {
    let text = encode(
        &obj(vec![("data", Value::Bytes(vec![1, 2]))]),
        &Replacer::None,
        &Indent::None,
    )
    .unwrap();
    let hook = |key: &str, value: Value| match (key, value) {
        ("data", Value::Bytes(bytes)) => Value::Integer(bytes.len() as i64),
        (_, other) => other,
    };
    assert_eq!(
        decode(&text, Some(&hook)).unwrap(),
        obj(vec![("data", Value::Integer(2))])
    );
}

#[test]
fn indent_formats_like_pretty_json() {
    let input = obj(vec![("a", Value::Integer(1)), ("b", big("2"))]);
    let text = encode(&input, &Replacer::None, &Indent::Spaces(2)).unwrap();
    assert_eq!(
        text,
        "{\n  \"a\": 1,\n  \"b\": {\n    \"__@json.bigint__\": \"2\"\n  }\n}"
    );
    assert_eq!(decode(&text, None).unwrap(), input);
}

fn nest(mut value: Value, depth: usize) -> Value {
    for _ in 0..depth {
        value = Value::Array(vec![value]);
    }
    value
}

#[test]
fn deep_nesting_round_trips() {
    for depth in [100, 126, 200] {
        let input = nest(Value::Bytes(vec![1]), depth);
        assert_eq!(round_trip(&input), input, "depth {depth}");
    }
    let plain = nest(Value::Integer(1), 200);
    assert_eq!(round_trip(&plain), plain);

    let inner = obj(vec![
        ("big", big("1")),
        ("map", Value::map([(Value::Integer(1), Value::Date(2))])),
    ]);
    let mixed = nest(inner, 200);
    assert_eq!(round_trip(&mixed), mixed);
}
