use json_ext::{decode, encode, BigInt, Indent, Replacer, TypedArray, Value};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1_000_000i32..1_000_000).prop_map(|n| Value::Float(f64::from(n) + 0.5)),
        Just(Value::Float(f64::INFINITY)),
        Just(Value::Float(f64::NEG_INFINITY)),
        "[ -~]{0,12}".prop_map(Value::Str),
        any::<i64>().prop_map(|n| Value::BigInt(BigInt::from(n) * BigInt::from(u64::MAX))),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
        prop::collection::vec(any::<i32>(), 0..8)
            .prop_map(|v| Value::TypedArray(TypedArray::Int32(v))),
        prop::collection::vec(any::<u64>(), 0..4)
            .prop_map(|v| Value::TypedArray(TypedArray::BigUint64(v))),
        any::<i64>().prop_map(Value::Date),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("k_[a-z]{1,4}", inner.clone(), 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
            prop::collection::vec((inner.clone(), inner.clone()), 0..3)
                .prop_map(|entries| Value::map(entries)),
            prop::collection::vec(inner, 0..4).prop_map(|items| Value::set(items)),
        ]
    })
}

proptest! {
    #[test]
    fn encode_then_decode_is_identity(input in value()) {
        let text = encode(&input, &Replacer::None, &Indent::None).unwrap();
        prop_assert_eq!(decode(&text, None).unwrap(), input);
    }

    #[test]
    fn indent_does_not_change_meaning(input in value(), width in 1usize..6) {
        let compact = encode(&input, &Replacer::None, &Indent::None).unwrap();
        let pretty = encode(&input, &Replacer::None, &Indent::Spaces(width)).unwrap();
        prop_assert_eq!(decode(&pretty, None).unwrap(), decode(&compact, None).unwrap());
    }

    #[test]
    fn decode_never_panics(text in "\\PC{0,64}") {
        let _ = decode(&text, None);
    }
}
