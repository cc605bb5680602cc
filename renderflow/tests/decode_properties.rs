//! Property checks for numeric fragment decoding

use proptest::prelude::*;
use renderflow::{decode_numeric_payload, encode_fragment, DType};
use serde_json::{json, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
        prop::collection::vec(-1000i32..1000, 0..8).prop_map(|values| {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();
            encode_fragment(&values, DType::Int16, None)
        }),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn int_fragments_decode_to_their_values(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let floats: Vec<f64> = values.iter().map(|v| f64::from(*v)).collect();
        let decoded = decode_numeric_payload(encode_fragment(&floats, DType::Int32, None));
        prop_assert_eq!(decoded, json!(values));
    }

    #[test]
    fn float_fragments_decode_to_their_values(values in prop::collection::vec(-1.0e9f64..1.0e9, 0..64)) {
        let decoded = decode_numeric_payload(encode_fragment(&values, DType::Float64, None));
        prop_assert_eq!(decoded, json!(values));
    }

    #[test]
    fn shaped_fragments_nest_rows(rows in 0usize..6, cols in 0usize..6) {
        let values: Vec<f64> = (0..rows * cols).map(|v| v as f64).collect();
        let decoded = decode_numeric_payload(encode_fragment(&values, DType::UInt8, Some(&[rows, cols])));

        let matrix = decoded.as_array().expect("outer array");
        prop_assert_eq!(matrix.len(), rows);
        for (r, row) in matrix.iter().enumerate() {
            let expected: Vec<usize> = (r * cols..(r + 1) * cols).collect();
            prop_assert_eq!(row, &json!(expected));
        }
    }

    #[test]
    fn decoding_is_idempotent(value in arb_json()) {
        let once = decode_numeric_payload(value);
        let twice = decode_numeric_payload(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn decoding_keeps_container_shape(value in arb_json()) {
        let decoded = decode_numeric_payload(value.clone());
        match (&value, &decoded) {
            (Value::Array(before), Value::Array(after)) => prop_assert_eq!(before.len(), after.len()),
            (Value::Object(before), Value::Object(after)) => {
                prop_assert!(before.keys().eq(after.keys()));
            }
            _ => {}
        }
    }
}
