//! Property-based tests for descriptors and marshaling.
//!
//! Properties that must hold for any input:
//! - Editability is derived from the read-only and create-only flags
//! - Null and the empty form of an attribute's own kind never fail its optional checks
//! - Numbers below a minimum fail, zero included
//! - String bounds are enforced exactly at the edges
//! - Numeric strings coming off the wire are coerced to numbers

mod common;

use common::registry;
use proptest::prelude::*;
use restmodel_model::{AttributeDescriptor, AttributeType, Entity, Value};
use serde_json::json;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn attribute_type_strategy() -> impl Strategy<Value = AttributeType> {
    prop::sample::select(AttributeType::ALL.to_vec())
}

/// A type paired with null or the empty form of that type's own kind.
fn empty_value_strategy() -> impl Strategy<Value = (AttributeType, Value)> {
    attribute_type_strategy().prop_flat_map(|ty| {
        let empty = match ty {
            AttributeType::Boolean => Value::Bool(false),
            AttributeType::String | AttributeType::Enum => Value::String(String::new()),
            AttributeType::Integer | AttributeType::Float | AttributeType::Long => {
                Value::Float(f64::NAN)
            }
            AttributeType::Object | AttributeType::List => Value::Null,
        };
        (Just(ty), prop_oneof![Just(Value::Null), Just(empty)])
    })
}

// =============================================================================
// DESCRIPTOR PROPERTIES
// =============================================================================

mod descriptor_properties {
    use super::*;

    proptest! {
        /// isEditable is never stored, only derived
        #[test]
        fn editable_is_derived(read_only in any::<bool>(), create_only in any::<bool>()) {
            let d = AttributeDescriptor::builder("x", AttributeType::String)
                .read_only(read_only)
                .create_only(create_only)
                .build()
                .unwrap();
            prop_assert_eq!(d.is_editable(), !(read_only || create_only));
        }

        /// Optional attributes accept null and the empty form of their own kind
        #[test]
        fn empty_values_pass_optional_checks((ty, value) in empty_value_strategy()) {
            let d = AttributeDescriptor::builder("x", ty).build().unwrap();
            prop_assert!(d.check(Some(&value)).is_none());
            prop_assert!(d.check(None).is_none());
        }

        /// Any integer below the minimum fails, zero included
        #[test]
        fn below_minimum_fails(min in -1_000i64..1_000, below in 1i64..1_000) {
            let d = AttributeDescriptor::builder("n", AttributeType::Integer)
                .min_value(min as f64)
                .build()
                .unwrap();
            prop_assert!(d.check(Some(&Value::Integer(min - below))).is_some());
            prop_assert!(d.check(Some(&Value::Integer(min))).is_none());
        }

        /// Required attributes reject null and absent values whatever their type
        #[test]
        fn required_rejects_missing(ty in attribute_type_strategy()) {
            let d = AttributeDescriptor::builder("x", ty).required(true).build().unwrap();
            prop_assert!(d.check(None).is_some());
            prop_assert!(d.check(Some(&Value::Null)).is_some());
        }

        /// Non-empty strings pass iff their char count is within bounds
        #[test]
        fn string_bounds_are_exact(
            s in "[a-z\u{e0}-\u{ff}]{1,20}",
            min in 0usize..10,
            extra in 0usize..10,
        ) {
            let max = min + extra;
            let d = AttributeDescriptor::builder("s", AttributeType::String)
                .min_length(min)
                .max_length(max)
                .build()
                .unwrap();
            let len = s.chars().count();
            let in_bounds = (min..=max).contains(&len);
            prop_assert_eq!(d.check(Some(&Value::from(s))).is_none(), in_bounds);
        }

        /// Integers always satisfy an unbounded integer attribute
        #[test]
        fn integers_pass_integer_checks(i in any::<i64>()) {
            let d = AttributeDescriptor::builder("n", AttributeType::Integer).build().unwrap();
            prop_assert!(d.check(Some(&Value::Integer(i))).is_none());
        }

        /// Fractional floats never satisfy an integer attribute
        #[test]
        fn fractions_fail_integer_checks(whole in -1_000_000i64..1_000_000, frac in 0.01f64..0.99) {
            let d = AttributeDescriptor::builder("n", AttributeType::Integer).build().unwrap();
            let value = Value::Float(whole as f64 + frac);
            prop_assert!(d.check(Some(&value)).is_some());
        }
    }
}

// =============================================================================
// MARSHAL PROPERTIES
// =============================================================================

mod marshal_properties {
    use super::*;

    proptest! {
        /// Integer strings on the wire become integers
        #[test]
        fn numeric_strings_coerce(i in any::<i64>()) {
            let reg = registry();
            let entity = Entity::from_json(&reg, "MyEntity", &json!({ "attr6": i.to_string() })).unwrap();
            prop_assert_eq!(entity.get("attr6"), Some(&Value::Integer(i)));
        }

        /// Assigned strings come back unchanged under their remote name
        #[test]
        fn strings_survive_the_wire(s in ".{0,40}") {
            let reg = registry();
            let mut entity = reg.instantiate("MyEntity").unwrap();
            entity.set("attr1", s.as_str()).unwrap();
            let object = entity.to_object();
            prop_assert_eq!(&object["ATTR1"], &json!(s));
            let rebuilt = Entity::from_json(&reg, "MyEntity", &object).unwrap();
            prop_assert_eq!(rebuilt.get_str("attr1"), Some(s.as_str()));
        }
    }
}
