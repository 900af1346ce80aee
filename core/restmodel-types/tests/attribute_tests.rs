use restmodel_types::{AttributeType, Error};
use std::str::FromStr;

// ── Wire tags ────────────────────────────────────────────────────

#[test]
fn every_tag_parses_back() {
    for ty in AttributeType::ALL {
        assert_eq!(AttributeType::from_str(ty.as_str()).unwrap(), ty);
    }
}

#[test]
fn timestamp_is_long() {
    assert_eq!(AttributeType::TIMESTAMP, AttributeType::Long);
    assert_eq!(AttributeType::from_str("timestamp").unwrap(), AttributeType::Long);
    assert_eq!(AttributeType::TIMESTAMP.to_string(), "long");
}

#[test]
fn unknown_tag_is_rejected() {
    let err = AttributeType::from_str("decimal").unwrap_err();
    assert!(matches!(err, Error::InvalidAttributeType(ref tag) if tag == "decimal"));
    assert!(err.to_string().contains("decimal"));
}

#[test]
fn serde_uses_lowercase_tags() {
    assert_eq!(serde_json::to_string(&AttributeType::Boolean).unwrap(), "\"boolean\"");
    let ty: AttributeType = serde_json::from_str("\"timestamp\"").unwrap();
    assert_eq!(ty, AttributeType::Long);
}

// ── Classification ───────────────────────────────────────────────

#[test]
fn numeric_types() {
    assert!(AttributeType::Integer.is_numeric());
    assert!(AttributeType::Float.is_numeric());
    assert!(AttributeType::Long.is_numeric());
    assert!(!AttributeType::String.is_numeric());
    assert!(!AttributeType::Enum.is_numeric());
}

#[test]
fn only_containers_accept_sub_types() {
    let containers: Vec<_> = AttributeType::ALL
        .into_iter()
        .filter(|t| t.accepts_sub_type())
        .collect();
    assert_eq!(containers, vec![AttributeType::List, AttributeType::Object]);
}
