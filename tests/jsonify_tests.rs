//! JSON projection tests
//!
//! The JSON record strips internal bookkeeping, tags positions with their
//! `@class`, and keeps the omitted-vs-explicitly-unknown distinction (`null`
//! for unknown, absent for never set).

use serde_json::json;
use varnom::{jsonify_variant, parse_variant};

#[test]
fn test_simple_deletion_projection() {
    let variant = parse_variant("FEATURE:g.3del", true).unwrap();
    let record = jsonify_variant(&variant);
    assert_eq!(
        record,
        json!({
            "type": "deletion",
            "reference1": "FEATURE",
            "break1Start": {"@class": "GenomicPosition", "pos": 3},
            "break1Repr": "g.3",
        })
    );
}

#[test]
fn test_frameshift_projection() {
    let variant = parse_variant("FEATURE:p.R10Kfs*10", true).unwrap();
    let record = jsonify_variant(&variant);
    assert_eq!(record["type"], "truncating frameshift mutation");
    assert_eq!(
        record["break1Start"],
        json!({"@class": "ProteinPosition", "pos": 10, "refAA": "R"})
    );
    assert_eq!(record["refSeq"], "R");
    assert_eq!(record["untemplatedSeq"], "K");
    assert_eq!(record["truncation"], 10);
}

#[test]
fn test_unknown_truncation_is_null() {
    let variant = parse_variant("FEATURE:p.R10fs*?", true).unwrap();
    let record = jsonify_variant(&variant);
    assert!(record["truncation"].is_null());

    // No marker at all: the field is absent entirely
    let variant = parse_variant("FEATURE:p.R10fs", true).unwrap();
    let record = jsonify_variant(&variant);
    assert!(record.get("truncation").is_none());
}

#[test]
fn test_fusion_projection() {
    let variant = parse_variant("(F1,F2):fusion(e.1,e.2)ATGC", true).unwrap();
    let record = jsonify_variant(&variant);
    assert_eq!(record["type"], "fusion");
    assert_eq!(record["reference1"], "F1");
    assert_eq!(record["reference2"], "F2");
    assert_eq!(record["break1Start"]["@class"], "ExonicPosition");
    assert_eq!(record["break2Start"]["@class"], "ExonicPosition");
    assert_eq!(record["untemplatedSeq"], "ATGC");
    assert_eq!(record["untemplatedSeqSize"], 4);
}

#[test]
fn test_bookkeeping_fields_are_stripped() {
    let variant = parse_variant("FEATURE:c.100+5C>T", true).unwrap();
    let record = jsonify_variant(&variant);
    for hidden in ["prefix", "multiFeature", "noFeatures", "notationType"] {
        assert!(record.get(hidden).is_none(), "{} should be stripped", hidden);
    }
    // The offset survives on the position itself
    assert_eq!(record["break1Start"]["offset"], 5);
    assert!(record["break1Start"].get("longRefAA").is_none());
}

#[test]
fn test_cytoband_band_projection() {
    // Explicitly unknown bands are null, never-written bands are absent
    let variant = parse_variant("FEATURE:y.p?del", true).unwrap();
    let record = jsonify_variant(&variant);
    let position = &record["break1Start"];
    assert_eq!(position["@class"], "CytobandPosition");
    assert_eq!(position["arm"], "p");
    assert!(position["majorBand"].is_null());
    assert!(position.get("minorBand").is_none());

    let variant = parse_variant("FEATURE:y.p11.1dup", true).unwrap();
    let position = &jsonify_variant(&variant)["break1Start"];
    assert_eq!(position["majorBand"], 11);
    assert_eq!(position["minorBand"], 1);
}

#[test]
fn test_unknown_position_is_null() {
    let variant = parse_variant("FEATURE:c.?del", true).unwrap();
    let record = jsonify_variant(&variant);
    assert!(record["break1Start"]["pos"].is_null());
}

#[test]
fn test_projection_is_valid_json_text() {
    let variant = parse_variant("(F1,F2):fusion(g.1_3,g.4_5)", true).unwrap();
    let text = serde_json::to_string(&jsonify_variant(&variant)).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed["break1End"]["pos"], 3);
    assert_eq!(reparsed["break2Repr"], "g.4_5");
}
