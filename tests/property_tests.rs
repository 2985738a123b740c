//! Property-based tests for notation parsing and serialization
//!
//! Round-trip and prefix-legality properties over generated notations.

use proptest::prelude::*;
use varnom::{parse_variant, stringify_variant, ViolatedAttr};

fn position() -> impl Strategy<Value = u64> {
    1..1_000_000u64
}

fn dna_base() -> impl Strategy<Value = char> {
    prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')]
}

fn dna_seq() -> impl Strategy<Value = String> {
    proptest::collection::vec(dna_base(), 1..8).prop_map(|bases| bases.into_iter().collect())
}

fn amino_acid() -> impl Strategy<Value = char> {
    proptest::sample::select("ACDEFGHIKLMNPQRSTVWY".chars().collect::<Vec<_>>())
}

fn feature() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{2,6}".prop_map(|s| s)
}

fn assert_round_trip(input: &str) {
    let variant = match parse_variant(input, true) {
        Ok(variant) => variant,
        Err(err) => panic!("expected '{}' to parse, got: {}", input, err),
    };
    prop_assert_helper(input, &stringify_variant(&variant, false));
}

fn prop_assert_helper(input: &str, output: &str) {
    assert_eq!(input, output, "round trip failed for '{}'", input);
}

proptest! {
    #[test]
    fn round_trip_genomic_substitution(
        feature in feature(),
        pos in position(),
        reference in dna_base(),
        alternate in dna_base(),
    ) {
        assert_round_trip(&format!("{}:g.{}{}>{}", feature, pos, reference, alternate));
    }

    #[test]
    fn round_trip_genomic_range_events(
        feature in feature(),
        start in position(),
        end in position(),
        op in proptest::sample::select(vec!["del", "dup", "inv"]),
    ) {
        assert_round_trip(&format!("{}:g.{}_{}{}", feature, start, end, op));
    }

    #[test]
    fn round_trip_insertion_with_sequence(
        feature in feature(),
        start in position(),
        seq in dna_seq(),
    ) {
        assert_round_trip(&format!("{}:g.{}_{}ins{}", feature, start, start + 1, seq));
    }

    #[test]
    fn round_trip_cds_offsets(
        feature in feature(),
        pos in position(),
        offset in 1..10_000i64,
        sign in proptest::sample::select(vec!['+', '-']),
        reference in dna_base(),
        alternate in dna_base(),
    ) {
        assert_round_trip(&format!(
            "{}:c.{}{}{}{}>{}",
            feature, pos, sign, offset, reference, alternate
        ));
    }

    #[test]
    fn round_trip_protein_missense(
        feature in feature(),
        pos in position(),
        reference in amino_acid(),
        alternate in amino_acid(),
    ) {
        assert_round_trip(&format!("{}:p.{}{}{}", feature, reference, pos, alternate));
    }

    #[test]
    fn round_trip_frameshift_truncation(
        feature in feature(),
        pos in position(),
        reference in amino_acid(),
        alternate in amino_acid(),
        truncation in 1..10_000i64,
    ) {
        assert_round_trip(&format!(
            "{}:p.{}{}{}fs*{}",
            feature, reference, pos, alternate, truncation
        ));
    }

    #[test]
    fn round_trip_cytoband_bands(
        feature in feature(),
        arm in proptest::sample::select(vec!['p', 'q']),
        major in proptest::option::of(1..100u32),
        minor in proptest::option::of(1..100u32),
        op in proptest::sample::select(vec!["dup", "del", "inv", "copygain", "copyloss"]),
    ) {
        let mut band = String::new();
        if let Some(major) = major {
            band.push_str(&major.to_string());
            if let Some(minor) = minor {
                band.push('.');
                band.push_str(&minor.to_string());
            }
        }
        assert_round_trip(&format!("{}:y.{}{}{}", feature, arm, band, op));
    }

    #[test]
    fn round_trip_legacy_fusion(
        f1 in feature(),
        f2 in feature(),
        pos1 in position(),
        pos2 in position(),
    ) {
        assert_round_trip(&format!("({},{}):fusion(e.{},e.{})", f1, f2, pos1, pos2));
    }

    #[test]
    fn non_prefix_letters_always_rejected(
        c in proptest::char::range('a', 'z'),
        pos in position(),
    ) {
        prop_assume!(!"geicnrpy".contains(c));
        let err = parse_variant(&format!("FEATURE:{}.{}del", c, pos), true).unwrap_err();
        prop_assert_eq!(err.violated_attr(), Some(ViolatedAttr::Prefix));
    }

    #[test]
    fn parser_never_panics(input in ".{0,60}") {
        let _ = parse_variant(&input, true);
        let _ = parse_variant(&input, false);
    }

    #[test]
    fn parsed_variants_restringify_to_a_fixed_point(input in "[A-Z]{2,5}:[gcp]\\.[0-9]{1,4}(del|dup|ins|inv|delins)?[ACGT]{0,4}") {
        if let Ok(variant) = parse_variant(&input, true) {
            let normalized = stringify_variant(&variant, false);
            if let Ok(reparsed) = parse_variant(&normalized, true) {
                prop_assert_eq!(normalized, stringify_variant(&reparsed, false));
            }
        }
    }
}
