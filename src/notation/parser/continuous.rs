//! Continuous (single-feature) notation grammar
//!
//! Parses the variant tail that follows the feature name: a coordinate
//! prefix, a `.` separator, one or two breakpoints, and a type-specific
//! operator tail.
//!
//! The tail is matched against an ordered set of mutually exclusive rules;
//! the first match wins and the fallback "treat the whole tail as a bare
//! type token" rule is deliberately last.

use crate::error::{NotationError, ParsingError, ViolatedAttr};
use crate::notation::aa::{convert_3to1, three_to_one};
use crate::notation::parser::position::position_fields;
use crate::notation::position::{create_position, Position, Prefix};
use crate::notation::types::{variant_type_for_token, VariantType};
use crate::notation::variant::{Truncation, VariantTemplate};

/// Parse a continuous-notation tail (everything after the feature name)
pub(crate) fn parse_continuous(input: &str) -> Result<VariantTemplate, NotationError> {
    if input.len() < 3 {
        return Err(ParsingError::new(format!(
            "'{}' is too short: continuous notation requires a prefix, a '.' separator and a position",
            input
        ))
        .with_input(input)
        .into());
    }
    let mut chars = input.chars();
    let prefix_char = chars.next().expect("length checked above");
    let prefix = Prefix::from_char(prefix_char).ok_or_else(|| {
        ParsingError::new(format!("'{}' is not an accepted prefix", prefix_char))
            .with_input(input)
            .with_violated_attr(ViolatedAttr::Prefix)
    })?;
    if chars.next() != Some('.') {
        return Err(ParsingError::new("missing '.' separator after the prefix")
            .with_input(input)
            .with_violated_attr(ViolatedAttr::Punctuation)
            .into());
    }

    let rest = &input[2..];
    let (rest, break1_start, break1_end) = parse_break(prefix, rest, ViolatedAttr::Break1, input)?;
    let (tail, break2_start, break2_end) = match rest.strip_prefix('_') {
        Some(after) => {
            let (rest, start, end) = parse_break(prefix, after, ViolatedAttr::Break2, input)?;
            (rest, Some(start), end)
        }
        None => (rest, None, None),
    };

    let mut template = VariantTemplate::new(VariantType::Substitution, break1_start);
    template.break1_end = break1_end;
    template.break2_start = break2_start;
    template.break2_end = break2_end;
    parse_tail(&mut template, prefix, tail, input)?;

    if prefix == Prefix::Cytoband {
        check_cytoband(&template, input)?;
    }
    if prefix == Prefix::Protein {
        apply_protein_rules(&mut template, input)?;
    }
    refine_type(&mut template, prefix);
    Ok(template)
}

/// Parse a breakpoint: a single position token or a parenthesized
/// uncertainty range `(start_end)`
fn parse_break<'a>(
    prefix: Prefix,
    input: &'a str,
    attr: ViolatedAttr,
    full_input: &str,
) -> Result<(&'a str, Position, Option<Position>), NotationError> {
    let result = (|| -> Result<(&'a str, Position, Option<Position>), NotationError> {
        match input.strip_prefix('(') {
            Some(after_paren) => {
                let (rest, start_fields) = position_fields(prefix, after_paren)
                    .map_err(|_| pattern_error(prefix, after_paren))?;
                let rest = rest.strip_prefix('_').ok_or_else(|| {
                    ParsingError::new("missing '_' separator in the uncertainty range")
                        .with_violated_attr(ViolatedAttr::Punctuation)
                })?;
                let (rest, end_fields) =
                    position_fields(prefix, rest).map_err(|_| pattern_error(prefix, rest))?;
                let rest = rest.strip_prefix(')').ok_or_else(|| {
                    ParsingError::new("missing closing parenthesis on the uncertainty range")
                        .with_violated_attr(ViolatedAttr::Punctuation)
                })?;
                let start = create_position(prefix, start_fields)?;
                let end = create_position(prefix, end_fields)?;
                Ok((rest, start, Some(end)))
            }
            None => {
                let (rest, fields) =
                    position_fields(prefix, input).map_err(|_| pattern_error(prefix, input))?;
                Ok((rest, create_position(prefix, fields)?, None))
            }
        }
    })();
    result.map_err(|cause| {
        let ordinal = match attr {
            ViolatedAttr::Break2 => "second",
            _ => "first",
        };
        ParsingError::new(format!("failed to parse the {} breakpoint", ordinal))
            .with_input(full_input)
            .with_violated_attr(attr)
            .with_cause(cause)
            .into()
    })
}

fn pattern_error(prefix: Prefix, input: &str) -> NotationError {
    ParsingError::new(format!(
        "expected a '{}' position at '{}'",
        prefix.to_char(),
        input
    ))
    .with_input(input)
    .into()
}

/// Sequence of nucleotide or amino acid letters, `?` permitted
fn is_seq(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic() || c == '?')
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn nonempty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Run of title-case 3-letter amino acid codes (`Lys`, `LysTer`, ...)
///
/// Each chunk must be in the code table, so the operator spellings `Spl`,
/// `Ext` and friends never match as amino acids.
fn is_title_case_triples(s: &str) -> bool {
    let bytes = s.as_bytes();
    !bytes.is_empty()
        && bytes.len() % 3 == 0
        && bytes.chunks(3).all(|chunk| {
            chunk[0].is_ascii_uppercase()
                && chunk[1].is_ascii_lowercase()
                && chunk[2].is_ascii_lowercase()
                && three_to_one(std::str::from_utf8(chunk).expect("ascii checked above")).is_some()
        })
}

/// Alternate amino acid token for the frameshift/extension rule
///
/// Uppercase 1-letter runs only (plus `?`/`*`), or title-case 3-letter runs:
/// the lowercase operator tokens `fs`/`ext`/`spl` stay unambiguous.
fn is_aa_alt(s: &str) -> bool {
    let uppercase_run = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c == '?' || c == '*');
    uppercase_run || is_title_case_triples(s)
}

/// Ordered tail dispatch; first match wins
fn parse_tail(
    template: &mut VariantTemplate,
    prefix: Prefix,
    tail: &str,
    full_input: &str,
) -> Result<(), NotationError> {
    // del[REF]ins[ALT|N]
    if let Some((ref_seq, untemplated_seq, size)) = match_delins(tail) {
        template.variant_type = VariantType::Indel;
        template.ref_seq = ref_seq;
        template.untemplated_seq = untemplated_seq;
        template.untemplated_seq_size = size;
        return Ok(());
    }

    // (del|dup|ins|inv)[SEQ|N]
    for op in ["del", "dup", "ins", "inv"] {
        if let Some(operand) = tail.strip_prefix(op) {
            let parsed = if operand.is_empty() {
                Some((None, None))
            } else if is_digits(operand) {
                let size: u64 = operand.parse().map_err(|_| {
                    ParsingError::new(format!("'{}' is not a valid sequence size", operand))
                        .with_input(full_input)
                        .with_violated_attr(ViolatedAttr::UntemplatedSeq)
                })?;
                Some((None, Some(size)))
            } else if is_seq(operand) {
                Some((Some(operand.to_string()), None))
            } else {
                None
            };
            if let Some((seq, size)) = parsed {
                template.variant_type =
                    variant_type_for_token(op).expect("operator tokens are in the table");
                template.untemplated_seq_size = size;
                match op {
                    // The trailing sequence names the deleted/inverted
                    // reference bases
                    "del" | "inv" => template.ref_seq = seq,
                    // A duplication names the duplicated reference, which is
                    // also the novel copy
                    "dup" => {
                        template.ref_seq = seq.clone();
                        template.untemplated_seq = seq;
                    }
                    "ins" => template.untemplated_seq = seq,
                    _ => unreachable!(),
                }
                return Ok(());
            }
        }
    }

    // Bare amino-acid alternate (or `=` for synonymous): protein
    // substitution shorthand
    if prefix == Prefix::Protein && (tail == "=" || is_aa_alt(tail)) {
        template.variant_type = VariantType::Substitution;
        template.untemplated_seq = Some(tail.to_string());
        return Ok(());
    }

    // REF>ALT
    if let Some(gt) = tail.find('>') {
        let ref_part = &tail[..gt];
        let alt_part = &tail[gt + 1..];
        if (ref_part.is_empty() || is_seq(ref_part)) && (alt_part.is_empty() || is_seq(alt_part)) {
            if prefix == Prefix::Protein {
                return Err(ParsingError::new(
                    "protein substitutions may not use the '>' operator; write the alternate amino acid directly after the position",
                )
                .with_input(full_input)
                .with_violated_attr(ViolatedAttr::Type)
                .into());
            }
            if prefix == Prefix::Exonic {
                return Err(ParsingError::new(
                    "substitutions may not be specified at the exon coordinate level",
                )
                .with_input(full_input)
                .with_violated_attr(ViolatedAttr::Type)
                .into());
            }
            template.variant_type = VariantType::Substitution;
            template.ref_seq = nonempty(ref_part);
            template.untemplated_seq = nonempty(alt_part);
            return Ok(());
        }
    }

    // [AA](fs|ext)[(*|-|Ter)[N|?]]
    if let Some((alt, op, truncation)) = match_frameshift(tail) {
        if prefix != Prefix::Protein {
            return Err(ParsingError::new(
                "frameshift and extension events are only supported at the protein level",
            )
            .with_input(full_input)
            .with_violated_attr(ViolatedAttr::Type)
            .into());
        }
        if op == "fs" && template.break2_start.is_some() {
            return Err(
                ParsingError::new("frameshift variants may not be specified over a range")
                    .with_input(full_input)
                    .with_violated_attr(ViolatedAttr::Break2)
                    .into(),
            );
        }
        if alt.as_deref() == Some("*") {
            if let Some(Truncation::At(n)) = truncation {
                if n != 1 {
                    return Err(ParsingError::new(format!(
                        "the alternate stop codon (*) conflicts with a truncation position of {}",
                        n
                    ))
                    .with_input(full_input)
                    .with_violated_attr(ViolatedAttr::Truncation)
                    .into());
                }
            }
        }
        template.variant_type = if op == "fs" {
            VariantType::Frameshift
        } else {
            VariantType::Extension
        };
        template.untemplated_seq = alt;
        template.truncation = truncation;
        return Ok(());
    }

    // Splice-site
    if tail.eq_ignore_ascii_case("spl") {
        template.variant_type = VariantType::SpliceSite;
        return Ok(());
    }

    // Fallback: the whole tail is a bare type token
    if tail.is_empty() {
        return Err(ParsingError::new("the variant type was not specified")
            .with_input(full_input)
            .with_violated_attr(ViolatedAttr::Type)
            .into());
    }
    match variant_type_for_token(&tail.to_lowercase()) {
        Some(variant_type) => {
            template.variant_type = variant_type;
            Ok(())
        }
        None => Err(
            ParsingError::new(format!("'{}' is not a recognized variant type", tail))
                .with_input(full_input)
                .with_violated_attr(ViolatedAttr::Type)
                .into(),
        ),
    }
}

type DelinsMatch = (Option<String>, Option<String>, Option<u64>);

fn match_delins(tail: &str) -> Option<DelinsMatch> {
    let rest = tail.strip_prefix("del")?;
    let ins_at = rest.find("ins")?;
    let ref_part = &rest[..ins_at];
    let alt_part = &rest[ins_at + 3..];
    if !ref_part.is_empty() && !is_seq(ref_part) {
        return None;
    }
    let (untemplated_seq, size) = if alt_part.is_empty() {
        (None, None)
    } else if is_digits(alt_part) {
        (None, Some(alt_part.parse().ok()?))
    } else if is_seq(alt_part) {
        (Some(alt_part.to_string()), None)
    } else {
        return None;
    };
    Some((nonempty(ref_part), untemplated_seq, size))
}

type FrameshiftMatch = (Option<String>, &'static str, Option<Truncation>);

fn match_frameshift(tail: &str) -> Option<FrameshiftMatch> {
    for op in ["fs", "ext"] {
        let mut search = 0;
        while let Some(found) = tail[search..].find(op) {
            let at = search + found;
            let alt = &tail[..at];
            if alt.is_empty() || is_aa_alt(alt) {
                if let Some(truncation) = match_truncation(&tail[at + op.len()..]) {
                    return Some((nonempty(alt), op, truncation));
                }
            }
            search = at + 1;
        }
    }
    None
}

/// Parse the truncation marker following `fs`/`ext`
///
/// Returns `None` when the remainder is not a valid marker (the rule does
/// not match), `Some(None)` when there is no marker at all, and
/// `Some(Some(..))` for `*N`, `*?`, `-N`, `TerN` and their variants. A
/// marker with no number is the explicitly-unknown truncation.
fn match_truncation(rest: &str) -> Option<Option<Truncation>> {
    if rest.is_empty() {
        return Some(None);
    }
    let (negative_marker, number) = if let Some(after) = rest.strip_prefix("Ter") {
        (false, after)
    } else if let Some(after) = rest.strip_prefix('*') {
        (false, after)
    } else if let Some(after) = rest.strip_prefix('-') {
        (true, after)
    } else {
        return None;
    };
    if number.is_empty() || number == "?" {
        return Some(Some(Truncation::Unknown));
    }
    let (negative, digits) = match number.strip_prefix('-') {
        // A sign after the marker is only meaningful for `*`/`Ter`
        Some(after) if !negative_marker => (true, after),
        Some(_) => return None,
        None => (negative_marker, number),
    };
    if digits == "?" {
        return Some(Some(Truncation::Unknown));
    }
    if !is_digits(digits) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(Some(Truncation::At(if negative { -value } else { value })))
}

/// Cytoband events are restricted to copy-level changes and may not carry
/// sequence elements
fn check_cytoband(template: &VariantTemplate, full_input: &str) -> Result<(), NotationError> {
    if !matches!(
        template.variant_type,
        VariantType::Duplication
            | VariantType::Deletion
            | VariantType::CopyGain
            | VariantType::CopyLoss
            | VariantType::Inversion
    ) {
        return Err(ParsingError::new(format!(
            "{} variants may not be specified at the cytoband coordinate level",
            template.variant_type
        ))
        .with_input(full_input)
        .with_violated_attr(ViolatedAttr::Type)
        .into());
    }
    if template.ref_seq.is_some()
        || template.untemplated_seq.is_some()
        || template.untemplated_seq_size.is_some()
    {
        return Err(ParsingError::new(
            "sequence elements (refSeq/untemplatedSeq) may not be specified at the cytoband coordinate level",
        )
        .with_input(full_input)
        .with_violated_attr(ViolatedAttr::UntemplatedSeq)
        .into());
    }
    Ok(())
}

/// Protein-specific post-processing: default the reference sequence from the
/// breakpoint amino acid, then normalize 3-letter spellings
fn apply_protein_rules(
    template: &mut VariantTemplate,
    full_input: &str,
) -> Result<(), NotationError> {
    // Events without a ref/alt slot of their own inherit the reference
    // amino acid of a single certain breakpoint
    let copies_ref = matches!(
        template.variant_type,
        VariantType::Substitution
            | VariantType::Frameshift
            | VariantType::Extension
            | VariantType::SpliceSite
    );
    if copies_ref
        && template.ref_seq.is_none()
        && template.break1_end.is_none()
        && template.break2_start.is_none()
    {
        if let Some(protein) = template.break1_start.as_protein() {
            if let Some(ref_aa) = protein.ref_aa {
                // Keep the 3-letter spelling when one was used, so the bulk
                // conversion below applies uniformly
                template.ref_seq = Some(
                    protein
                        .long_ref_aa
                        .clone()
                        .unwrap_or_else(|| ref_aa.to_string()),
                );
            }
        }
    }

    let any_long_form = [
        Some(&template.break1_start),
        template.break1_end.as_ref(),
        template.break2_start.as_ref(),
        template.break2_end.as_ref(),
    ]
    .into_iter()
    .flatten()
    .any(|position| {
        position
            .as_protein()
            .is_some_and(|protein| protein.long_ref_aa.is_some())
    });

    if any_long_form {
        template.ref_seq = convert_seq(template.ref_seq.take(), full_input)?;
        template.untemplated_seq = convert_seq(template.untemplated_seq.take(), full_input)?;
    }
    Ok(())
}

fn convert_seq(seq: Option<String>, full_input: &str) -> Result<Option<String>, NotationError> {
    match seq {
        // Only runs of amino acid letters convert; the `=`, `*` and `?`
        // markers are already in their final form
        Some(seq) if !seq.chars().all(|c| c.is_ascii_alphabetic()) => Ok(Some(seq)),
        Some(seq) => {
            let converted = convert_3to1(&seq)
                .map_err(|e| NotationError::from(e.with_input(full_input.to_string())))?;
            Ok(Some(converted))
        }
        None => Ok(None),
    }
}

/// Post-hoc type refinement from the coarse grammar-level category
fn refine_type(template: &mut VariantTemplate, prefix: Prefix) {
    match template.variant_type {
        VariantType::Substitution if prefix == Prefix::Protein => {
            let alt = template.untemplated_seq.as_deref();
            if template.truncation.is_some() || alt.is_some_and(|s| s.contains('*')) {
                template.variant_type = VariantType::NonsenseMutation;
            } else if alt.is_some_and(|s| s != "=" && s != "?") {
                template.variant_type = VariantType::MissenseMutation;
            }
        }
        VariantType::Frameshift => {
            if matches!(template.truncation, Some(Truncation::At(_))) {
                template.variant_type = VariantType::TruncatingFrameshiftMutation;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_deletion() {
        let template = parse_continuous("g.3del").unwrap();
        assert_eq!(template.variant_type, VariantType::Deletion);
        assert_eq!(template.break1_start.to_string(), "3");
        assert!(template.break2_start.is_none());
    }

    #[test]
    fn test_parse_range_deletion() {
        let template = parse_continuous("c.1_18del").unwrap();
        assert_eq!(template.break1_start.to_string(), "1");
        assert_eq!(template.break2_start.as_ref().unwrap().to_string(), "18");
    }

    #[test]
    fn test_parse_uncertainty_range() {
        let template = parse_continuous("c.(1_18)del").unwrap();
        assert_eq!(template.break1_end.as_ref().unwrap().to_string(), "18");
        assert!(template.break2_start.is_none());
    }

    #[test]
    fn test_parse_substitution() {
        let template = parse_continuous("g.3A>T").unwrap();
        assert_eq!(template.variant_type, VariantType::Substitution);
        assert_eq!(template.ref_seq.as_deref(), Some("A"));
        assert_eq!(template.untemplated_seq.as_deref(), Some("T"));
    }

    #[test]
    fn test_parse_delins() {
        let template = parse_continuous("g.3_4delTTinsCG").unwrap();
        assert_eq!(template.variant_type, VariantType::Indel);
        assert_eq!(template.ref_seq.as_deref(), Some("TT"));
        assert_eq!(template.untemplated_seq.as_deref(), Some("CG"));

        let template = parse_continuous("g.3_4delins8").unwrap();
        assert_eq!(template.untemplated_seq, None);
        assert_eq!(template.untemplated_seq_size, Some(8));
    }

    #[test]
    fn test_parse_duplication_sequence_is_both_ref_and_alt() {
        let template = parse_continuous("g.3_4dupCT").unwrap();
        assert_eq!(template.ref_seq.as_deref(), Some("CT"));
        assert_eq!(template.untemplated_seq.as_deref(), Some("CT"));
    }

    #[test]
    fn test_parse_protein_shorthand_refines_to_missense() {
        let template = parse_continuous("p.G12D").unwrap();
        assert_eq!(template.variant_type, VariantType::MissenseMutation);
        assert_eq!(template.ref_seq.as_deref(), Some("G"));
        assert_eq!(template.untemplated_seq.as_deref(), Some("D"));
    }

    #[test]
    fn test_parse_protein_nonsense() {
        let template = parse_continuous("p.R10*").unwrap();
        assert_eq!(template.variant_type, VariantType::NonsenseMutation);
    }

    #[test]
    fn test_parse_protein_synonymous_stays_substitution() {
        let template = parse_continuous("p.G12=").unwrap();
        assert_eq!(template.variant_type, VariantType::Substitution);
        assert_eq!(template.untemplated_seq.as_deref(), Some("="));
    }

    #[test]
    fn test_parse_frameshift_with_truncation() {
        let template = parse_continuous("p.R10Kfs*10").unwrap();
        assert_eq!(
            template.variant_type,
            VariantType::TruncatingFrameshiftMutation
        );
        assert_eq!(template.untemplated_seq.as_deref(), Some("K"));
        assert_eq!(template.truncation, Some(Truncation::At(10)));
        assert_eq!(template.ref_seq.as_deref(), Some("R"));
    }

    #[test]
    fn test_parse_frameshift_marker_without_number() {
        let template = parse_continuous("p.R10fs*").unwrap();
        assert_eq!(template.variant_type, VariantType::Frameshift);
        assert_eq!(template.truncation, Some(Truncation::Unknown));
    }

    #[test]
    fn test_parse_extension_negative_truncation() {
        let template = parse_continuous("p.M1ext-5").unwrap();
        assert_eq!(template.variant_type, VariantType::Extension);
        assert_eq!(template.truncation, Some(Truncation::At(-5)));

        let template = parse_continuous("p.M1ext*-5").unwrap();
        assert_eq!(template.truncation, Some(Truncation::At(-5)));
    }

    #[test]
    fn test_parse_three_letter_conversion() {
        let template = parse_continuous("p.Arg10Lysfs*10").unwrap();
        assert_eq!(template.ref_seq.as_deref(), Some("R"));
        assert_eq!(template.untemplated_seq.as_deref(), Some("K"));
    }

    #[test]
    fn test_parse_three_letter_substitution() {
        let template = parse_continuous("p.Val600Glu").unwrap();
        assert_eq!(template.variant_type, VariantType::MissenseMutation);
        assert_eq!(template.ref_seq.as_deref(), Some("V"));
        assert_eq!(template.untemplated_seq.as_deref(), Some("E"));
    }

    #[test]
    fn test_stop_codon_truncation_conflict() {
        let err = parse_continuous("p.R10*fs*10").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Truncation));
        assert!(parse_continuous("p.R10*fs*1").is_ok());
    }

    #[test]
    fn test_frameshift_rejects_range() {
        let err = parse_continuous("p.R10_T12fs").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Break2));
    }

    #[test]
    fn test_frameshift_requires_protein_prefix() {
        let err = parse_continuous("g.3fs").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Type));
    }

    #[test]
    fn test_protein_substitution_rejects_gt_operator() {
        let err = parse_continuous("p.R10G>T").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Type));
        assert!(err.to_string().contains("'>' operator"));
    }

    #[test]
    fn test_exonic_substitution_rejected() {
        let err = parse_continuous("e.20A>T").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Type));
    }

    #[test]
    fn test_bad_prefix() {
        let err = parse_continuous("z.3del").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Prefix));
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_continuous("g3del").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Punctuation));
    }

    #[test]
    fn test_zero_position_nests_validation_error() {
        let err = parse_continuous("g.0del").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Break1));
        match err {
            NotationError::Parsing(e) => {
                let cause = e.cause.expect("nested cause");
                assert!(cause.is_input_validation());
            }
            other => panic!("expected a parsing error, got {:?}", other),
        }
    }

    #[test]
    fn test_cytoband_restrictions() {
        assert!(parse_continuous("y.p11.1dup").is_ok());
        assert!(parse_continuous("y.q22copygain").is_ok());

        let err = parse_continuous("y.p12.1ins").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Type));

        let err = parse_continuous("y.p11delAC").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::UntemplatedSeq));
    }

    #[test]
    fn test_alias_token_resolves_to_canonical_type() {
        let template = parse_continuous("y.q21gain").unwrap();
        assert_eq!(template.variant_type, VariantType::CopyGain);
    }

    #[test]
    fn test_unknown_type_token() {
        let err = parse_continuous("g.3bogus").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Type));

        let err = parse_continuous("g.3_5").unwrap_err();
        assert_eq!(err.violated_attr(), Some(ViolatedAttr::Type));
    }

    #[test]
    fn test_splice_site_case_insensitive() {
        assert_eq!(
            parse_continuous("p.W288spl").unwrap().variant_type,
            VariantType::SpliceSite
        );
        assert_eq!(
            parse_continuous("p.W288Spl").unwrap().variant_type,
            VariantType::SpliceSite
        );
    }
}
