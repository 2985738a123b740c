//! Multi-feature and fusion notation grammars
//!
//! Two syntaxes describe two-feature events:
//!
//! - Legacy parenthesized form: `(REF1,REF2):fusion(e.1,e.2)[ALT]`, parsed
//!   by [`parse_multi_feature`] (the feature list itself is handled by the
//!   top-level dispatcher).
//! - New-style fusion form: `REF1:g.1_100::REF2:g.200_300`, optionally with
//!   an inserted RNA segment between two `::` delimiters, parsed by
//!   [`parse_fusion`].

use crate::error::{NotationError, ParsingError, ViolatedAttr};
use crate::notation::parser::position::parse_position;
use crate::notation::position::{Position, Prefix};
use crate::notation::types::{variant_type_for_token, VariantType};
use crate::notation::variant::VariantTemplate;

/// Parse a legacy multi-feature tail of the shape `TYPE(break1,break2)[ALT]`
pub(crate) fn parse_multi_feature(input: &str) -> Result<VariantTemplate, NotationError> {
    if input.len() < 6 {
        return Err(ParsingError::new(format!(
            "'{}' is too short: multi-feature notation requires a type and two breakpoints",
            input
        ))
        .with_input(input)
        .into());
    }
    let open = input.find('(').ok_or_else(|| {
        ParsingError::new("missing opening parenthesis around the breakpoints")
            .with_input(input)
            .with_violated_attr(ViolatedAttr::Punctuation)
    })?;
    let token = &input[..open];
    let variant_type = variant_type_for_token(&token.to_lowercase()).ok_or_else(|| {
        ParsingError::new(format!("'{}' is not a recognized variant type", token))
            .with_input(input)
            .with_violated_attr(ViolatedAttr::Type)
    })?;
    if !matches!(
        variant_type,
        VariantType::Fusion | VariantType::Translocation | VariantType::InvertedTranslocation
    ) {
        return Err(ParsingError::new(format!(
            "continuous notation is preferred over multi-feature notation for {} variants",
            variant_type
        ))
        .with_input(input)
        .with_violated_attr(ViolatedAttr::Type)
        .into());
    }
    let close = input.find(')').filter(|close| *close > open).ok_or_else(|| {
        ParsingError::new("missing closing parenthesis around the breakpoints")
            .with_input(input)
            .with_violated_attr(ViolatedAttr::Punctuation)
    })?;

    let breakpoints: Vec<&str> = input[open + 1..close].split(',').collect();
    if breakpoints.len() != 2 {
        return Err(ParsingError::new(
            "exactly two comma-separated breakpoints are expected",
        )
        .with_input(input)
        .with_violated_attr(ViolatedAttr::Punctuation)
        .into());
    }
    let (break1_start, break1_end) =
        parse_breakpoint(breakpoints[0]).map_err(|cause| -> NotationError {
            ParsingError::new("failed to parse the first breakpoint")
                .with_input(input)
                .with_violated_attr(ViolatedAttr::Break1)
                .with_cause(cause)
                .into()
        })?;
    let (break2_start, break2_end) =
        parse_breakpoint(breakpoints[1]).map_err(|cause| -> NotationError {
            ParsingError::new("failed to parse the second breakpoint")
                .with_input(input)
                .with_violated_attr(ViolatedAttr::Break2)
                .with_cause(cause)
                .into()
        })?;

    let mut template = VariantTemplate::new(variant_type, break1_start);
    template.break1_end = break1_end;
    template.break2_start = Some(break2_start);
    template.break2_end = break2_end;
    template.multi_feature = true;

    let alt = &input[close + 1..];
    if !alt.is_empty() {
        if alt.bytes().all(|b| b.is_ascii_digit()) {
            let size: u64 = alt.parse().map_err(|_| {
                ParsingError::new(format!("'{}' is not a valid sequence size", alt))
                    .with_input(input)
                    .with_violated_attr(ViolatedAttr::UntemplatedSeq)
            })?;
            template.untemplated_seq_size = Some(size);
        } else if alt.chars().all(|c| c.is_ascii_alphabetic() || c == '?') {
            template.untemplated_seq = Some(alt.to_string());
        } else {
            return Err(ParsingError::new(format!(
                "'{}' is not a valid untemplated sequence",
                alt
            ))
            .with_input(input)
            .with_violated_attr(ViolatedAttr::UntemplatedSeq)
            .into());
        }
    }
    Ok(template)
}

/// Parse one side of a legacy multi-feature breakpoint list: a prefixed
/// position or bare range (`e.1`, `g.1_100`)
fn parse_breakpoint(side: &str) -> Result<(Position, Option<Position>), NotationError> {
    let prefix = parse_side_prefix(side)?;
    let rest = &side[2..];
    match rest.split_once('_') {
        Some((start, end)) => Ok((
            parse_position(prefix, start)?,
            Some(parse_position(prefix, end)?),
        )),
        None => Ok((parse_position(prefix, rest)?, None)),
    }
}

fn parse_side_prefix(side: &str) -> Result<Prefix, NotationError> {
    if side.len() < 3 {
        return Err(ParsingError::new(format!(
            "breakpoint '{}' is too short: expected a prefix, a '.' separator and a position",
            side
        ))
        .with_input(side)
        .into());
    }
    let mut chars = side.chars();
    let prefix_char = chars.next().expect("length checked above");
    let prefix = Prefix::from_char(prefix_char).ok_or_else(|| {
        ParsingError::new(format!("'{}' is not an accepted prefix", prefix_char))
            .with_input(side)
            .with_violated_attr(ViolatedAttr::Prefix)
    })?;
    if chars.next() != Some('.') {
        return Err(ParsingError::new("missing '.' separator after the prefix")
            .with_input(side)
            .with_violated_attr(ViolatedAttr::Punctuation)
            .into());
    }
    Ok(prefix)
}

/// Parse a new-style fusion: `A:range::[INSERTED_RNA::]B:range`
///
/// Returns the template plus the feature names found on each side.
pub(crate) fn parse_fusion(
    input: &str,
    require_features: bool,
) -> Result<(VariantTemplate, Option<String>, Option<String>), NotationError> {
    let sections: Vec<&str> = input.split("::").collect();
    if sections.len() > 3 {
        return Err(ParsingError::new(
            "fusion notation may not contain more than two '::' delimiters",
        )
        .with_input(input)
        .with_violated_attr(ViolatedAttr::Punctuation)
        .into());
    }
    let (reference1, break1_start, break1_end) =
        parse_fusion_side(sections[0], true, require_features, input)?;
    let (reference2, break2_start, break2_end) = parse_fusion_side(
        sections[sections.len() - 1],
        false,
        require_features,
        input,
    )?;

    let mut template = VariantTemplate::new(VariantType::Fusion, break1_start);
    template.break1_end = Some(break1_end);
    template.break2_start = Some(break2_start);
    template.break2_end = Some(break2_end);
    template.multi_feature = true;

    if sections.len() == 3 {
        let inserted = sections[1];
        let is_rna = !inserted.is_empty()
            && inserted
                .chars()
                .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'U'));
        if !is_rna {
            return Err(ParsingError::new(format!(
                "the inserted fusion segment '{}' must be ribonucleotides (A/C/G/U)",
                inserted
            ))
            .with_input(input)
            .with_violated_attr(ViolatedAttr::Alphabet)
            .into());
        }
        template.untemplated_seq = Some(inserted.to_string());
    }
    Ok((template, reference1, reference2))
}

/// Parse one fusion partner: an optional feature name, a colon, and a
/// prefixed breakpoint range of exactly two positions
fn parse_fusion_side(
    section: &str,
    is_first: bool,
    require_features: bool,
    full_input: &str,
) -> Result<(Option<String>, Position, Position), NotationError> {
    let (reference_attr, break_attr) = if is_first {
        (ViolatedAttr::Reference1, ViolatedAttr::Break1)
    } else {
        (ViolatedAttr::Reference2, ViolatedAttr::Break2)
    };
    let parts: Vec<&str> = section.split(':').collect();
    let (feature, breakpoint) = match parts.as_slice() {
        [breakpoint] => (None, *breakpoint),
        [feature, breakpoint] => {
            let feature = if feature.is_empty() {
                None
            } else {
                Some(feature.to_string())
            };
            (feature, *breakpoint)
        }
        _ => {
            return Err(
                ParsingError::new("each fusion partner may contain at most one ':'")
                    .with_input(full_input)
                    .with_violated_attr(ViolatedAttr::Punctuation)
                    .into(),
            );
        }
    };
    if require_features && feature.is_none() {
        return Err(
            ParsingError::new("a feature name is required for each fusion partner")
                .with_input(full_input)
                .with_violated_attr(reference_attr)
                .into(),
        );
    }

    let result = (|| -> Result<(Position, Position), NotationError> {
        let prefix = parse_side_prefix(breakpoint)?;
        let rest = &breakpoint[2..];
        let (start, end) = rest.split_once('_').ok_or_else(|| {
            NotationError::from(ParsingError::new(
                "fusion breakpoints must be specified as a range (start_end)",
            ))
        })?;
        Ok((parse_position(prefix, start)?, parse_position(prefix, end)?))
    })();
    let (start, end) = result.map_err(|cause| -> NotationError {
        let ordinal = if is_first { "first" } else { "second" };
        ParsingError::new(format!("failed to parse the {} fusion breakpoint", ordinal))
            .with_input(full_input)
            .with_violated_attr(break_attr)
            .with_cause(cause)
            .into()
    })?;
    Ok((feature, start, end))
}
