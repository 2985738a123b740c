//! Notation parsing
//!
//! [`parse_variant`] is the single entry point. It decides between the three
//! notation families (continuous, legacy multi-feature, new-style fusion),
//! resolves the reference features, delegates to the matching grammar, and
//! assembles the validated [`VariantNotation`] record.

pub mod continuous;
pub mod multi;
pub mod position;

pub use position::parse_position;

use crate::error::{NotationError, ParsingError, ViolatedAttr};
use crate::notation::reference::Reference;
use crate::notation::variant::VariantNotation;
use serde_json::json;

/// Parse a variant notation string
///
/// With `require_features` set (the usual case) the notation must name its
/// reference feature(s); pass `false` to tolerate feature-less notations
/// like `p.G12D`.
///
/// # Example
///
/// ```
/// use varnom::parse_variant;
///
/// let variant = parse_variant("KRAS:p.G12D", true).unwrap();
/// assert_eq!(variant.variant_type.name(), "missense mutation");
/// assert_eq!(variant.to_string(), "KRAS:p.G12D");
/// ```
pub fn parse_variant(input: &str, require_features: bool) -> Result<VariantNotation, NotationError> {
    if input.len() < 4 {
        return Err(ParsingError::new(format!(
            "'{}' is too short. Must be a minimum of four characters",
            input
        ))
        .with_input(input)
        .into());
    }

    // New-style fusion notation
    if input.contains("::") {
        let (mut template, reference1, reference2) = multi::parse_fusion(input, require_features)?;
        template.no_features = reference1.is_none() && reference2.is_none();
        template.reference1 = reference1.map(Reference::Name);
        template.reference2 = reference2.map(Reference::Name);
        return VariantNotation::new(template);
    }

    let colons = input.matches(':').count();
    if colons > 1 {
        return Err(
            ParsingError::new("variant notation must contain at most one colon")
                .with_input(input)
                .with_violated_attr(ViolatedAttr::Punctuation)
                .into(),
        );
    }
    let (feature_str, notation_str) = match input.split_once(':') {
        Some((feature, notation)) => (feature, notation),
        None => {
            if require_features {
                return Err(ParsingError::new(
                    "feature name was not specified; a feature name is required",
                )
                .with_input(input)
                .with_violated_attr(ViolatedAttr::Reference1)
                .into());
            }
            ("", input)
        }
    };

    // Legacy multi-feature notation is flagged by a comma in the notation or
    // a parenthesized feature list
    let is_multi_feature =
        notation_str.contains(',') || feature_str.starts_with('(') || feature_str.contains(',');

    if is_multi_feature {
        let (reference1, reference2) = parse_feature_pair(feature_str, require_features, input)?;
        let mut template = multi::parse_multi_feature(notation_str).map_err(|err| {
            annotate(
                err,
                json!({
                    "reference1": reference1,
                    "reference2": reference2,
                    "notation": notation_str,
                }),
            )
        })?;
        template.no_features = reference1.is_none();
        template.reference1 = reference1.map(Reference::Name);
        template.reference2 = reference2.map(Reference::Name);
        return VariantNotation::new(template);
    }

    let reference1 = if feature_str.is_empty() {
        if require_features {
            return Err(ParsingError::new(
                "feature name was not specified; a feature name is required",
            )
            .with_input(input)
            .with_violated_attr(ViolatedAttr::Reference1)
            .into());
        }
        None
    } else {
        Some(feature_str.to_string())
    };
    let mut template = continuous::parse_continuous(notation_str).map_err(|err| {
        annotate(
            err,
            json!({
                "reference1": reference1,
                "notation": notation_str,
            }),
        )
    })?;
    template.no_features = reference1.is_none();
    template.reference1 = reference1.map(Reference::Name);
    VariantNotation::new(template)
}

/// Resolve the `(REF1,REF2)` feature list of legacy multi-feature notation
fn parse_feature_pair(
    feature_str: &str,
    require_features: bool,
    full_input: &str,
) -> Result<(Option<String>, Option<String>), NotationError> {
    if feature_str.is_empty() {
        if require_features {
            return Err(ParsingError::new(
                "feature names were not specified; multi-feature notation requires two features",
            )
            .with_input(full_input)
            .with_violated_attr(ViolatedAttr::Reference1)
            .into());
        }
        return Ok((None, None));
    }
    let inner = feature_str
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| {
            ParsingError::new(
                "multi-feature notation must list its reference features in parentheses",
            )
            .with_input(full_input)
            .with_violated_attr(ViolatedAttr::Punctuation)
        })?;
    let features: Vec<&str> = inner.split(',').collect();
    if features.len() != 2 {
        return Err(ParsingError::new(
            "exactly two comma-separated reference features are expected",
        )
        .with_input(full_input)
        .with_violated_attr(ViolatedAttr::Punctuation)
        .into());
    }
    let reference1 = nonempty(features[0]);
    let reference2 = nonempty(features[1]);
    if require_features {
        if reference1.is_none() {
            return Err(ParsingError::new("the first feature name is empty")
                .with_input(full_input)
                .with_violated_attr(ViolatedAttr::Reference1)
                .into());
        }
        if reference2.is_none() {
            return Err(ParsingError::new("the second feature name is empty")
                .with_input(full_input)
                .with_violated_attr(ViolatedAttr::Reference2)
                .into());
        }
    }
    Ok((reference1, reference2))
}

fn nonempty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Attach the partially-decoded context to a sub-parser error
///
/// The original error is rethrown unchanged apart from the snapshot, so the
/// kind and violated attribute survive.
fn annotate(err: NotationError, parsed: serde_json::Value) -> NotationError {
    match err {
        NotationError::Parsing(e) if e.parsed.is_none() => e.with_parsed(parsed).into(),
        other => other,
    }
}
