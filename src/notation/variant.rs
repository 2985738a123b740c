//! Variant record assembly and serialization
//!
//! [`VariantNotation`] is the central record assembled after parsing (or
//! built directly from a [`VariantTemplate`]). Assembly performs the
//! cross-field validation that only makes sense once both breakpoints and
//! the event type are known together; the record itself is immutable and
//! serialization back to notation text is a pure read.

use crate::error::{InputValidationError, NotationError, ParsingError, ViolatedAttr};
use crate::notation::position::{create_break_repr, Position, Prefix};
use crate::notation::reference::Reference;
use crate::notation::types::VariantType;
use serde_json::{json, Value};
use std::fmt;

/// Position of a new stop codon relative to the reference
///
/// Used by frameshift, extension and splice-site events. Negative values
/// denote upstream positions (an extension reaching backwards to a new start
/// codon). `Unknown` is the explicitly-written `*?` form, distinct from no
/// truncation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truncation {
    At(i64),
    Unknown,
}

impl Truncation {
    fn to_json(self) -> Value {
        match self {
            Truncation::At(n) => json!(n),
            Truncation::Unknown => Value::Null,
        }
    }
}

/// Raw field values used to assemble a [`VariantNotation`]
#[derive(Debug, Clone, PartialEq)]
pub struct VariantTemplate {
    pub variant_type: VariantType,
    pub reference1: Option<Reference>,
    pub reference2: Option<Reference>,
    pub break1_start: Position,
    pub break1_end: Option<Position>,
    pub break2_start: Option<Position>,
    pub break2_end: Option<Position>,
    pub ref_seq: Option<String>,
    pub untemplated_seq: Option<String>,
    pub untemplated_seq_size: Option<u64>,
    pub truncation: Option<Truncation>,
    pub multi_feature: bool,
    pub no_features: bool,
}

impl VariantTemplate {
    /// Template with only the required fields set
    pub fn new(variant_type: VariantType, break1_start: Position) -> Self {
        Self {
            variant_type,
            reference1: None,
            reference2: None,
            break1_start,
            break1_end: None,
            break2_start: None,
            break2_end: None,
            ref_seq: None,
            untemplated_seq: None,
            untemplated_seq_size: None,
            truncation: None,
            multi_feature: false,
            no_features: false,
        }
    }
}

/// Event types that describe a point change and therefore reject a second
/// breakpoint
fn rejects_second_breakpoint(variant_type: VariantType) -> bool {
    matches!(
        variant_type,
        VariantType::Substitution
            | VariantType::MissenseMutation
            | VariantType::NonsenseMutation
            | VariantType::Frameshift
            | VariantType::TruncatingFrameshiftMutation
            | VariantType::Extension
            | VariantType::SpliceSite
    )
}

/// Event types that may carry a truncation
fn accepts_truncation(variant_type: VariantType) -> bool {
    matches!(
        variant_type,
        VariantType::Frameshift
            | VariantType::TruncatingFrameshiftMutation
            | VariantType::Extension
            | VariantType::SpliceSite
    )
}

/// A parsed or assembled variant
///
/// Constructed once per parse (or directly via [`VariantNotation::new`]) and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantNotation {
    /// Long-form event type
    pub variant_type: VariantType,
    pub reference1: Option<Reference>,
    pub reference2: Option<Reference>,
    pub break1_start: Position,
    pub break1_end: Option<Position>,
    pub break2_start: Option<Position>,
    pub break2_end: Option<Position>,
    /// Canonical rendering of the first breakpoint, prefixed (`g.3`, `c.(1_18)`)
    pub break1_repr: String,
    /// Canonical rendering of the second breakpoint, when present
    pub break2_repr: Option<String>,
    /// Reference sequence affected by the event (upper-cased)
    pub ref_seq: Option<String>,
    /// Inserted/novel sequence not present in the reference (upper-cased)
    pub untemplated_seq: Option<String>,
    /// Length of the untemplated sequence; may be given without a literal
    /// sequence for non-specific insertions (`ins8`)
    pub untemplated_seq_size: Option<u64>,
    pub truncation: Option<Truncation>,
    /// Two references participate (fusion/translocation)
    pub multi_feature: bool,
    /// The caller opted out of requiring reference features
    pub no_features: bool,
    /// Shared coordinate prefix; unset for multi-feature variants whose two
    /// sides use different coordinate systems
    pub prefix: Option<Prefix>,
}

impl VariantNotation {
    /// Assemble and validate a variant record
    ///
    /// Rejects a second breakpoint on range-incompatible types, insertions
    /// without a range (unless exon-level), truncations on types that do not
    /// carry one, and untemplated sizes that contradict the literal
    /// sequence. Breakpoint representations are computed here, which also
    /// rejects ranges mixing two coordinate prefixes.
    pub fn new(template: VariantTemplate) -> Result<Self, NotationError> {
        let VariantTemplate {
            variant_type,
            reference1,
            reference2,
            break1_start,
            break1_end,
            break2_start,
            break2_end,
            ref_seq,
            untemplated_seq,
            untemplated_seq_size,
            truncation,
            multi_feature,
            no_features,
        } = template;

        if break2_start.is_some() && rejects_second_breakpoint(variant_type) {
            return Err(ParsingError::new(format!(
                "{} variants do not support a second breakpoint",
                variant_type
            ))
            .with_violated_attr(ViolatedAttr::Break2)
            .into());
        }

        if variant_type == VariantType::Insertion
            && break2_start.is_none()
            && !break1_start.is_exonic()
        {
            return Err(InputValidationError::new(
                "insertion variants must be specified with a range",
            )
            .with_violated_attr(ViolatedAttr::Break2)
            .into());
        }

        if truncation.is_some() && !accepts_truncation(variant_type) {
            return Err(InputValidationError::new(format!(
                "truncation may not be specified for {} variants",
                variant_type
            ))
            .with_violated_attr(ViolatedAttr::Truncation)
            .into());
        }

        // Sequences are always upper-cased on construction; the synonymous
        // marker `=` is kept verbatim
        let ref_seq = ref_seq.map(|s| s.to_uppercase());
        let untemplated_seq = untemplated_seq.map(|s| {
            if s == "=" {
                s
            } else {
                s.to_uppercase()
            }
        });

        let untemplated_seq_size = match (&untemplated_seq, untemplated_seq_size) {
            (Some(seq), Some(size)) if seq != "=" && !seq.contains('?') => {
                if seq.chars().count() as u64 != size {
                    return Err(InputValidationError::new(format!(
                        "untemplatedSeqSize ({}) does not match the length of the untemplated sequence ({})",
                        size,
                        seq.chars().count()
                    ))
                    .with_violated_attr(ViolatedAttr::UntemplatedSeq)
                    .into());
                }
                Some(size)
            }
            (Some(seq), None) if seq != "=" && !seq.contains('?') => {
                Some(seq.chars().count() as u64)
            }
            (_, size) => size,
        };

        let break1_repr = create_break_repr(&break1_start, break1_end.as_ref(), multi_feature)?;
        let break2_repr = match &break2_start {
            Some(start) => Some(create_break_repr(start, break2_end.as_ref(), multi_feature)?),
            None => None,
        };

        // Heterogeneous multi-feature variants keep both positions but drop
        // the shared prefix tag
        let prefix = match (&break2_start, multi_feature) {
            (Some(break2), true) if break2.prefix() != break1_start.prefix() => None,
            _ => Some(break1_start.prefix()),
        };

        Ok(Self {
            variant_type,
            reference1,
            reference2,
            break1_start,
            break1_end,
            break2_start,
            break2_end,
            break1_repr,
            break2_repr,
            ref_seq,
            untemplated_seq,
            untemplated_seq_size,
            truncation,
            multi_feature,
            no_features,
            prefix,
        })
    }

    /// Short notation token used when serializing this variant
    pub fn notation_type(&self) -> &'static str {
        self.variant_type.notation()
    }

    fn render_alt(&self) -> String {
        if let Some(seq) = &self.untemplated_seq {
            seq.clone()
        } else if let Some(size) = self.untemplated_seq_size {
            size.to_string()
        } else {
            String::new()
        }
    }

    fn render(&self, new_fusion_style: bool) -> String {
        if self.reference2.is_some() || self.multi_feature {
            return self.render_multi_feature(new_fusion_style);
        }
        self.render_continuous()
    }

    fn render_multi_feature(&self, new_fusion_style: bool) -> String {
        let reference1 = self
            .reference1
            .as_ref()
            .map(Reference::display_name)
            .unwrap_or_default();
        let reference2 = self
            .reference2
            .as_ref()
            .map(Reference::display_name)
            .unwrap_or_default();
        let alt = self.render_alt();
        let break2_repr = self.break2_repr.as_deref().unwrap_or_default();

        if new_fusion_style {
            let mut result = format!("{}:{}", reference1, self.break1_repr);
            result.push_str("::");
            if !alt.is_empty() {
                result.push_str(&alt);
                result.push_str("::");
            }
            result.push_str(&format!("{}:{}", reference2, break2_repr));
            return result;
        }

        let mut result = String::new();
        if !(self.no_features || (reference1.is_empty() && reference2.is_empty())) {
            result.push_str(&format!("({},{}):", reference1, reference2));
        }
        // Multi-feature notation never parenthesizes a single breakpoint,
        // even when the position itself is an uncertain range
        let break1 = self.break1_repr.replace(['(', ')'], "");
        let break2 = break2_repr.replace(['(', ')'], "");
        result.push_str(&format!(
            "{}({},{}){}",
            self.notation_type(),
            break1,
            break2,
            alt
        ));
        result
    }

    fn render_continuous(&self) -> String {
        let mut result = String::new();
        if !self.no_features {
            if let Some(reference1) = &self.reference1 {
                let display = reference1.display_name();
                if !display.is_empty() {
                    result.push_str(&display);
                    result.push(':');
                }
            }
        }
        result.push_str(&self.break1_repr);
        if let Some(break2_repr) = &self.break2_repr {
            result.push('_');
            // The prefix of the second breakpoint is implied by the first
            result.push_str(&break2_repr[2..]);
        }
        match self.notation_type() {
            ">" => {
                if matches!(self.break1_start, Position::Protein(_)) {
                    // Protein substitutions embed ref and alt around the
                    // position with no operator; the ref is already part of
                    // the breakpoint representation
                    result.push_str(self.untemplated_seq.as_deref().unwrap_or("?"));
                } else {
                    result.push_str(self.ref_seq.as_deref().unwrap_or("?"));
                    result.push('>');
                    result.push_str(self.untemplated_seq.as_deref().unwrap_or("?"));
                }
            }
            op @ ("fs" | "ext") => {
                if let Some(seq) = &self.untemplated_seq {
                    result.push_str(seq);
                }
                result.push_str(op);
                if let Some(truncation) = self.truncation {
                    result.push('*');
                    match truncation {
                        Truncation::At(n) => result.push_str(&n.to_string()),
                        Truncation::Unknown => result.push('?'),
                    }
                }
            }
            op @ ("del" | "dup" | "inv") => {
                result.push_str(op);
                if let Some(seq) = &self.ref_seq {
                    result.push_str(seq);
                }
            }
            op @ ("ins" | "delins") => {
                result.push_str(op);
                result.push_str(&self.render_alt());
            }
            token => result.push_str(token),
        }
        result
    }

    /// Project this variant to a plain JSON-safe record
    ///
    /// Internal bookkeeping fields (`prefix`, `multiFeature`, `noFeatures`,
    /// `notationType`) are stripped; positions are projected via
    /// [`Position::to_json`]; references resolve to their display strings.
    pub fn to_json(&self) -> Value {
        let mut record = json!({
            "type": self.variant_type.name(),
            "break1Start": self.break1_start.to_json(),
            "break1Repr": self.break1_repr,
        });
        let fields = record.as_object_mut().expect("object literal");
        if let Some(reference1) = &self.reference1 {
            fields.insert("reference1".to_string(), json!(reference1.display_name()));
        }
        if let Some(reference2) = &self.reference2 {
            fields.insert("reference2".to_string(), json!(reference2.display_name()));
        }
        if let Some(position) = &self.break1_end {
            fields.insert("break1End".to_string(), position.to_json());
        }
        if let Some(position) = &self.break2_start {
            fields.insert("break2Start".to_string(), position.to_json());
        }
        if let Some(position) = &self.break2_end {
            fields.insert("break2End".to_string(), position.to_json());
        }
        if let Some(break2_repr) = &self.break2_repr {
            fields.insert("break2Repr".to_string(), json!(break2_repr));
        }
        if let Some(ref_seq) = &self.ref_seq {
            fields.insert("refSeq".to_string(), json!(ref_seq));
        }
        if let Some(untemplated_seq) = &self.untemplated_seq {
            fields.insert("untemplatedSeq".to_string(), json!(untemplated_seq));
        }
        if let Some(size) = self.untemplated_seq_size {
            fields.insert("untemplatedSeqSize".to_string(), json!(size));
        }
        if let Some(truncation) = self.truncation {
            fields.insert("truncation".to_string(), truncation.to_json());
        }
        record
    }
}

impl fmt::Display for VariantNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

/// Render the canonical notation text for a variant
///
/// The legacy parenthesized form is used for multi-feature variants unless
/// `new_fusion_style` requests the `::` form.
pub fn stringify_variant(variant: &VariantNotation, new_fusion_style: bool) -> String {
    variant.render(new_fusion_style)
}

/// Project a variant to a plain JSON-safe record
pub fn jsonify_variant(variant: &VariantNotation) -> Value {
    variant.to_json()
}
