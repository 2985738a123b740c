//! Variant type vocabulary
//!
//! Static mapping between short notation tokens (`del`, `ins`, `fs`, `>`, ...)
//! and the long-form event names (`deletion`, `frameshift`, `substitution`,
//! ...). The forward direction ([`VariantType::notation`]) is a total
//! function; the reverse lookup table is built once at startup by inverting
//! it and layering the legacy alias tokens.
//!
//! Several long-form names deliberately collapse onto the same token (a
//! missense mutation serializes with the substitution operator `>`, a
//! truncating frameshift with `fs`), but each accepted token resolves to
//! exactly one canonical long-form name on input.

use crate::error::InputValidationError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Long-form variant event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantType {
    Substitution,
    MissenseMutation,
    NonsenseMutation,
    Deletion,
    Insertion,
    Duplication,
    Inversion,
    Indel,
    Frameshift,
    TruncatingFrameshiftMutation,
    Extension,
    SpliceSite,
    Fusion,
    Translocation,
    InvertedTranslocation,
    CopyGain,
    CopyLoss,
}

impl VariantType {
    /// All variant types, canonical names first
    ///
    /// Ordering matters: when several types share a notation token, the type
    /// listed first wins the reverse lookup (so `>` resolves to substitution,
    /// not missense mutation, and `fs` to frameshift).
    pub const ALL: [VariantType; 17] = [
        VariantType::Substitution,
        VariantType::MissenseMutation,
        VariantType::NonsenseMutation,
        VariantType::Deletion,
        VariantType::Insertion,
        VariantType::Duplication,
        VariantType::Inversion,
        VariantType::Indel,
        VariantType::Frameshift,
        VariantType::TruncatingFrameshiftMutation,
        VariantType::Extension,
        VariantType::SpliceSite,
        VariantType::Fusion,
        VariantType::Translocation,
        VariantType::InvertedTranslocation,
        VariantType::CopyGain,
        VariantType::CopyLoss,
    ];

    /// Long-form name of this event type
    pub fn name(self) -> &'static str {
        match self {
            VariantType::Substitution => "substitution",
            VariantType::MissenseMutation => "missense mutation",
            VariantType::NonsenseMutation => "nonsense mutation",
            VariantType::Deletion => "deletion",
            VariantType::Insertion => "insertion",
            VariantType::Duplication => "duplication",
            VariantType::Inversion => "inversion",
            VariantType::Indel => "indel",
            VariantType::Frameshift => "frameshift",
            VariantType::TruncatingFrameshiftMutation => "truncating frameshift mutation",
            VariantType::Extension => "extension",
            VariantType::SpliceSite => "splice-site",
            VariantType::Fusion => "fusion",
            VariantType::Translocation => "translocation",
            VariantType::InvertedTranslocation => "inverted translocation",
            VariantType::CopyGain => "copy gain",
            VariantType::CopyLoss => "copy loss",
        }
    }

    /// Short notation token used when serializing this event type
    pub fn notation(self) -> &'static str {
        match self {
            VariantType::Substitution
            | VariantType::MissenseMutation
            | VariantType::NonsenseMutation => ">",
            VariantType::Deletion => "del",
            VariantType::Insertion => "ins",
            VariantType::Duplication => "dup",
            VariantType::Inversion => "inv",
            VariantType::Indel => "delins",
            VariantType::Frameshift | VariantType::TruncatingFrameshiftMutation => "fs",
            VariantType::Extension => "ext",
            VariantType::SpliceSite => "spl",
            VariantType::Fusion => "fusion",
            VariantType::Translocation => "trans",
            VariantType::InvertedTranslocation => "itrans",
            VariantType::CopyGain => "copygain",
            VariantType::CopyLoss => "copyloss",
        }
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for VariantType {
    type Err = InputValidationError;

    /// Parse a long-form event name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantType::ALL
            .iter()
            .find(|vt| vt.name() == s)
            .copied()
            .ok_or_else(|| {
                InputValidationError::new(format!("invalid variant type: {}", s)).with_input(s)
            })
    }
}

/// Legacy alias tokens accepted on input only
///
/// These normalize to their canonical token on re-serialization.
const NOTATION_ALIASES: [(&str, VariantType); 3] = [
    ("mis", VariantType::MissenseMutation),
    ("gain", VariantType::CopyGain),
    ("loss", VariantType::CopyLoss),
];

/// Reverse lookup: accepted notation token to canonical long-form type
///
/// Built once by inverting [`VariantType::notation`] over all types in
/// canonical-first order, then merging the alias entries.
pub static NOTATION_TO_TYPE: Lazy<HashMap<&'static str, VariantType>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for vt in VariantType::ALL {
        table.entry(vt.notation()).or_insert(vt);
    }
    for (token, vt) in NOTATION_ALIASES {
        table.insert(token, vt);
    }
    table
});

/// Resolve an accepted notation token (already lowercased) to its type
pub fn variant_type_for_token(token: &str) -> Option<VariantType> {
    NOTATION_TO_TYPE.get(token).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_reverse_lookup() {
        assert_eq!(variant_type_for_token(">"), Some(VariantType::Substitution));
        assert_eq!(variant_type_for_token("fs"), Some(VariantType::Frameshift));
        assert_eq!(variant_type_for_token("del"), Some(VariantType::Deletion));
        assert_eq!(
            variant_type_for_token("delins"),
            Some(VariantType::Indel)
        );
        assert_eq!(
            variant_type_for_token("copygain"),
            Some(VariantType::CopyGain)
        );
        assert_eq!(variant_type_for_token("bogus"), None);
    }

    #[test]
    fn test_alias_tokens() {
        assert_eq!(
            variant_type_for_token("mis"),
            Some(VariantType::MissenseMutation)
        );
        assert_eq!(variant_type_for_token("gain"), Some(VariantType::CopyGain));
        assert_eq!(variant_type_for_token("loss"), Some(VariantType::CopyLoss));
    }

    #[test]
    fn test_collapsed_types_share_notation() {
        assert_eq!(VariantType::MissenseMutation.notation(), ">");
        assert_eq!(VariantType::NonsenseMutation.notation(), ">");
        assert_eq!(VariantType::TruncatingFrameshiftMutation.notation(), "fs");
    }

    #[test]
    fn test_round_trip_through_notation() {
        // Every type serializes to a token that resolves back to a type with
        // the same token (canonical collapse is allowed, token drift is not).
        for vt in VariantType::ALL {
            let token = vt.notation();
            let resolved = variant_type_for_token(token).unwrap();
            assert_eq!(resolved.notation(), token, "token drift for {}", vt);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "deletion".parse::<VariantType>().unwrap(),
            VariantType::Deletion
        );
        assert_eq!(
            "truncating frameshift mutation".parse::<VariantType>().unwrap(),
            VariantType::TruncatingFrameshiftMutation
        );
        let err = "no such type".parse::<VariantType>().unwrap_err();
        assert!(err.message.contains("invalid variant type"));
    }

    #[test]
    fn test_display_is_long_form() {
        assert_eq!(VariantType::CopyGain.to_string(), "copy gain");
        assert_eq!(VariantType::SpliceSite.to_string(), "splice-site");
    }
}
