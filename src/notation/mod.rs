//! Variant notation types and parser
//!
//! This module contains the data model for shorthand variant notation (the
//! position model, reference features, the variant record) and the
//! recursive-descent parser plus the exact round-trip serializer.

pub mod aa;
pub mod parser;
pub mod position;
pub mod reference;
pub mod types;
pub mod variant;

// Re-export commonly used items
pub use aa::{convert_3to1, three_to_one, AA_CODES};
pub use parser::{parse_position, parse_variant};
pub use position::{
    create_break_repr, create_position, Arm, Band, BasicPosition, CdsLikePosition,
    CytobandPosition, Offset, Position, PositionFields, Prefix, ProteinPosition,
};
pub use reference::{OntologyTerm, Reference};
pub use types::{variant_type_for_token, VariantType, NOTATION_TO_TYPE};
pub use variant::{
    jsonify_variant, stringify_variant, Truncation, VariantNotation, VariantTemplate,
};
