// Copyright (c) 2025 the varnom developers
// SPDX-License-Identifier: MIT

//! varnom: parser and serializer for shorthand variant notation
//!
//! Parses compact HGVS-like strings describing sequence variants into
//! structured records, and serializes those records back to canonical text.
//! Eight coordinate systems are supported (genomic, exonic, intronic, coding,
//! non-coding, RNA, protein and cytoband), each with its own position syntax
//! and validity rules, alongside single-feature continuous notation,
//! legacy parenthesized multi-feature notation, and new-style `::` fusions.
//!
//! Parsing is purely syntactic: variants are checked for structural
//! consistency, never against real biological sequences.
//!
//! # Example
//!
//! ```
//! use varnom::{jsonify_variant, parse_variant, stringify_variant};
//!
//! let variant = parse_variant("KRAS:p.G12D", true).unwrap();
//! assert_eq!(variant.variant_type.name(), "missense mutation");
//!
//! // Exact round trip back to the input text
//! assert_eq!(stringify_variant(&variant, false), "KRAS:p.G12D");
//!
//! // JSON-safe projection
//! let record = jsonify_variant(&variant);
//! assert_eq!(record["break1Start"]["refAA"], "G");
//! ```

pub mod error;
pub mod notation;

// Re-export the public surface
pub use error::{InputValidationError, NotationError, ParsingError, ViolatedAttr};
pub use notation::aa::{convert_3to1, three_to_one, AA_CODES};
pub use notation::parser::{parse_position, parse_variant};
pub use notation::position::{
    create_break_repr, create_position, Arm, Band, BasicPosition, CdsLikePosition,
    CytobandPosition, Offset, Position, PositionFields, Prefix, ProteinPosition,
};
pub use notation::reference::{OntologyTerm, Reference};
pub use notation::types::{variant_type_for_token, VariantType, NOTATION_TO_TYPE};
pub use notation::variant::{
    jsonify_variant, stringify_variant, Truncation, VariantNotation, VariantTemplate,
};

/// Result type alias for varnom operations
pub type Result<T> = std::result::Result<T, NotationError>;
