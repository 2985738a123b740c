//! Position types for the supported coordinate systems
//!
//! Each coordinate system has its own prefix, token syntax, and validation
//! rules:
//!
//! - Genomic (g.), exonic (e.), intronic (i.): bare 1-based positions
//! - CDS (c.), non-coding (n.), RNA (r.): 1-based positions with an optional
//!   offset relative to the nearest boundary (e.g. `c.100+5`)
//! - Protein (p.): 1-based positions with a reference amino acid (`p.R10`)
//! - Cytoband (y.): chromosome arm with optional major/minor band (`y.p11.1`)
//!
//! Any numeric field may be written as `?` for "explicitly unknown". For
//! cytoband bands there is a further distinction between a band that was
//! never written (omitted from serialization) and a band explicitly written
//! as `?` (serialized back as `?`); [`Band`] inside an `Option` encodes that
//! three-way state directly.

use crate::error::{InputValidationError, ParsingError};
use crate::notation::aa::is_reference_aa;
use serde_json::{json, Value};
use std::fmt;

/// Coordinate system selector
///
/// Each prefix letter maps 1:1 to one of the [`Position`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `g.` genomic
    Genomic,
    /// `e.` exonic
    Exonic,
    /// `i.` intronic
    Intronic,
    /// `c.` coding sequence
    Cds,
    /// `n.` non-coding
    NonCoding,
    /// `r.` RNA
    Rna,
    /// `p.` protein
    Protein,
    /// `y.` cytoband
    Cytoband,
}

impl Prefix {
    pub const ALL: [Prefix; 8] = [
        Prefix::Genomic,
        Prefix::Exonic,
        Prefix::Intronic,
        Prefix::Cds,
        Prefix::NonCoding,
        Prefix::Rna,
        Prefix::Protein,
        Prefix::Cytoband,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'g' => Some(Prefix::Genomic),
            'e' => Some(Prefix::Exonic),
            'i' => Some(Prefix::Intronic),
            'c' => Some(Prefix::Cds),
            'n' => Some(Prefix::NonCoding),
            'r' => Some(Prefix::Rna),
            'p' => Some(Prefix::Protein),
            'y' => Some(Prefix::Cytoband),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Prefix::Genomic => 'g',
            Prefix::Exonic => 'e',
            Prefix::Intronic => 'i',
            Prefix::Cds => 'c',
            Prefix::NonCoding => 'n',
            Prefix::Rna => 'r',
            Prefix::Protein => 'p',
            Prefix::Cytoband => 'y',
        }
    }

    /// Class tag of the position kind this prefix produces (the `@class`
    /// value used in the JSON projection)
    pub fn position_class(self) -> &'static str {
        match self {
            Prefix::Genomic => "GenomicPosition",
            Prefix::Exonic => "ExonicPosition",
            Prefix::Intronic => "IntronicPosition",
            Prefix::Cds => "CdsPosition",
            Prefix::NonCoding => "NonCdsPosition",
            Prefix::Rna => "RnaPosition",
            Prefix::Protein => "ProteinPosition",
            Prefix::Cytoband => "CytobandPosition",
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Offset from a boundary position in CDS-like coordinates
///
/// Unknown offsets keep their sign so that `c.100+?` and `c.100-?` remain
/// distinguishable and round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Offset {
    /// Concrete offset, e.g. `+5` or `-124`
    Value(i64),
    /// `+?`
    PlusUnknown,
    /// `-?`
    MinusUnknown,
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Zero offsets are treated as "no offset" and render as nothing
            Offset::Value(0) => Ok(()),
            Offset::Value(n) if *n > 0 => write!(f, "+{}", n),
            Offset::Value(n) => write!(f, "{}", n),
            Offset::PlusUnknown => write!(f, "+?"),
            Offset::MinusUnknown => write!(f, "-?"),
        }
    }
}

/// A cytoband band value: a concrete number or the explicit `?` marker
///
/// A band that was never written at all is represented as `None` at the
/// position level and is omitted entirely from serialization, whereas
/// `Some(Band::Unknown)` serializes as a literal `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Unknown,
    Value(u32),
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Unknown => write!(f, "?"),
            Band::Value(n) => write!(f, "{}", n),
        }
    }
}

/// Chromosome arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    P,
    Q,
}

impl Arm {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Arm::P),
            'q' => Some(Arm::Q),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Arm::P => 'p',
            Arm::Q => 'q',
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Bare 1-based position (genomic, exonic, intronic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BasicPosition {
    /// 1-based position; `None` means explicitly unknown (`?`)
    pub pos: Option<u64>,
}

impl fmt::Display for BasicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "?"),
        }
    }
}

/// Position with an optional boundary offset (CDS, non-coding, RNA)
///
/// When the notation gives only an offset (e.g. `c.-124`), the position
/// defaults to 1 at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CdsLikePosition {
    /// 1-based position; `None` means explicitly unknown (`?`)
    pub pos: Option<u64>,
    /// Offset relative to the nearest boundary (intron/exon junction)
    pub offset: Option<Offset>,
}

impl fmt::Display for CdsLikePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(n) => write!(f, "{}", n)?,
            None => write!(f, "?")?,
        }
        if let Some(offset) = self.offset {
            write!(f, "{}", offset)?;
        }
        Ok(())
    }
}

/// Protein position with its reference amino acid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProteinPosition {
    /// 1-based position; `None` means explicitly unknown (`?`)
    pub pos: Option<u64>,
    /// Normalized 1-letter reference amino acid; `None` means unknown (`?`)
    pub ref_aa: Option<char>,
    /// Original 3-letter spelling when the input used one
    ///
    /// Retained so that sequences of the same variant written in 3-letter
    /// form can be bulk-converted to 1-letter form after parsing.
    pub long_ref_aa: Option<String>,
}

impl fmt::Display for ProteinPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ref_aa {
            Some(aa) => write!(f, "{}", aa)?,
            None => write!(f, "?")?,
        }
        match self.pos {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "?"),
        }
    }
}

/// Cytoband position: arm plus optional major and minor band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CytobandPosition {
    pub arm: Arm,
    /// `None` = never written; `Some(Band::Unknown)` = written as `?`
    pub major_band: Option<Band>,
    /// Only serialized when the major band is also present
    pub minor_band: Option<Band>,
}

impl fmt::Display for CytobandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arm)?;
        if let Some(major) = self.major_band {
            write!(f, "{}", major)?;
            if let Some(minor) = self.minor_band {
                write!(f, ".{}", minor)?;
            }
        }
        Ok(())
    }
}

/// A position in one of the supported coordinate systems
///
/// The enum variant itself carries the coordinate prefix that produced the
/// position; mixing prefixes within one breakpoint range is rejected by
/// [`create_break_repr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    Genomic(BasicPosition),
    Exonic(BasicPosition),
    Intronic(BasicPosition),
    Cds(CdsLikePosition),
    NonCoding(CdsLikePosition),
    Rna(CdsLikePosition),
    Protein(ProteinPosition),
    Cytoband(CytobandPosition),
}

impl Position {
    /// The coordinate prefix this position belongs to
    pub fn prefix(&self) -> Prefix {
        match self {
            Position::Genomic(_) => Prefix::Genomic,
            Position::Exonic(_) => Prefix::Exonic,
            Position::Intronic(_) => Prefix::Intronic,
            Position::Cds(_) => Prefix::Cds,
            Position::NonCoding(_) => Prefix::NonCoding,
            Position::Rna(_) => Prefix::Rna,
            Position::Protein(_) => Prefix::Protein,
            Position::Cytoband(_) => Prefix::Cytoband,
        }
    }

    pub fn is_exonic(&self) -> bool {
        matches!(self, Position::Exonic(_))
    }

    pub fn as_protein(&self) -> Option<&ProteinPosition> {
        match self {
            Position::Protein(p) => Some(p),
            _ => None,
        }
    }

    /// JSON class tag used by [`Position::to_json`]
    pub fn class_name(&self) -> &'static str {
        self.prefix().position_class()
    }

    /// Project this position to a plain JSON record
    ///
    /// The record carries an `@class` tag plus the public fields of the
    /// position. Explicitly-unknown fields serialize as `null`; fields that
    /// were never written are omitted. The prefix and the original 3-letter
    /// amino acid spelling are internal bookkeeping and excluded.
    pub fn to_json(&self) -> Value {
        let mut record = json!({ "@class": self.class_name() });
        let fields = record.as_object_mut().expect("object literal");
        match self {
            Position::Genomic(p) | Position::Exonic(p) | Position::Intronic(p) => {
                fields.insert("pos".to_string(), json_u64(p.pos));
            }
            Position::Cds(p) | Position::NonCoding(p) | Position::Rna(p) => {
                fields.insert("pos".to_string(), json_u64(p.pos));
                if let Some(offset) = p.offset {
                    let value = match offset {
                        Offset::Value(n) => json!(n),
                        Offset::PlusUnknown | Offset::MinusUnknown => Value::Null,
                    };
                    fields.insert("offset".to_string(), value);
                }
            }
            Position::Protein(p) => {
                fields.insert("pos".to_string(), json_u64(p.pos));
                let ref_aa = match p.ref_aa {
                    Some(aa) => json!(aa.to_string()),
                    None => Value::Null,
                };
                fields.insert("refAA".to_string(), ref_aa);
            }
            Position::Cytoband(p) => {
                fields.insert("arm".to_string(), json!(p.arm.to_string()));
                if let Some(major) = p.major_band {
                    fields.insert("majorBand".to_string(), json_band(major));
                }
                if let Some(minor) = p.minor_band {
                    fields.insert("minorBand".to_string(), json_band(minor));
                }
            }
        }
        record
    }
}

fn json_u64(value: Option<u64>) -> Value {
    match value {
        Some(n) => json!(n),
        None => Value::Null,
    }
}

fn json_band(band: Band) -> Value {
    match band {
        Band::Value(n) => json!(n),
        Band::Unknown => Value::Null,
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Genomic(p) | Position::Exonic(p) | Position::Intronic(p) => {
                write!(f, "{}", p)
            }
            Position::Cds(p) | Position::NonCoding(p) | Position::Rna(p) => write!(f, "{}", p),
            Position::Protein(p) => write!(f, "{}", p),
            Position::Cytoband(p) => write!(f, "{}", p),
        }
    }
}

/// Raw field values for [`create_position`]
///
/// Only the fields relevant to the requested prefix are consulted; the rest
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionFields {
    /// 1-based position; `None` means explicitly unknown
    pub pos: Option<u64>,
    /// Boundary offset (c/n/r prefixes)
    pub offset: Option<Offset>,
    /// Reference amino acid (p prefix); `None` means unknown
    pub ref_aa: Option<char>,
    /// Original 3-letter amino acid spelling, if the input used one
    pub long_ref_aa: Option<String>,
    /// Chromosome arm (y prefix); required there
    pub arm: Option<char>,
    /// Major band (y prefix)
    pub major_band: Option<Band>,
    /// Minor band (y prefix)
    pub minor_band: Option<Band>,
}

/// Build a validated [`Position`] for the given prefix from raw field values
///
/// Rejects non-positive positions and bands, invalid arm letters, and
/// invalid reference amino acids with [`InputValidationError`].
pub fn create_position(
    prefix: Prefix,
    fields: PositionFields,
) -> Result<Position, InputValidationError> {
    let pos = check_positive(fields.pos, "position")?;
    match prefix {
        Prefix::Genomic => Ok(Position::Genomic(BasicPosition { pos })),
        Prefix::Exonic => Ok(Position::Exonic(BasicPosition { pos })),
        Prefix::Intronic => Ok(Position::Intronic(BasicPosition { pos })),
        Prefix::Cds => Ok(Position::Cds(CdsLikePosition {
            pos,
            offset: fields.offset,
        })),
        Prefix::NonCoding => Ok(Position::NonCoding(CdsLikePosition {
            pos,
            offset: fields.offset,
        })),
        Prefix::Rna => Ok(Position::Rna(CdsLikePosition {
            pos,
            offset: fields.offset,
        })),
        Prefix::Protein => {
            let ref_aa = match fields.ref_aa {
                Some(c) => {
                    let upper = c.to_ascii_uppercase();
                    if !is_reference_aa(upper) {
                        return Err(InputValidationError::new(format!(
                            "'{}' is not a valid reference amino acid",
                            c
                        )));
                    }
                    Some(upper)
                }
                None => None,
            };
            Ok(Position::Protein(ProteinPosition {
                pos,
                ref_aa,
                long_ref_aa: fields.long_ref_aa,
            }))
        }
        Prefix::Cytoband => {
            let arm_char = fields.arm.ok_or_else(|| {
                InputValidationError::new("cytoband positions require a chromosome arm")
            })?;
            let arm = Arm::from_char(arm_char).ok_or_else(|| {
                InputValidationError::new(format!(
                    "'{}' is not a valid chromosome arm (expected p or q)",
                    arm_char
                ))
            })?;
            Ok(Position::Cytoband(CytobandPosition {
                arm,
                major_band: check_positive_band(fields.major_band, "major band")?,
                minor_band: check_positive_band(fields.minor_band, "minor band")?,
            }))
        }
    }
}

fn check_positive(value: Option<u64>, what: &str) -> Result<Option<u64>, InputValidationError> {
    match value {
        Some(0) => Err(InputValidationError::new(format!(
            "{} must be a positive integer",
            what
        ))),
        other => Ok(other),
    }
}

fn check_positive_band(
    value: Option<Band>,
    what: &str,
) -> Result<Option<Band>, InputValidationError> {
    match value {
        Some(Band::Value(0)) => Err(InputValidationError::new(format!(
            "{} must be a positive integer",
            what
        ))),
        other => Ok(other),
    }
}

/// Render the canonical string for a breakpoint or breakpoint range
///
/// A single position renders as `prefix.pos`. An uncertain range renders as
/// `prefix.(start_end)` in continuous notation, or bare `prefix.start_end`
/// when `multi_feature` is set (multi-feature notation never parenthesizes a
/// breakpoint). Mismatched prefixes between the two positions are rejected.
pub fn create_break_repr(
    start: &Position,
    end: Option<&Position>,
    multi_feature: bool,
) -> Result<String, ParsingError> {
    let prefix = start.prefix();
    match end {
        None => Ok(format!("{}.{}", prefix.to_char(), start)),
        Some(end) => {
            if end.prefix() != prefix {
                return Err(ParsingError::new(format!(
                    "mismatched prefixes in breakpoint range: {} vs {}",
                    prefix.to_char(),
                    end.prefix().to_char()
                )));
            }
            if multi_feature {
                Ok(format!("{}.{}_{}", prefix.to_char(), start, end))
            } else {
                Ok(format!("{}.({}_{})", prefix.to_char(), start, end))
            }
        }
    }
}
