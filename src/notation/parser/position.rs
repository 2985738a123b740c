//! Position token parsing
//!
//! Prefix-specific token parsers used by the continuous and multi-feature
//! grammars. Each parser consumes as much of the input as the token syntax
//! allows and leaves the rest (typically the operator tail) untouched;
//! [`parse_position`] additionally requires the whole token to be consumed.
//!
//! The parsers are purely lexical: zero positions, invalid arms and invalid
//! amino acids pass the token stage and are rejected during position
//! construction, so that callers can distinguish "did not match the pattern"
//! from "matched but structurally invalid".

use crate::error::{NotationError, ParsingError};
use crate::notation::aa::three_to_one;
use crate::notation::position::{create_position, Band, Offset, Position, PositionFields, Prefix};
use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::opt,
    IResult, Parser,
};

fn nom_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify))
}

/// Parse a 1-based coordinate: digits, or `?` for explicitly unknown
fn coordinate(input: &str) -> IResult<&str, Option<u64>> {
    if let Some(rest) = input.strip_prefix('?') {
        return Ok((rest, None));
    }
    let (rest, s) = digit1.parse(input)?;
    let value: u64 = s.parse().map_err(|_| nom_error(input))?;
    Ok((rest, Some(value)))
}

/// Parse a signed boundary offset: `+N`, `-N`, `+?`, or `-?`
fn offset_token(input: &str) -> IResult<&str, Offset> {
    let (rest, sign) = alt((char('+'), char('-'))).parse(input)?;
    if let Some(rest) = rest.strip_prefix('?') {
        let offset = if sign == '+' {
            Offset::PlusUnknown
        } else {
            Offset::MinusUnknown
        };
        return Ok((rest, offset));
    }
    let (rest, s) = digit1.parse(rest)?;
    let value: i64 = s.parse().map_err(|_| nom_error(input))?;
    let value = if sign == '-' { -value } else { value };
    Ok((rest, Offset::Value(value)))
}

/// Parse a cytoband band value: digits, or `?` for explicitly unknown
fn band_token(input: &str) -> IResult<&str, Band> {
    if let Some(rest) = input.strip_prefix('?') {
        return Ok((rest, Band::Unknown));
    }
    let (rest, s) = digit1.parse(input)?;
    let value: u32 = s.parse().map_err(|_| nom_error(input))?;
    Ok((rest, Band::Value(value)))
}

/// Parse a reference amino acid token: `?`, a 3-letter code, or a 1-letter code
///
/// Returns the (not yet validated) letter plus the original 3-letter spelling
/// when one was used. Tries the 3-letter form first so that `Val600` parses
/// as Val, not V followed by a stray `al`.
fn aa_token(input: &str) -> IResult<&str, (Option<char>, Option<String>)> {
    if let Some(rest) = input.strip_prefix('?') {
        return Ok((rest, (None, None)));
    }
    let bytes = input.as_bytes();
    if bytes.len() >= 3 && bytes[..3].iter().all(|b| b.is_ascii_alphabetic()) {
        let code = &input[..3];
        if let Some(single) = three_to_one(code) {
            return Ok((&input[3..], (Some(single), Some(code.to_string()))));
        }
    }
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'*' => {
            Ok((&input[1..], (Some(*b as char), None)))
        }
        _ => Err(nom_error(input)),
    }
}

/// Parse the raw fields of a position token for the given prefix
///
/// Leaves any unconsumed input (the operator tail) in place.
pub(crate) fn position_fields(prefix: Prefix, input: &str) -> IResult<&str, PositionFields> {
    match prefix {
        Prefix::Genomic | Prefix::Exonic | Prefix::Intronic => {
            let (rest, pos) = coordinate(input)?;
            Ok((
                rest,
                PositionFields {
                    pos,
                    ..Default::default()
                },
            ))
        }
        Prefix::Cds | Prefix::NonCoding | Prefix::Rna => {
            let (rest, pos) = opt(coordinate).parse(input)?;
            let (rest, offset) = opt(offset_token).parse(rest)?;
            let pos = match (pos, offset) {
                // Neither a position nor an offset is not a position token
                (None, None) => return Err(nom_error(input)),
                // Offset-only notation defaults the position to 1
                (None, Some(_)) => Some(1),
                (Some(pos), _) => pos,
            };
            Ok((
                rest,
                PositionFields {
                    pos,
                    offset,
                    ..Default::default()
                },
            ))
        }
        Prefix::Protein => {
            // Reference amino acid first, falling back to a bare coordinate
            // so that `?12` and `12` both parse
            if let Ok((rest, (ref_aa, long_ref_aa))) = aa_token(input) {
                if let Ok((rest, pos)) = coordinate(rest) {
                    return Ok((
                        rest,
                        PositionFields {
                            pos,
                            ref_aa,
                            long_ref_aa,
                            ..Default::default()
                        },
                    ));
                }
            }
            let (rest, pos) = coordinate(input)?;
            Ok((
                rest,
                PositionFields {
                    pos,
                    ..Default::default()
                },
            ))
        }
        Prefix::Cytoband => {
            let arm = match input.as_bytes().first() {
                Some(b) if b.is_ascii_alphabetic() => *b as char,
                _ => return Err(nom_error(input)),
            };
            let mut rest = &input[1..];
            let mut major_band = None;
            let mut minor_band = None;
            if let Ok((after_major, major)) = band_token(rest) {
                major_band = Some(major);
                rest = after_major;
                if let Some(after_dot) = rest.strip_prefix('.') {
                    if let Ok((after_minor, minor)) = band_token(after_dot) {
                        minor_band = Some(minor);
                        rest = after_minor;
                    }
                }
            }
            Ok((
                rest,
                PositionFields {
                    arm: Some(arm),
                    major_band,
                    minor_band,
                    ..Default::default()
                },
            ))
        }
    }
}

/// Parse a full position token for the given prefix
///
/// The entire token must be consumed. Pattern failures raise
/// [`ParsingError`]; structurally invalid values (zero positions, invalid
/// arms or amino acids) raise
/// [`InputValidationError`](crate::error::InputValidationError).
pub fn parse_position(prefix: Prefix, token: &str) -> Result<Position, NotationError> {
    let (rest, fields) = position_fields(prefix, token).map_err(|_| {
        ParsingError::new(format!(
            "'{}' does not match the expected pattern for the '{}' prefix",
            token, prefix
        ))
        .with_input(token)
    })?;
    if !rest.is_empty() {
        return Err(ParsingError::new(format!(
            "unexpected trailing characters '{}' in position '{}'",
            rest, token
        ))
        .with_input(token)
        .into());
    }
    Ok(create_position(prefix, fields)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::position::{Arm, CytobandPosition, ProteinPosition};

    #[test]
    fn test_parse_genomic_position() {
        let pos = parse_position(Prefix::Genomic, "12345").unwrap();
        assert_eq!(pos.to_string(), "12345");

        let pos = parse_position(Prefix::Genomic, "?").unwrap();
        assert_eq!(pos.to_string(), "?");
    }

    #[test]
    fn test_parse_genomic_rejects_zero() {
        let err = parse_position(Prefix::Genomic, "0").unwrap_err();
        assert!(err.is_input_validation());
    }

    #[test]
    fn test_parse_genomic_rejects_trailing() {
        let err = parse_position(Prefix::Genomic, "12del").unwrap_err();
        assert!(err.is_parsing());
    }

    #[test]
    fn test_parse_cds_position_with_offset() {
        let pos = parse_position(Prefix::Cds, "100+5").unwrap();
        assert_eq!(pos.to_string(), "100+5");

        let pos = parse_position(Prefix::Cds, "100-10").unwrap();
        assert_eq!(pos.to_string(), "100-10");

        let pos = parse_position(Prefix::Cds, "148-?").unwrap();
        assert_eq!(pos.to_string(), "148-?");
    }

    #[test]
    fn test_parse_cds_offset_only_defaults_position() {
        let pos = parse_position(Prefix::Cds, "-124").unwrap();
        assert_eq!(pos.to_string(), "1-124");
    }

    #[test]
    fn test_parse_protein_position() {
        let pos = parse_position(Prefix::Protein, "G12").unwrap();
        let protein = pos.as_protein().unwrap();
        assert_eq!(protein.ref_aa, Some('G'));
        assert_eq!(protein.pos, Some(12));
        assert_eq!(protein.long_ref_aa, None);
    }

    #[test]
    fn test_parse_protein_three_letter() {
        let pos = parse_position(Prefix::Protein, "Arg10").unwrap();
        assert_eq!(
            pos.as_protein().unwrap(),
            &ProteinPosition {
                pos: Some(10),
                ref_aa: Some('R'),
                long_ref_aa: Some("Arg".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_protein_unknowns() {
        let pos = parse_position(Prefix::Protein, "?12").unwrap();
        assert_eq!(pos.to_string(), "?12");

        let pos = parse_position(Prefix::Protein, "12").unwrap();
        assert_eq!(pos.to_string(), "?12");

        let pos = parse_position(Prefix::Protein, "??").unwrap();
        assert_eq!(pos.to_string(), "??");
    }

    #[test]
    fn test_parse_protein_rejects_invalid_aa() {
        let err = parse_position(Prefix::Protein, "B12").unwrap_err();
        assert!(err.is_input_validation());
    }

    #[test]
    fn test_parse_cytoband_position() {
        let pos = parse_position(Prefix::Cytoband, "p11.1").unwrap();
        match pos {
            Position::Cytoband(CytobandPosition {
                arm: Arm::P,
                major_band: Some(Band::Value(11)),
                minor_band: Some(Band::Value(1)),
            }) => {}
            other => panic!("unexpected position: {:?}", other),
        }
    }

    #[test]
    fn test_parse_cytoband_unknown_bands() {
        assert_eq!(parse_position(Prefix::Cytoband, "p").unwrap().to_string(), "p");
        assert_eq!(
            parse_position(Prefix::Cytoband, "p?").unwrap().to_string(),
            "p?"
        );
        assert_eq!(
            parse_position(Prefix::Cytoband, "p?.?").unwrap().to_string(),
            "p?.?"
        );
        assert_eq!(
            parse_position(Prefix::Cytoband, "q1.?").unwrap().to_string(),
            "q1.?"
        );
    }

    #[test]
    fn test_parse_cytoband_rejects_bad_arm() {
        let err = parse_position(Prefix::Cytoband, "x11").unwrap_err();
        assert!(err.is_input_validation());
    }

    #[test]
    fn test_parse_cytoband_minor_without_major() {
        // `p.1` leaves the `.1` unconsumed, which the full-token parser
        // rejects as trailing characters
        let err = parse_position(Prefix::Cytoband, "p.1").unwrap_err();
        assert!(err.is_parsing());
    }

    #[test]
    fn test_position_fields_leaves_tail() {
        let (rest, fields) = position_fields(Prefix::Genomic, "3del").unwrap();
        assert_eq!(rest, "del");
        assert_eq!(fields.pos, Some(3));

        let (rest, _) = position_fields(Prefix::Cds, "100+5C>T").unwrap();
        assert_eq!(rest, "C>T");

        let (rest, _) = position_fields(Prefix::Protein, "R10Kfs*10").unwrap();
        assert_eq!(rest, "Kfs*10");

        let (rest, _) = position_fields(Prefix::Cytoband, "p12.1ins").unwrap();
        assert_eq!(rest, "ins");
    }
}
