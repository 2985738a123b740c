//! Amino acid code tables
//!
//! Static mapping between 3-letter and 1-letter amino acid codes (the 20
//! standard residues plus the stop codon) and the conversion helpers used to
//! normalize protein notation to 1-letter form.

use crate::error::ParsingError;

/// 3-letter to 1-letter amino acid codes (lowercase keys)
pub const AA_CODES: [(&str, char); 21] = [
    ("ala", 'A'),
    ("arg", 'R'),
    ("asn", 'N'),
    ("asp", 'D'),
    ("cys", 'C'),
    ("gln", 'Q'),
    ("glu", 'E'),
    ("gly", 'G'),
    ("his", 'H'),
    ("ile", 'I'),
    ("leu", 'L'),
    ("lys", 'K'),
    ("met", 'M'),
    ("phe", 'F'),
    ("pro", 'P'),
    ("ser", 'S'),
    ("thr", 'T'),
    ("trp", 'W'),
    ("tyr", 'Y'),
    ("val", 'V'),
    ("ter", '*'),
];

/// Look up a 3-letter code (case-insensitive)
pub fn three_to_one(code: &str) -> Option<char> {
    if code.len() != 3 {
        return None;
    }
    let lower = code.to_ascii_lowercase();
    AA_CODES
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, single)| *single)
}

/// Check whether an uppercase character is a valid 1-letter reference amino
/// acid (standard residue, stop `*`, or unknown `X`)
pub fn is_reference_aa(c: char) -> bool {
    c == '*' || c == 'X' || AA_CODES.iter().any(|(_, single)| *single == c)
}

/// Convert a sequence of 3-letter amino acid codes to 1-letter form
///
/// The input is consumed in chunks of 3 characters; each chunk must be a
/// valid code. Used to bulk-convert untemplated/reference sequences once any
/// position of the same variant was written with a 3-letter amino acid.
pub fn convert_3to1(seq: &str) -> Result<String, ParsingError> {
    if seq.len() % 3 != 0 {
        return Err(ParsingError::new(format!(
            "sequence length ({}) must be a multiple of 3 to convert 3-letter amino acid codes to 1-letter codes: {}",
            seq.len(),
            seq
        ))
        .with_input(seq));
    }
    let chars: Vec<char> = seq.chars().collect();
    if chars.len() != seq.len() {
        // Non-ASCII input can never be a run of amino acid codes
        return Err(
            ParsingError::new(format!("'{}' is not a valid amino acid sequence", seq))
                .with_input(seq),
        );
    }
    let mut result = String::with_capacity(chars.len() / 3);
    for chunk in chars.chunks(3) {
        let code: String = chunk.iter().collect();
        match three_to_one(&code) {
            Some(single) => result.push(single),
            None => {
                return Err(ParsingError::new(format!(
                    "'{}' is not a valid 3-letter amino acid code",
                    code
                ))
                .with_input(seq));
            }
        }
    }
    Ok(result)
}
