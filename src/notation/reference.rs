//! Reference feature identifiers
//!
//! A variant references one feature (continuous notation) or two features
//! (fusions/translocations). A reference is either a plain name or a resolved
//! ontology term carrying display metadata; both resolve to a single display
//! string used for serialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ontology term with optional display metadata
///
/// Deserializable from the JSON records knowledgebase callers typically hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyTerm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A reference feature: a plain name or a resolved ontology term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Name(String),
    Term(OntologyTerm),
}

impl Reference {
    /// Resolve the display string for this reference
    ///
    /// Terms resolve by priority: display name, then source id (suffixed
    /// with its version when present), then name; an empty term resolves to
    /// the empty string.
    pub fn display_name(&self) -> String {
        match self {
            Reference::Name(name) => name.clone(),
            Reference::Term(term) => {
                if let Some(display_name) = &term.display_name {
                    return display_name.clone();
                }
                if let Some(source_id) = &term.source_id {
                    return match &term.source_id_version {
                        Some(version) => format!("{}.{}", source_id, version),
                        None => source_id.clone(),
                    };
                }
                term.name.clone().unwrap_or_default()
            }
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<&str> for Reference {
    fn from(name: &str) -> Self {
        Reference::Name(name.to_string())
    }
}

impl From<String> for Reference {
    fn from(name: String) -> Self {
        Reference::Name(name)
    }
}
