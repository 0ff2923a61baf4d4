//! Content item model.
//!
//! Content items (papers, talks, demos) are what sessions and events are
//! made of. They carry no duration of their own; it comes from their type.

use serde::{Deserialize, Serialize};

use super::Identified;

/// A piece of programme content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique content identifier.
    pub id: String,
    /// Content type; determines duration.
    #[serde(default)]
    pub type_id: Option<String>,
    /// Authors, by person reference.
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// An author entry of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Referenced person.
    pub person_id: String,
    /// Affiliations, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub institutions: Vec<serde_json::Value>,
}

impl ContentItem {
    /// Creates an untyped content item without authors.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: None,
            authors: Vec::new(),
        }
    }

    /// Sets the content type.
    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Adds an author.
    pub fn with_author(mut self, person_id: impl Into<String>) -> Self {
        self.authors.push(Author {
            person_id: person_id.into(),
            institutions: Vec::new(),
        });
        self
    }

    /// Person ids of all authors.
    pub fn author_ids(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().map(|a| a.person_id.as_str())
    }
}

impl Identified for ContentItem {
    fn id(&self) -> &str {
        &self.id
    }
}
