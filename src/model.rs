//! Records produced by a harvest

/// A single quotation as it appears on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The quotation text as displayed
    pub text: String,

    /// Display name of the attributed author
    pub author: String,

    /// Tag labels in document order (may be empty)
    pub tags: Vec<String>,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }
}

/// An author's biography, compared and hashed by value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorBio {
    pub author: String,
    pub bio: String,
}

impl AuthorBio {
    pub fn new(author: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            bio: bio.into(),
        }
    }
}
