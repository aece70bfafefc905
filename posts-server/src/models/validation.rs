//! Validation error types

use std::fmt;

/// Fields of a post write payload, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Image,
    CategoryId,
    Description,
    Content,
    StatusId,
}

impl PostField {
    /// Check order for write payloads.
    pub const ALL: [PostField; 6] = [
        Self::Title,
        Self::Image,
        Self::CategoryId,
        Self::Description,
        Self::Content,
        Self::StatusId,
    ];

    /// Human-readable label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Image => "Image",
            Self::CategoryId => "Category ID",
            Self::Description => "Description",
            Self::Content => "Content",
            Self::StatusId => "Status ID",
        }
    }

    /// JSON key / column name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Image => "image",
            Self::CategoryId => "category_id",
            Self::Description => "description",
            Self::Content => "content",
            Self::StatusId => "status_id",
        }
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing, null, or blank text
    Required { field: PostField },

    /// Field should be a JSON string
    NotText { field: PostField },

    /// Field should be a JSON number
    NotNumber { field: PostField },

    /// Field is a number but not a whole 32-bit value
    NotInteger { field: PostField },

    /// Query parameter could not be parsed
    InvalidParam { name: &'static str, expected: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field.label()),
            Self::NotText { field } => write!(f, "{} must be a string", field.label()),
            Self::NotNumber { field } => write!(f, "{} must be a number", field.label()),
            Self::NotInteger { field } => write!(f, "{} must be an integer", field.label()),
            Self::InvalidParam { name, expected } => write!(f, "{} must be {}", name, expected),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every violation found in one payload, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first violation, reported as the primary message.
    pub fn first(&self) -> Option<&ValidationError> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Rendered messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(first) => write!(f, "{}", first),
            None => write!(f, "no validation errors"),
        }
    }
}

impl std::error::Error for ValidationErrors {}
