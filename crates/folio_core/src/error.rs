//! Error types for content loading and contact submission

use thiserror::Error;

use crate::content::ItemId;

/// Problems found while validating portfolio content
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    /// Two orbit items share an id
    #[error("duplicate skill id {0}")]
    DuplicateId(ItemId),

    /// Two gallery cards share an id
    #[error("duplicate project id {0:?}")]
    DuplicateCardId(String),

    /// A title is empty or whitespace
    #[error("empty title in {section} entry #{index}")]
    EmptyTitle { section: &'static str, index: usize },
}

/// Problems with a contact submission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContactError {
    /// A required field is empty
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The e-mail address is not plausibly deliverable
    #[error("invalid e-mail address {0:?}")]
    InvalidEmail(String),

    /// The sink refused or failed to store the message
    #[error("contact sink failed: {0}")]
    Sink(String),
}
