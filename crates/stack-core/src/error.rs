//! Error types shared across the engine

use crate::category::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("unknown option '{id}' for {category}")]
    UnknownOption { category: Category, id: String },

    #[error("implication rules for {category} never converge; the rule set is inconsistent")]
    CyclicImplication { category: Category },

    #[error("invalid option catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid rule set: {0}")]
    InvalidRuleSet(String),

    #[error("invalid share URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
