//! Composition errors

/// Errors raised while composing an outbound message
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComposeError {
    /// A header-bound value contained a raw CR or LF
    #[error("header injection: {header} contains a line break")]
    HeaderInjection { header: String },
}
