use crate::runner::plugin::types::MemberKind;
use thiserror::Error;

/// Configuration errors raised while materializing a native class.
///
/// These are fatal to the class being bound; nothing is installed into the context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("{class}.{member} is declared but has no native implementation")]
    MissingMember { class: String, member: String },
    #[error("{class}.{member} is declared as {declared} but implemented as {found}")]
    KindMismatch {
        class: String,
        member: String,
        declared: MemberKind,
        found: MemberKind,
    },
    #[error("{class}.{member} is declared more than once")]
    DuplicateMember { class: String, member: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid runtime config: {0}")]
    Parse(#[from] toml::de::Error),
}
