/// Coarse classification of runtime failures.
///
/// Hosts can branch on this instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An undefined name, a missing member, or an unassignable target.
    Binding,
    /// A write to a binding that was defined as final.
    Constancy,
    /// An operator was applied to an operand of the wrong type.
    Type,
    /// Division or modulus by zero.
    Arithmetic,
    /// A value could not be invoked the way the program asked.
    Dispatch,
    /// Evaluation nested deeper than the configured limit.
    Resource,
    /// A host-supplied callable reported a failure.
    Host,
}

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Read of, or non-root write to, a name no scope owns.
    #[error("Undefined variable {name}")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Assignment whose left side is not a bare variable.
    #[error("Cannot assign to {target}")]
    InvalidAssignmentTarget {
        /// A description of the rejected target.
        target: String,
    },
    /// Member access on a value that does not expose the member.
    #[error("Cannot read property {property} of {value}")]
    UnknownProperty {
        /// The requested member.
        property: String,
        /// The value the member was requested from.
        value:    String,
    },
    /// Write to a binding defined as final.
    #[error("Cannot assign to constant variable {name}")]
    ConstantAssignment {
        /// The name of the variable.
        name: String,
    },
    /// An arithmetic or comparison operand was not a number.
    #[error("Expected number but got {found}")]
    ExpectedNumber {
        /// The value that was found instead.
        found: String,
    },
    /// The right operand of `/` or `%` was exactly zero.
    #[error("Divide by zero")]
    DivisionByZero,
    /// Tried to call something that is not a function.
    #[error("{value} is not a function")]
    NotCallable {
        /// The value that was called.
        value: String,
    },
    /// A script function was called with the wrong number of arguments.
    #[error("Function {name} expects {expected} arguments but got {found}")]
    ArgumentCountMismatch {
        /// The function name, or `anonymous`.
        name:     String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of supplied arguments.
        found:    usize,
    },
    /// Evaluation exceeded the configured depth.
    #[error("Maximum evaluation depth of {limit} exceeded")]
    RecursionLimit {
        /// The configured limit.
        limit: usize,
    },
    /// A failure reported by a host callable.
    #[error("{0}")]
    Host(String),
}

impl RuntimeError {
    /// Returns the taxonomy class of this error.
    ///
    /// ## Example
    /// ```
    /// use embedscript::error::{ErrorKind, RuntimeError};
    ///
    /// assert_eq!(RuntimeError::DivisionByZero.kind(), ErrorKind::Arithmetic);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedVariable { .. }
            | Self::InvalidAssignmentTarget { .. }
            | Self::UnknownProperty { .. } => ErrorKind::Binding,
            Self::ConstantAssignment { .. } => ErrorKind::Constancy,
            Self::ExpectedNumber { .. } => ErrorKind::Type,
            Self::DivisionByZero => ErrorKind::Arithmetic,
            Self::NotCallable { .. } | Self::ArgumentCountMismatch { .. } => ErrorKind::Dispatch,
            Self::RecursionLimit { .. } => ErrorKind::Resource,
            Self::Host(_) => ErrorKind::Host,
        }
    }

    /// Builds a host failure from any displayable message.
    pub fn host(message: impl std::fmt::Display) -> Self {
        Self::Host(message.to_string())
    }
}
