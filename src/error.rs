use thiserror::Error;

/// Structured error context for configuration and argument failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "facade.raw_accessor")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "facade_config", "member_table")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for instance handles.
///
/// `Unmounted` and `NotAFunction` are the two failures raised by the facade
/// itself. The remaining variants come from members (argument decoding, member
/// reported failures) or from configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Component instance {name} has not been mounted yet")]
    Unmounted { name: String },

    #[error("{member} is not a function")]
    NotAFunction { member: String },

    #[error("Invalid argument {index} for {member}: {message}")]
    Argument {
        member: String,
        index: usize,
        message: String,
    },

    #[error("{member} failed: {message}")]
    Invocation { member: String, message: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn unmounted(name: impl Into<String>) -> Self {
        Error::Unmounted { name: name.into() }
    }

    pub fn not_a_function(member: impl Into<String>) -> Self {
        Error::NotAFunction {
            member: member.into(),
        }
    }

    /// Failure reported by a forwarded member.
    pub fn invocation(member: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Invocation {
            member: member.into(),
            message: message.into(),
        }
    }

    pub fn argument(member: impl Into<String>, index: usize, message: impl Into<String>) -> Self {
        Error::Argument {
            member: member.into(),
            index,
            message: message.into(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn is_unmounted(&self) -> bool {
        matches!(self, Error::Unmounted { .. })
    }

    pub fn is_not_a_function(&self) -> bool {
        matches!(self, Error::NotAFunction { .. })
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
