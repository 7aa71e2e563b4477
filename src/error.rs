//! Errors raised when reading configuration variables

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is absent from the environment and has no default.
    #[error("Required environment variable '{name}' not found. Please set it in your .env file.")]
    Missing { name: String },

    /// The variable is set but cannot be converted to the requested type.
    #[error("Environment variable '{name}' has an invalid value: {reason}")]
    Invalid { name: String, reason: String },
}

impl EnvError {
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name } | Self::Invalid { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EnvError;

    #[test]
    fn missing_error_names_the_variable() {
        let err = EnvError::Missing { name: "OPENAI_API_KEY".to_string() };
        assert!(err.to_string().contains("'OPENAI_API_KEY'"));
        assert_eq!(err.name(), "OPENAI_API_KEY");
    }
}
