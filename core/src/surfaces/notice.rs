use crate::gateway::GatewayError;

/// Dismissible user-visible failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Underlying error text, for the log pane
    pub detail: Option<String>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn from_error(message: impl Into<String>, error: &GatewayError) -> Self {
        Self {
            message: message.into(),
            detail: Some(error.to_string()),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
