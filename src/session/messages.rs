//! Unified messaging system for session operations

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_WARN: &str = "\x1b[1;33m"; // Bold Yellow
pub const COLOR_ERROR: &str = "\x1b[1;31m"; // Bold Red
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    /// Normal session start/shutdown messages
    Info(String),
    /// Success messages for completed operations
    Success(String),
    Warn(String),
    Error(String),
}

impl SessionMessage {
    /// Create an info message
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    /// Create a success message
    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn warn(msg: impl Into<String>) -> Self {
        Self::Warn(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    /// The message as printed, including its colored tag.
    pub fn render(&self) -> String {
        let (color, tag, msg) = match self {
            Self::Info(msg) => (COLOR_INFO, "INFO", msg),
            Self::Success(msg) => (COLOR_SUCCESS, "SUCCESS", msg),
            Self::Warn(msg) => (COLOR_WARN, "WARN", msg),
            Self::Error(msg) => (COLOR_ERROR, "ERROR", msg),
        };
        format!("{}[{}]{} {}", color, tag, COLOR_RESET, msg)
    }

    /// Print the message with appropriate formatting
    pub fn print(&self) {
        match self {
            Self::Error(_) => eprintln!("{}", self.render()),
            _ => println!("{}", self.render()),
        }
    }
}

/// Print session startup message
pub fn print_session_starting(mode: &str, source: &str) {
    SessionMessage::info(format!("Starting {} mode with {}", mode, source)).print();
}

/// Print session exit message
pub fn print_session_exit_success() {
    SessionMessage::success("IPDR dashboard exited successfully").print();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tags() {
        assert_eq!(
            SessionMessage::success("done").render(),
            "\x1b[1;32m[SUCCESS]\x1b[0m done"
        );
        assert!(SessionMessage::warn("careful").render().contains("[WARN]"));
    }
}
