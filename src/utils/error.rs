use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unexpected catalog payload: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Publication failed: {message}")]
    PublicationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Decode,
    Publication,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn publication(message: impl Into<String>) -> Self {
        CatalogError::PublicationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CatalogError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::NetworkError(_) => ErrorCategory::Network,
            CatalogError::DecodeError(_) => ErrorCategory::Decode,
            CatalogError::PublicationError { .. } => ErrorCategory::Publication,
            CatalogError::IoError(_) => ErrorCategory::Io,
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常可重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Decode => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Publication | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息，三種載入錯誤共用同一格式
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Decode | ErrorCategory::Publication => {
                format!("Error loading albums: {}", self)
            }
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => format!("Could not read configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the --api-endpoint value",
            ErrorCategory::Decode => {
                "Make sure the endpoint returns a JSON array of albums (title, artist, year, genre)"
            }
            ErrorCategory::Publication => "The UI dispatcher was shut down; restart the session",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::Io => "Check that the configuration file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_errors_share_user_message_prefix() {
        let decode = CatalogError::from(serde_json::from_str::<Vec<i32>>("{").unwrap_err());
        let publication = CatalogError::publication("dispatcher closed");

        assert!(decode.user_friendly_message().starts_with("Error loading albums: "));
        assert!(publication
            .user_friendly_message()
            .starts_with("Error loading albums: "));
        assert!(publication.user_friendly_message().contains("dispatcher closed"));
    }

    #[test]
    fn test_category_and_severity() {
        let err = CatalogError::publication("gone");
        assert_eq!(err.category(), ErrorCategory::Publication);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = CatalogError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: "".to_string(),
            reason: "URL cannot be empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
