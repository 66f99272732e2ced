use thiserror::Error;

/// Shown for every failure to fetch recommendations.
pub const FETCH_FAILED_MESSAGE: &str = "추천 목록을 불러오는 데 실패했습니다.";

/// Shown when a blank theme is submitted.
pub const EMPTY_THEME_MESSAGE: &str = "음악 테마나 장르를 입력해주세요.";

/// Fallback for failures without a message.
pub const GENERIC_FAILURE_MESSAGE: &str = "추천을 가져오는 도중 오류가 발생했습니다.";

#[derive(Error, Debug)]
pub enum RecoError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse provider response: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    ProviderError { status: u16, body: String },

    #[error("Provider response contained no text")]
    EmptyResponse,

    #[error("Provider response violates the expected shape: {message}")]
    SchemaViolation { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Provider,
    Parse,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RecoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ApiError(_) | Self::ProviderError { .. } | Self::EmptyResponse => {
                ErrorCategory::Provider
            }
            Self::SerializationError(_) | Self::SchemaViolation { .. } => ErrorCategory::Parse,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Parse => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Everything that can go wrong between sending the prompt and holding a
    /// validated response.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Provider | ErrorCategory::Parse
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } if message.trim().is_empty() => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            Self::ValidationError { message } => message.clone(),
            e if e.is_fetch_failure() => FETCH_FAILED_MESSAGE.to_string(),
            Self::MissingConfigError { field } => format!("필수 설정이 없습니다: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("설정 값이 올바르지 않습니다 ({}): {}", field, reason)
            }
            Self::ConfigError { message } => format!("설정 오류: {}", message),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "테마를 입력하거나 프리셋(/1-/6)을 선택하세요.",
            Self::ApiError(_) => "네트워크 연결을 확인한 뒤 다시 시도하세요.",
            Self::ProviderError { status, .. } if *status == 401 || *status == 403 => {
                "GEMINI_API_KEY 값이 올바른지 확인하세요."
            }
            Self::ProviderError { .. } | Self::EmptyResponse => {
                "잠시 후 다시 시도하세요."
            }
            Self::SerializationError(_) | Self::SchemaViolation { .. } => {
                "같은 테마로 다시 추천을 요청해 보세요."
            }
            Self::MissingConfigError { .. } => {
                "--api-key 옵션이나 GEMINI_API_KEY 환경 변수를 설정하세요."
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "설정 파일과 명령줄 옵션을 확인하세요."
            }
            Self::IoError(_) => "터미널 입출력 상태를 확인하세요.",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecoError>;
