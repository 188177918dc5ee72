//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use resin_config::ConfigError;
use resin_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the resin API")]
    #[diagnostic(
        code(resin::connection_failed),
        help("Check your network connection and the api_url of your profile.")
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(resin::timeout),
        help("Increase the timeout with --timeout or the profile's timeout setting.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(resin::auth_failed),
        help(
            "Your session token may have expired.\n\
             Run: resin config set-token"
        )
    )]
    AuthFailed { message: String },

    #[error("No session token configured for profile '{profile}'")]
    #[diagnostic(
        code(resin::no_credentials),
        help(
            "Store one with: resin config set-token\n\
             Or set the RESIN_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(resin::not_found),
        help("Run: resin {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(resin::conflict))]
    Conflict { message: String },

    #[error("{message}")]
    #[diagnostic(code(resin::device_state))]
    DeviceState { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(resin::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(resin::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(resin::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Keyring error: {message}")]
    #[diagnostic(code(resin::keyring))]
    Keyring { message: String },

    #[error(transparent)]
    #[diagnostic(code(resin::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(resin::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::Keyring { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    fn not_found(resource_type: &str, identifier: String, list_command: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier,
            list_command: list_command.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ApplicationNotFound { identifier } => {
                Self::not_found("application", identifier, "apps list")
            }
            CoreError::DeviceNotFound { identifier } => {
                Self::not_found("device", identifier, "devices list")
            }
            CoreError::UnsupportedDeviceType { slug } => {
                Self::not_found("device type", slug, "device-types list")
            }
            CoreError::InvalidDeviceType { identifier } => Self::Validation {
                field: "device type".into(),
                reason: format!("'{identifier}' is not a supported device type"),
            },
            err @ CoreError::IncompatibleDeviceType { .. } => Self::Conflict {
                message: err.to_string(),
            },
            err @ (CoreError::DeviceOffline { .. } | CoreError::DeviceNotWebAccessible { .. }) => {
                Self::DeviceState {
                    message: err.to_string(),
                }
            }
            err @ CoreError::MissingExpansion { .. } => Self::ApiError {
                code: "unexpected_response".into(),
                message: err.to_string(),
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Api(err) => err.into(),
        }
    }
}

impl From<resin_core::resin_api::Error> for CliError {
    fn from(err: resin_core::resin_api::Error) -> Self {
        use resin_core::resin_api::Error as HttpError;

        match err {
            HttpError::Authentication { message } | HttpError::InvalidToken(message) => {
                Self::AuthFailed { message }
            }
            HttpError::Transport(e) if e.is_timeout() => Self::Timeout,
            HttpError::Transport(e) if e.is_connect() => Self::ConnectionFailed {
                source: Box::new(e),
            },
            HttpError::Transport(e) => Self::ApiError {
                code: "transport".into(),
                message: e.to_string(),
            },
            HttpError::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            HttpError::Api { status, message } => Self::ApiError {
                code: status.to_string(),
                message,
            },
            HttpError::Deserialization { message, .. } => Self::ApiError {
                code: "decode".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Keyring(e) => Self::Keyring {
                message: e.to_string(),
            },
            ConfigError::Serialization(e) => Self::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            },
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}
