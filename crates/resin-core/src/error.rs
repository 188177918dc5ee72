// ── Core error types ──
//
// Domain failures raised by the models. Transport and auth failures from
// `resin-api` pass through untouched in the `Api` variant so callers can
// still inspect status codes.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Application not found: {identifier}")]
    ApplicationNotFound { identifier: String },

    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    // ── Device type errors ───────────────────────────────────────────
    #[error("Invalid device type: {identifier}")]
    InvalidDeviceType { identifier: String },

    #[error(
        "Incompatible application: {application} \
         (device is {device_type}, application is {application_device_type})"
    )]
    IncompatibleDeviceType {
        application: String,
        device_type: String,
        application_device_type: String,
    },

    #[error("Unsupported device: {slug}")]
    UnsupportedDeviceType { slug: String },

    // ── Device state errors ──────────────────────────────────────────
    #[error("The device is offline: {uuid}")]
    DeviceOffline { uuid: String },

    #[error("Device is not web accessible: {uuid}")]
    DeviceNotWebAccessible { uuid: String },

    /// A device record came back without the application expansion the
    /// query asked for.
    #[error("Device {uuid} was returned without its application")]
    MissingExpansion { uuid: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Passthrough ──────────────────────────────────────────────────
    #[error(transparent)]
    Api(#[from] resin_api::Error),
}

impl CoreError {
    /// Returns `true` for the application/device lookup misses.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ApplicationNotFound { .. } | Self::DeviceNotFound { .. }
        )
    }

    pub(crate) fn application_not_found(identifier: impl ToString) -> Self {
        Self::ApplicationNotFound {
            identifier: identifier.to_string(),
        }
    }

    pub(crate) fn device_not_found(identifier: impl ToString) -> Self {
        Self::DeviceNotFound {
            identifier: identifier.to_string(),
        }
    }
}

impl From<url::ParseError> for CoreError {
    fn from(err: url::ParseError) -> Self {
        Self::Api(resin_api::Error::InvalidUrl(err))
    }
}
