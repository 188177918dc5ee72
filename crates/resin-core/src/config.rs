// ── Runtime client configuration ──
//
// Describes *where* the API lives and how to talk to it. Carries the
// session token but never touches disk; `resin-config` builds one of these
// from profiles and hands it in.

use std::time::Duration;

use resin_api::TransportConfig;
use secrecy::SecretString;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.resin.io";
pub const DEFAULT_DEVICE_URLS_BASE: &str = "resindevice.io";
pub const DEFAULT_IMAGE_MAKER_URL: &str = "https://img.resin.io";

/// Configuration for a [`Resin`](crate::Resin) client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., `https://api.resin.io`).
    pub api_url: Url,
    /// Session token. `None` leaves requests unauthenticated.
    pub token: Option<SecretString>,
    /// Domain under which web-accessible devices are published.
    pub device_urls_base: String,
    /// Base URL of the OS image maker service.
    pub image_maker_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.parse().expect("default API URL is valid"),
            token: None,
            device_urls_base: DEFAULT_DEVICE_URLS_BASE.into(),
            image_maker_url: DEFAULT_IMAGE_MAKER_URL
                .parse()
                .expect("default image maker URL is valid"),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            ..TransportConfig::default()
        }
    }

    /// Public URL of a web-accessible device.
    pub fn device_url(&self, uuid: &str) -> String {
        format!(
            "https://{uuid}.{}",
            self.device_urls_base.trim_matches('.')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_url_uses_configured_base() {
        let config = ClientConfig {
            device_urls_base: "devices.example.com".into(),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.device_url("7cf02a6"),
            "https://7cf02a6.devices.example.com"
        );
    }

    #[test]
    fn transport_config_carries_timeout() {
        let config = ClientConfig {
            timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        };
        assert_eq!(config.transport_config().timeout, Duration::from_secs(5));
    }
}
