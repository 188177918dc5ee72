//! CLI configuration: a thin wrapper around `resin_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use resin_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use resin_config::{Config, Profile, config_path, load_config_or_default};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build a `ClientConfig` from the config file, the active profile and
/// CLI overrides.
///
/// An explicitly requested profile must exist. Without one, the built-in
/// defaults apply. With `require_token`, a missing session token fails
/// here instead of at the first API call.
pub fn build_client_config(
    global: &GlobalOpts,
    require_token: bool,
) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: cfg.available_profiles(),
            });
        }
        None => Profile::default(),
    };

    let mut client = resin_config::profile_to_client_config(&profile, &profile_name, &cfg.defaults)?;

    // Flag > env > profile
    if let Some(ref raw) = global.api_url {
        client.api_url = raw.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if let Some(ref token) = global.token {
        client.token = Some(SecretString::from(token.clone()));
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    if require_token && client.token.is_none() {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    }
    Ok(client)
}
