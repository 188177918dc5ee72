//! Config subcommand handlers.

use dialoguer::Password;
use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

/// Config as shown to the user: plaintext tokens are masked.
#[derive(Serialize)]
struct ConfigView {
    path: String,
    active_profile: String,
    #[serde(flatten)]
    config: Config,
}

fn masked(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("********".into());
        }
    }
    cfg
}

fn detail(view: &ConfigView) -> String {
    let mut lines = vec![
        format!("Config file:    {}", view.path),
        format!("Active profile: {}", view.active_profile),
        format!("Output:         {}", view.config.defaults.output),
        format!("Timeout:        {}s", view.config.defaults.timeout),
    ];
    for (name, profile) in &view.config.profiles {
        lines.push(String::new());
        lines.push(format!("[{name}]"));
        lines.push(format!("  api_url:          {}", profile.api_url));
        if let Some(ref base) = profile.device_urls_base {
            lines.push(format!("  device_urls_base: {base}"));
        }
        if let Some(ref url) = profile.image_maker_url {
            lines.push(format!("  image_maker_url:  {url}"));
        }
        if let Some(ref env) = profile.token_env {
            lines.push(format!("  token_env:        {env}"));
        }
        if profile.token.is_some() {
            lines.push("  token:            ********".into());
        }
    }
    lines.join("\n")
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let view = ConfigView {
                path: config::config_path().display().to_string(),
                active_profile: config::active_profile_name(global, &cfg),
                config: masked(cfg),
            };
            let out = output::render_single(&global.output, &view, detail, |v| v.path.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let token = Password::new()
                .with_prompt(format!("Session token for profile '{profile_name}'"))
                .interact()
                .map_err(prompt_err)?;

            if token.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            resin_config::store_token(&profile_name, token.trim())?;
            output::print_status(
                &format!("✓ Token stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}
