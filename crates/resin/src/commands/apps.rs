//! Application command handlers.

use secrecy::ExposeSecret;
use tabled::Tabled;

use resin_core::{Application, ApplicationSummary, Resin};

use crate::cli::{AppsArgs, AppsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Device Type")]
    device_type: String,
    #[tabled(rename = "Online")]
    online: usize,
    #[tabled(rename = "Devices")]
    devices: usize,
}

impl From<&ApplicationSummary> for ApplicationRow {
    fn from(s: &ApplicationSummary) -> Self {
        Self {
            id: s.application.id,
            name: s.application.app_name.clone(),
            device_type: s.application.device_type.clone(),
            online: s.online_devices,
            devices: s.devices_length,
        }
    }
}

fn detail(app: &Application) -> String {
    [
        format!("ID:          {}", app.id),
        format!("Name:        {}", app.app_name),
        format!("Device Type: {}", app.device_type),
        format!("Git Remote:  {}", util::or_dash(app.git_repository.as_deref())),
        format!("Commit:      {}", util::or_dash(app.commit.as_deref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(resin: &Resin, args: AppsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let apps = resin.applications();

    match args.command {
        AppsCommand::List => {
            let list = apps.get_all().await?;
            let out = output::render_list(
                &global.output,
                &list,
                |s| ApplicationRow::from(s),
                |s| s.application.app_name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppsCommand::Info { name } => {
            let app = apps.get(&name).await?;
            let out = output::render_single(&global.output, &app, detail, |a| a.app_name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppsCommand::Create { name, device_type } => {
            let app = apps.create(&name, &device_type).await?;
            output::print_status(
                &format!("Application '{}' created (id {})", app.app_name, app.id),
                global.quiet,
            );
            Ok(())
        }

        AppsCommand::Rm { name } => {
            if !util::confirm(
                &format!("Remove application '{name}' and all its devices?"),
                global.yes,
                "apps rm",
            )? {
                return Ok(());
            }
            apps.remove(&name).await?;
            output::print_status(&format!("Application '{name}' removed"), global.quiet);
            Ok(())
        }

        AppsCommand::Restart { name } => {
            apps.restart(&name).await?;
            output::print_status(&format!("Application '{name}' restarting"), global.quiet);
            Ok(())
        }

        AppsCommand::ApiKey { name } => {
            let key = apps.get_api_key(&name).await?;
            output::print_output(key.expose_secret(), global.quiet);
            Ok(())
        }
    }
}
