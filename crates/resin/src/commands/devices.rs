//! Device command handlers.

use tabled::Tabled;

use resin_core::{Device, DeviceView, Resin};

use crate::cli::{DeviceUrlCommand, DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Application")]
    application: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl DeviceRow {
    fn new(v: &DeviceView, color: bool) -> Self {
        Self {
            id: v.device.id,
            uuid: short_uuid(&v.device.uuid).to_owned(),
            name: v.device.name.clone(),
            device_type: v.device.device_type.clone(),
            application: v.application_name.clone(),
            status: output::online_label(v.device.is_online, color),
        }
    }
}

fn short_uuid(uuid: &str) -> &str {
    uuid.get(..7).unwrap_or(uuid)
}

fn detail(v: &DeviceView) -> String {
    let d = &v.device;
    let mut lines = vec![
        format!("ID:           {}", d.id),
        format!("UUID:         {}", d.uuid),
        format!("Name:         {}", d.name),
        format!("Type:         {}", d.device_type),
        format!("Application:  {}", v.application_name),
        format!("Online:       {}", d.is_online),
        format!("IP Address:   {}", util::or_dash(d.ip_address.as_deref())),
        format!("VPN Address:  {}", util::or_dash(d.vpn_address.as_deref())),
        format!("Public URL:   {}", if d.is_web_accessible { "enabled" } else { "disabled" }),
        format!("Status:       {}", util::or_dash(d.status.as_deref())),
        format!("OS Version:   {}", util::or_dash(d.os_version.as_deref())),
        format!("Supervisor:   {}", util::or_dash(d.supervisor_version.as_deref())),
        format!("Commit:       {}", util::or_dash(d.commit.as_deref())),
    ];
    if let Some(seen) = d.last_seen_time {
        lines.push(format!("Last Seen:    {}", seen.to_rfc3339()));
    }
    if let Some(ref note) = d.note {
        lines.push(format!("Note:         {note}"));
    }
    lines.join("\n")
}

fn registered_detail(d: &Device) -> String {
    [
        format!("ID:   {}", d.id),
        format!("UUID: {}", d.uuid),
        format!("Type: {}", d.device_type),
    ]
    .join("\n")
}

fn render_views(views: &[DeviceView], global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        views,
        |v| DeviceRow::new(v, color),
        |v| v.device.uuid.clone(),
    );
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    resin: &Resin,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = resin.devices();

    match args.command {
        DevicesCommand::List { app } => {
            let views = match app {
                Some(ref name) => devices.get_all_by_application(name).await?,
                None => devices.get_all().await?,
            };
            render_views(&views, global);
            Ok(())
        }

        DevicesCommand::Info { uuid } => {
            let view = devices.get(&uuid).await?;
            let out = output::render_single(&global.output, &view, detail, |v| {
                v.device.uuid.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Find { name } => {
            let views = devices.get_by_name(&name).await?;
            render_views(&views, global);
            Ok(())
        }

        DevicesCommand::Rename { uuid, name } => {
            devices.rename(&uuid, &name).await?;
            output::print_status(&format!("Device renamed to '{name}'"), global.quiet);
            Ok(())
        }

        DevicesCommand::Note { uuid, note } => {
            devices.note(&uuid, &note).await?;
            output::print_status("Note saved", global.quiet);
            Ok(())
        }

        DevicesCommand::Move { uuid, app } => {
            devices.move_to(&uuid, &app).await?;
            output::print_status(&format!("Device moved to '{app}'"), global.quiet);
            Ok(())
        }

        DevicesCommand::Rm { uuid } => {
            if !util::confirm(
                &format!("Remove device {}?", short_uuid(&uuid)),
                global.yes,
                "devices rm",
            )? {
                return Ok(());
            }
            devices.remove(&uuid).await?;
            output::print_status("Device removed", global.quiet);
            Ok(())
        }

        DevicesCommand::Identify { uuid } => {
            devices.identify(&uuid).await?;
            output::print_status("Identification LED blinking", global.quiet);
            Ok(())
        }

        DevicesCommand::Restart { uuid } => {
            let reply = devices.restart(&uuid).await?;
            let out = output::render_single(
                &global.output,
                &reply,
                |r| r.as_str().map_or_else(|| r.to_string(), str::to_owned),
                |r| r.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Ips { uuid } => {
            let ips = devices.get_local_ip_addresses(&uuid).await?;
            let out = output::render_single(&global.output, &ips, |v| v.join("\n"), |v| {
                v.join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Register { app, uuid } => {
            let uuid = uuid.unwrap_or_else(|| devices.generate_uuid());
            if !resin_core::is_valid_uuid(&uuid) {
                return Err(CliError::Validation {
                    field: "uuid".into(),
                    reason: "expected 62 lowercase hex characters".into(),
                });
            }
            let device = devices.register(&app, &uuid).await?;
            let out = output::render_single(&global.output, &device, registered_detail, |d| {
                d.uuid.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Uuid => {
            output::print_output(&devices.generate_uuid(), global.quiet);
            Ok(())
        }

        DevicesCommand::Url(args) => match args.command {
            DeviceUrlCommand::Show { uuid } => {
                let url = devices.get_device_url(&uuid).await?;
                output::print_output(&url, global.quiet);
                Ok(())
            }
            DeviceUrlCommand::Enable { uuid } => {
                devices.enable_device_url(&uuid).await?;
                output::print_status("Public URL enabled", global.quiet);
                Ok(())
            }
            DeviceUrlCommand::Disable { uuid } => {
                devices.disable_device_url(&uuid).await?;
                output::print_status("Public URL disabled", global.quiet);
                Ok(())
            }
        },
    }
}
