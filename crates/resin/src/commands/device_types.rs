//! Device type command handlers.

use tabled::Tabled;

use resin_core::{DeviceTypeManifest, Resin};

use crate::cli::{DeviceTypesArgs, DeviceTypesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceTypeRow {
    #[tabled(rename = "Name")]
    name: String,
}

fn manifest_detail(m: &DeviceTypeManifest) -> String {
    let mut lines = vec![format!("Slug: {}", m.slug), format!("Name: {}", m.name)];
    for (key, value) in &m.extra {
        if let Some(text) = value.as_str() {
            lines.push(format!("{key}: {text}"));
        }
    }
    lines.join("\n")
}

pub async fn handle(
    resin: &Resin,
    args: DeviceTypesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = resin.devices();

    match args.command {
        DeviceTypesCommand::List => {
            let names = devices.get_supported_device_types().await?;
            let out = output::render_list(
                &global.output,
                &names,
                |n| DeviceTypeRow { name: n.clone() },
                Clone::clone,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DeviceTypesCommand::Manifest { slug, app } => {
            let manifest = match (slug, app) {
                (_, Some(app)) => devices.get_manifest_by_application(&app).await?,
                (Some(slug), None) => devices.get_manifest_by_slug(&slug).await?,
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "slug".into(),
                        reason: "a device type slug or --app is required".into(),
                    });
                }
            };
            let out = output::render_single(&global.output, &manifest, manifest_detail, |m| {
                m.slug.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
