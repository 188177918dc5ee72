//! Command dispatch: bridges CLI args -> core models -> output formatting.

pub mod apps;
pub mod config_cmd;
pub mod device_types;
pub mod devices;
pub mod os;
pub mod util;

use resin_core::Resin;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, resin: &Resin, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Apps(args) => apps::handle(resin, args, global).await,
        Command::Devices(args) => devices::handle(resin, args, global).await,
        Command::DeviceTypes(args) => device_types::handle(resin, args, global).await,
        Command::Os(args) => os::handle(resin, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
