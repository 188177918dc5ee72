//! OS image command handlers.

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWriteExt;

use resin_core::Resin;

use crate::cli::{GlobalOpts, OsArgs, OsCommand};
use crate::error::CliError;
use crate::output;

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {bytes} downloaded ({bytes_per_sec})")
    {
        bar.set_style(style);
    }
    bar
}

pub async fn handle(resin: &Resin, args: OsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        OsCommand::Download { device_type, file } => {
            let mut stream = resin.os().download(&device_type).await?;
            let mut out = tokio::fs::File::create(&file).await?;
            let bar = progress_bar(global.quiet);

            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                out.write_all(&chunk).await?;
                bar.inc(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
            }
            out.flush().await?;
            bar.finish_and_clear();

            output::print_status(
                &format!("Image for {device_type} saved to {}", file.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}
