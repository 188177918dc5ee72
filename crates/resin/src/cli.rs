//! Clap derive structures for the `resin` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// resin -- manage IoT fleets on resin from the command line
#[derive(Debug, Parser)]
#[command(
    name = "resin",
    version,
    about = "Manage resin applications and devices from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "RESIN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "RESIN_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session token (overrides profile and keyring)
    #[arg(long, env = "RESIN_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RESIN_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "RESIN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage applications
    #[command(alias = "app", alias = "a")]
    Apps(AppsArgs),

    /// Manage devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Inspect supported device types
    #[command(alias = "dt")]
    DeviceTypes(DeviceTypesArgs),

    /// Download OS images
    Os(OsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPLICATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: AppsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List your applications
    #[command(alias = "ls")]
    List,

    /// Show application details
    Info {
        /// Application name
        name: String,
    },

    /// Create an application
    Create {
        /// Application name
        name: String,

        /// Device type, by display name or slug
        #[arg(long, short = 't')]
        device_type: String,
    },

    /// Remove an application
    #[command(alias = "remove")]
    Rm {
        /// Application name
        name: String,
    },

    /// Restart every device of an application
    Restart {
        /// Application name
        name: String,
    },

    /// Generate a new API key for an application
    ApiKey {
        /// Application name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices
    #[command(alias = "ls")]
    List {
        /// Only devices of this application
        #[arg(long, short = 'a')]
        app: Option<String>,
    },

    /// Show device details
    Info {
        /// Device UUID
        uuid: String,
    },

    /// Find devices by name
    Find {
        /// Device name
        name: String,
    },

    /// Rename a device
    Rename {
        /// Device UUID
        uuid: String,

        /// New device name
        name: String,
    },

    /// Attach a note to a device
    Note {
        /// Device UUID
        uuid: String,

        /// Note text
        note: String,
    },

    /// Move a device to another application
    Move {
        /// Device UUID
        uuid: String,

        /// Target application name
        app: String,
    },

    /// Remove a device
    #[command(alias = "remove")]
    Rm {
        /// Device UUID
        uuid: String,
    },

    /// Blink the device's identification LED
    Identify {
        /// Device UUID
        uuid: String,
    },

    /// Restart a device's application container
    Restart {
        /// Device UUID
        uuid: String,
    },

    /// List a device's local IP addresses
    Ips {
        /// Device UUID
        uuid: String,
    },

    /// Register a new device in an application
    Register {
        /// Application name
        app: String,

        /// Device UUID (generated when omitted)
        #[arg(long)]
        uuid: Option<String>,
    },

    /// Generate a device UUID
    Uuid,

    /// Manage a device's public URL
    Url(DeviceUrlArgs),
}

#[derive(Debug, Args)]
pub struct DeviceUrlArgs {
    #[command(subcommand)]
    pub command: DeviceUrlCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceUrlCommand {
    /// Show the public URL
    Show {
        /// Device UUID
        uuid: String,
    },

    /// Enable the public URL
    Enable {
        /// Device UUID
        uuid: String,
    },

    /// Disable the public URL
    Disable {
        /// Device UUID
        uuid: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICE TYPES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DeviceTypesArgs {
    #[command(subcommand)]
    pub command: DeviceTypesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceTypesCommand {
    /// List supported device types
    #[command(alias = "ls")]
    List,

    /// Show a device type manifest
    Manifest {
        /// Device type slug
        #[arg(required_unless_present = "app", conflicts_with = "app")]
        slug: Option<String>,

        /// Use the device type of this application
        #[arg(long, short = 'a')]
        app: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OsArgs {
    #[command(subcommand)]
    pub command: OsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OsCommand {
    /// Download an OS image
    Download {
        /// Device type slug
        device_type: String,

        /// Destination file
        #[arg(long, short = 'f', value_name = "PATH")]
        file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Store a session token in the system keyring (uses --profile)
    SetToken,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
