use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use boot_blocks::blocks::{
    authorize_key::AuthorizeKey, change_pass::ChangePass, ip_change::IpChange,
    samba_mount::SambaMount, set_display::SetDisplay, wifi_setup::WifiSetup,
};
use boot_blocks::paths::SystemPaths;
use boot_blocks::runner::Runner;
use boot_blocks::{Result, manifest};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Log what would happen without touching files or spawning commands
    #[arg(long, global = true)]
    dry_run: bool,
    /// TOML file overriding the target system paths
    #[arg(long, global = true)]
    paths: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Append an SSH public key to the user's authorized_keys
    AuthorizeKey { public_key: String },
    /// Set a user's password
    ChangePass {
        password: String,
        #[arg(default_value = "pi")]
        login: String,
    },
    /// Append a static-IP stanza for one interface and restart networking
    IpChange {
        /// eth0, wlan0 or wlan1
        interface: String,
        ip: String,
        gateway: String,
        dns: String,
    },
    /// Add a CIFS share to the mount table and mount it
    SambaMount {
        server: String,
        local_dir: String,
        username: String,
        password: String,
        domain: String,
        file_mode: String,
        dir_mode: String,
    },
    /// Force the HDMI output to a fixed display mode
    SetDisplay { resolution: String },
    /// Append a Wi-Fi network to the supplicant config and reconfigure
    WifiSetup {
        ssid: String,
        psk: String,
        security: String,
        regulatory_domain: String,
    },
    /// Remove one boot phase's blocks from the manifest
    StripPhase {
        /// onfirstboot or onnextboot
        phase_marker: String,
        /// Also reset the first-boot flag to 0
        #[arg(long)]
        clear_flag: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::AuthorizeKey { .. } => "authorize-key",
            Command::ChangePass { .. } => "change-pass",
            Command::IpChange { .. } => "ip-change",
            Command::SambaMount { .. } => "samba-mount",
            Command::SetDisplay { .. } => "set-display",
            Command::WifiSetup { .. } => "wifi-setup",
            Command::StripPhase { .. } => "strip-phase",
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    if args.dry_run {
        // Passwords and keys arrive as arguments; log only the block name.
        tracing::info!("DRY-RUN: {}", args.cmd.name());
        return Ok(());
    }

    let paths = match &args.paths {
        Some(p) => SystemPaths::load(p)?,
        None => SystemPaths::default(),
    };
    let runner = Runner::new(false);

    match args.cmd {
        Command::AuthorizeKey { public_key } => {
            AuthorizeKey { public_key }.run(&paths, &runner)
        }
        Command::ChangePass { password, login } => {
            ChangePass { password, login }.run(&paths, &runner)
        }
        Command::IpChange {
            interface,
            ip,
            gateway,
            dns,
        } => IpChange {
            interface,
            ip,
            gateway,
            dns,
        }
        .run(&paths, &runner),
        Command::SambaMount {
            server,
            local_dir,
            username,
            password,
            domain,
            file_mode,
            dir_mode,
        } => SambaMount {
            server,
            local_dir,
            username,
            password,
            domain,
            file_mode,
            dir_mode,
        }
        .run(&paths, &runner),
        Command::SetDisplay { resolution } => SetDisplay { resolution }.run(&paths, &runner),
        Command::WifiSetup {
            ssid,
            psk,
            security,
            regulatory_domain,
        } => WifiSetup {
            ssid,
            psk,
            security,
            regulatory_domain,
        }
        .run(&paths, &runner),
        Command::StripPhase {
            phase_marker,
            clear_flag,
        } => {
            let Some(phase) = manifest::Phase::from_marker(&phase_marker) else {
                tracing::warn!(marker = %phase_marker, "unrecognized phase marker; manifest untouched");
                return Ok(());
            };
            manifest::strip_phase(&paths.manifest, phase, clear_flag)
        }
    }
}
