use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use mdsc_client::{ClientConfig, MdsClient, MdsClientImpl, MdsError};
use mdsc_logging::init_logging;
use mdsc_proto::{FsInfo, MountPoint, Volume};
use mdsc_types::FsId;

/// MDS administration tool
///
/// Creates, deletes, mounts, unmounts and inspects filesystems registered
/// with a metadata server.
#[derive(Parser, Debug)]
#[command(name = "mdsc-admin", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MDS address (host:port), overrides the config file.
    #[arg(long)]
    mds_addr: Option<String>,

    /// RPC timeout in milliseconds, overrides the config file.
    #[arg(long)]
    rpc_timeout_ms: Option<u64>,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a filesystem backed by a volume.
    CreateFs {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 4096)]
        block_size: u64,
        #[command(flatten)]
        volume: VolumeArgs,
    },

    /// Delete a filesystem.
    DeleteFs {
        #[arg(long)]
        name: String,
    },

    /// Register a mount point and print the filesystem info.
    MountFs {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        mount_point: MountPointArgs,
    },

    /// Remove a mount point.
    UmountFs {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        mount_point: MountPointArgs,
    },

    /// Print filesystem info, looked up by name or id.
    GetFsInfo {
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        name: Option<String>,
        #[arg(long)]
        id: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct VolumeArgs {
    #[arg(long)]
    volume_name: String,
    #[arg(long)]
    volume_size: u64,
    #[arg(long, default_value_t = 4096)]
    volume_block_size: u64,
    #[arg(long, default_value = "")]
    user: String,
    #[arg(long)]
    password: Option<String>,
}

impl From<VolumeArgs> for Volume {
    fn from(args: VolumeArgs) -> Self {
        Volume {
            volume_name: args.volume_name,
            volume_size: args.volume_size,
            block_size: args.volume_block_size,
            user: args.user,
            password: args.password,
        }
    }
}

#[derive(Args, Debug)]
struct MountPointArgs {
    /// Host of the mount point.
    #[arg(long)]
    host: String,
    /// Directory of the mount point.
    #[arg(long)]
    mount_dir: String,
}

impl From<MountPointArgs> for MountPoint {
    fn from(args: MountPointArgs) -> Self {
        MountPoint::new(args.host, args.mount_dir)
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(addr) = &cli.mds_addr {
        config.mds.mds_addr = addr.clone();
    }
    if let Some(ms) = cli.rpc_timeout_ms {
        config.mds.rpc_timeout_ms = ms;
    }
    if cli.verbose {
        config.log.level = "debug".into();
    }
    config.mds.validate()?;
    Ok(config)
}

fn print_fs_info(info: &FsInfo) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(info)?);
    Ok(())
}

async fn run(client: &dyn MdsClient, command: Command) -> anyhow::Result<Result<(), MdsError>> {
    let result = match command {
        Command::CreateFs { name, block_size, volume } => {
            client.create_fs(&name, block_size, &volume.into()).await
        }
        Command::DeleteFs { name } => client.delete_fs(&name).await,
        Command::MountFs { name, mount_point } => {
            let mut info = FsInfo::default();
            let result = client.mount_fs(&name, &mount_point.into(), &mut info).await;
            if result.is_ok() {
                print_fs_info(&info)?;
            }
            result
        }
        Command::UmountFs { name, mount_point } => client.umount_fs(&name, &mount_point.into()).await,
        Command::GetFsInfo { name, id } => {
            let mut info = FsInfo::default();
            let result = match (name, id) {
                (Some(name), _) => client.get_fs_info(&name, &mut info).await,
                (None, Some(id)) => client.get_fs_info_by_id(FsId(id), &mut info).await,
                (None, None) => anyhow::bail!("either --name or --id is required"),
            };
            if result.is_ok() {
                print_fs_info(&info)?;
            }
            result
        }
    };
    Ok(result)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let _guard = init_logging(&config.log)?;
    tracing::debug!(mds_addr = %config.mds.mds_addr, timeout_ms = config.mds.rpc_timeout_ms, "starting");

    let client = MdsClientImpl::with_rpc(config.mds);
    match run(&client, cli.command).await? {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {} (errno {})", e, e.errno());
            let code = u8::try_from(e.errno().unsigned_abs()).unwrap_or(u8::MAX);
            Ok(ExitCode::from(code.max(1)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_shape() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "mdsc-admin",
            "--mds-addr",
            "10.1.1.1:6700",
            "--rpc-timeout-ms",
            "900",
            "get-fs-info",
            "--id",
            "3",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.mds.mds_addr, "10.1.1.1:6700");
        assert_eq!(config.mds.rpc_timeout_ms, 900);
        assert!(matches!(cli.command, Command::GetFsInfo { name: None, id: Some(3) }));
    }

    #[test]
    fn test_get_fs_info_needs_a_key() {
        assert!(Cli::try_parse_from(["mdsc-admin", "get-fs-info"]).is_err());
        assert!(Cli::try_parse_from(["mdsc-admin", "get-fs-info", "--name", "a", "--id", "1"]).is_err());
    }

    #[test]
    fn test_mount_args() {
        let cli = Cli::parse_from([
            "mdsc-admin",
            "mount-fs",
            "--name",
            "fs1",
            "--host",
            "node1",
            "--mount-dir",
            "/mnt/fs1",
        ]);
        match cli.command {
            Command::MountFs { name, mount_point } => {
                assert_eq!(name, "fs1");
                assert_eq!(MountPoint::from(mount_point), MountPoint::new("node1", "/mnt/fs1"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
