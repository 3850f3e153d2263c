mod args;

use anyhow::{Context, bail};
use args::ScaffoldArgs;
use chrono::Utc;
use clap::{Parser, Subcommand};
use pkg_client::{ClientConfig, ClusterClient, LogOptions, apply_manifest, print_apps};
use pkg_constants::network::{DEFAULT_API_ADDR, DEFAULT_NAMESPACE};
use pkg_constants::paths::DEFAULT_CLIENT_CONFIG;
use pkg_types::app_manifest::app_name_from_dir;
use pkg_types::config::{ClientConfigFile, load_config_file};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spin-kube", about = "Deploy and manage Spin apps on Kubernetes")]
struct Cli {
    /// Path to YAML client config file [default: ~/.spin-kube/config.yaml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Kubernetes API server endpoint
    #[arg(long, global = true)]
    server: Option<String>,

    /// Bearer token for the API server
    #[arg(long, global = true)]
    token: Option<String>,

    /// Namespace to operate in
    #[arg(long, short = 'n', global = true)]
    namespace: Option<String>,

    /// Accept invalid TLS certificates from the API server
    #[arg(long, global = true)]
    insecure_skip_tls_verify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold application manifest
    Scaffold {
        #[command(flatten)]
        args: ScaffoldArgs,

        /// Write the manifest to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Deploy application to Kubernetes
    Deploy {
        #[command(flatten)]
        args: ScaffoldArgs,

        /// Only print the Kubernetes manifest without deploying
        #[arg(long)]
        dry_run: bool,
    },
    /// Display detailed application information
    Get {
        /// Application name [default: name from ./spin.toml]
        name: Option<String>,
    },
    /// List applications
    List,
    /// Display application logs
    Logs {
        /// Application name [default: name from ./spin.toml]
        name: Option<String>,

        /// Stream logs until interrupted
        #[arg(long, short = 'f')]
        follow: bool,

        /// Number of recent lines to show
        #[arg(long)]
        tail: Option<i64>,
    },
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CLIENT_CONFIG))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIENT_CONFIG))
}

/// The app name given on the command line, else the one in `dir`'s spin.toml.
fn resolve_app_name(name: Option<String>, dir: &Path) -> anyhow::Result<String> {
    if let Some(name) = name {
        return Ok(name);
    }
    match app_name_from_dir(dir)? {
        Some(name) => {
            info!("Using app name {} from spin.toml", name);
            Ok(name)
        }
        None => bail!("no app name given and no spin.toml with an app name in {}", dir.display()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries manifests and tables.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let file_cfg: ClientConfigFile = load_config_file(&config_path)
        .with_context(|| format!("failed to load config file {}", config_path.display()))?;
    info!("Config file: {}", config_path.display());

    // Merge: CLI args > config file > defaults
    let explicit_namespace = cli.namespace.clone().or(file_cfg.namespace.clone());
    let namespace = explicit_namespace
        .clone()
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    let client_config = ClientConfig {
        server: cli
            .server
            .clone()
            .or(file_cfg.server.clone())
            .unwrap_or_else(|| DEFAULT_API_ADDR.to_string()),
        token: cli.token.clone().or(file_cfg.token.clone()),
        insecure_skip_tls_verify: cli.insecure_skip_tls_verify
            || file_cfg.insecure_skip_tls_verify.unwrap_or(false),
    };

    match cli.command {
        Commands::Scaffold { args, out } => {
            let opts = args.into_options(explicit_namespace);
            let manifest = pkg_scaffold::scaffold(&opts)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &manifest)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Manifest written to {}", path.display());
                }
                None => print!("{}", manifest),
            }
        }
        Commands::Deploy { args, dry_run } => {
            let opts = args.into_options(Some(namespace.clone()));
            if dry_run {
                print!("{}", pkg_scaffold::scaffold(&opts)?);
                return Ok(());
            }

            let manifest = pkg_scaffold::build_manifest(&opts)?;
            let client = ClusterClient::new(&client_config)?;
            info!("Deploying to {} (namespace {})", client_config.server, namespace);
            for reference in apply_manifest(&client, &namespace, &manifest).await? {
                println!("{} configured", reference);
            }
        }
        Commands::Get { name } => {
            let name = resolve_app_name(name, &std::env::current_dir()?)?;
            let client = ClusterClient::new(&client_config)?;
            let app = client.get_spinapp(&namespace, &name).await?;
            print_apps(&mut std::io::stdout().lock(), &[app], Utc::now())?;
        }
        Commands::List => {
            let client = ClusterClient::new(&client_config)?;
            let apps = client.list_spinapps(&namespace).await?;
            print_apps(&mut std::io::stdout().lock(), &apps, Utc::now())?;
        }
        Commands::Logs { name, follow, tail } => {
            let name = resolve_app_name(name, &std::env::current_dir()?)?;
            let client = ClusterClient::new(&client_config)?;
            let opts = LogOptions {
                follow,
                tail_lines: tail,
            };
            let mut stdout = std::io::stdout();
            client.logs(&namespace, &name, &opts, &mut stdout).await?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "spin-kube",
            "deploy",
            "--from",
            "nginx",
            "--dry-run",
            "-n",
            "apps",
            "--server",
            "https://10.0.0.1:6443",
        ])
        .unwrap();
        assert_eq!(cli.namespace.as_deref(), Some("apps"));
        assert_eq!(cli.server.as_deref(), Some("https://10.0.0.1:6443"));
        assert!(matches!(cli.command, Commands::Deploy { dry_run: true, .. }));
    }

    #[test]
    fn logs_flags() {
        let cli = Cli::try_parse_from(["spin-kube", "logs", "hello", "-f", "--tail", "20"]).unwrap();
        match cli.command {
            Commands::Logs { name, follow, tail } => {
                assert_eq!(name.as_deref(), Some("hello"));
                assert!(follow);
                assert_eq!(tail, Some(20));
            }
            _ => panic!("expected logs"),
        }
    }

    #[test]
    fn app_name_is_optional() {
        let cli = Cli::try_parse_from(["spin-kube", "get"]).unwrap();
        assert!(matches!(cli.command, Commands::Get { name: None }));
        let cli = Cli::try_parse_from(["spin-kube", "logs", "--tail", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Logs { name: None, .. }));
    }

    #[test]
    fn app_name_falls_back_to_spin_toml() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_app_name(None, dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("no app name given"));

        std::fs::write(
            dir.path().join("spin.toml"),
            "spin_manifest_version = 2\n\n[application]\nname = \"hello-rust\"\n",
        )
        .unwrap();
        assert_eq!(resolve_app_name(None, dir.path()).unwrap(), "hello-rust");
        assert_eq!(
            resolve_app_name(Some("other".to_string()), dir.path()).unwrap(),
            "other"
        );
    }
}
