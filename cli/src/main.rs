//! stels-wallet: create keys, sign, verify and submit STELS asset transfers.

mod commands;

use clap::Parser;
use std::path::PathBuf;

use stels_crypto::AddressFormat;
use stels_utils::LogFormat;
use stels_wallet_core::WalletConfig;

#[derive(Parser, Debug)]
#[command(name = "stels-wallet", version, about = "STELS asset transfer wallet")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, global = true, env = "STELS_CONFIG")]
    config: Option<PathBuf>,

    /// Node API endpoint for `submit`.
    #[arg(long, global = true, env = "STELS_NODE_URL")]
    node_url: Option<String>,

    /// Recipient address scheme: "basic" or "checksummed".
    #[arg(long, global = true, env = "STELS_ADDRESS_FORMAT")]
    address_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "STELS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, global = true, env = "STELS_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct KeystoreArgs {
    /// Encrypted keystore file.
    #[arg(long, env = "STELS_KEYSTORE")]
    keystore: PathBuf,

    /// Name of the environment variable holding the keystore password.
    #[arg(long, default_value = "STELS_PASSWORD")]
    password_env: String,
}

#[derive(clap::Args, Debug)]
struct TransferArgs {
    /// Token genesis document (JSON).
    #[arg(long, env = "STELS_GENESIS")]
    genesis: PathBuf,

    /// Recipient address.
    #[arg(long)]
    to: String,

    /// Amount as a decimal string, e.g. "10.50".
    #[arg(long)]
    amount: String,

    /// Fee as a decimal string, e.g. "0.01".
    #[arg(long)]
    fee: String,

    #[arg(long)]
    memo: Option<String>,

    /// Hash of the sender's previous transaction.
    #[arg(long)]
    prev_hash: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Generate a key pair and write it to an encrypted keystore.
    Keygen {
        #[arg(long)]
        out: PathBuf,

        /// Name of the environment variable holding the new password.
        #[arg(long, default_value = "STELS_PASSWORD")]
        password_env: String,

        /// Record this address instead of the one derived from the key.
        #[arg(long)]
        address: Option<String>,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Build and sign a transfer; print the signed transaction.
    Sign {
        #[command(flatten)]
        key: KeystoreArgs,

        #[command(flatten)]
        transfer: TransferArgs,

        /// Also write the signed transaction to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Verify a signed transaction file against a genesis document.
    Verify {
        #[arg(long, env = "STELS_GENESIS")]
        genesis: PathBuf,

        #[arg(long)]
        tx: PathBuf,
    },

    /// Build, sign and submit a transfer to the node.
    Submit {
        #[command(flatten)]
        key: KeystoreArgs,

        #[command(flatten)]
        transfer: TransferArgs,

        /// Session token sent in the `stels-session` header.
        #[arg(long, env = "STELS_SESSION", hide_env_values = true)]
        session: String,

        /// Write the signed transaction here before submitting.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// File settings overlaid with flags and environment.
fn resolve_config(cli: &Cli) -> anyhow::Result<WalletConfig> {
    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_toml_file(path)?,
        None => WalletConfig::default(),
    };

    if let Some(url) = &cli.node_url {
        config.node_url = url.clone();
    }
    if let Some(format) = &cli.address_format {
        config.address_format = format.parse::<AddressFormat>()?;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let log_format: LogFormat = config.log_format.parse()?;
    stels_utils::init_logging(log_format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::debug!("loaded config from {}", path.display());
    }

    match cli.command {
        Command::Keygen {
            out,
            password_env,
            address,
            force,
        } => commands::keygen(&out, &password_env, address, force),
        Command::Sign { key, transfer, out } => {
            commands::sign(&config, &key, &transfer, out.as_deref())
        }
        Command::Verify { genesis, tx } => commands::verify(&genesis, &tx),
        Command::Submit {
            key,
            transfer,
            session,
            out,
        } => commands::submit(&config, &key, &transfer, &session, out.as_deref()).await,
    }
}
