//! Ethereum transaction codec CLI.
//!
//! # Usage
//!
//! ```bash
//! # Decode a raw transaction to JSON
//! ethtx decode --tx-hex 0x02f874...
//!
//! # Print the transaction hash and signing hash
//! ethtx hash --tx-hex 0xf86c...
//!
//! # Print the recovered sender
//! ethtx sender --tx-hex 0xf86c...
//! ```
//!
//! Set `RUST_LOG=debug` to see decoder logs.

use clap::{Parser, Subcommand};

use ethtx::crypto::to_checksum_address;
use ethtx::{decode_with, DecodeConfig, Tx, TxError, TxFields, MAX_RLP_DEPTH, MAX_TX_SIZE};

#[derive(Parser, Debug)]
#[command(name = "ethtx", about = "Decode and hash Ethereum transactions")]
struct Cli {
    /// Largest accepted transaction, in bytes
    #[clap(long, global = true, default_value_t = MAX_TX_SIZE)]
    max_tx_size: usize,

    /// Deepest accepted RLP list nesting
    #[clap(long, global = true, default_value_t = MAX_RLP_DEPTH)]
    max_depth: usize,

    #[clap(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Decode a raw transaction and print it as JSON
    Decode {
        #[clap(long)]
        tx_hex: String,
    },
    /// Print the transaction hash and signing hash
    Hash {
        #[clap(long)]
        tx_hex: String,
    },
    /// Print the recovered sender address
    Sender {
        #[clap(long)]
        tx_hex: String,
    },
}

fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| format!("Invalid hex: {}", e))
}

fn decode_tx(tx_hex: &str, config: &DecodeConfig) -> Result<Tx, Box<dyn std::error::Error>> {
    let data = parse_hex(tx_hex)?;
    Ok(decode_with(&data, config)?)
}

fn handle_cli_command(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DecodeConfig {
        max_tx_size: cli.max_tx_size,
        max_depth: cli.max_depth,
    };

    match &cli.command {
        CliCommand::Decode { tx_hex } => {
            let tx = decode_tx(tx_hex, &config)?;
            let output = serde_json::json!({
                "type": tx.tx_type().to_string(),
                "hash": tx.tx_hash()?,
                "sender": to_checksum_address(&tx.sender()),
                "fields": TxFields::from(&tx),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        CliCommand::Hash { tx_hex } => {
            let tx = decode_tx(tx_hex, &config)?;
            println!("Transaction hash: {}", tx.tx_hash()?);
            println!("Signing hash: {}", tx.signing_hash()?);
        }
        CliCommand::Sender { tx_hex } => {
            let tx = decode_tx(tx_hex, &config)?;
            println!("{}", to_checksum_address(&tx.sender()));
        }
    }
    Ok(())
}

/// Formats an error, prefixed with its codec error code when it has one.
fn describe_error(e: &(dyn std::error::Error + 'static)) -> String {
    match e.downcast_ref::<TxError>() {
        Some(tx_err @ TxError::MalformedRlp(rlp)) => {
            format!("[0x{:02x}/0x{:02x}] {}", tx_err.code(), rlp.code(), e)
        }
        Some(tx_err) => format!("[0x{:02x}] {}", tx_err.code(), e),
        None => e.to_string(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    log::debug!("running {:?}", cli.command);

    if let Err(e) = handle_cli_command(&cli) {
        eprintln!("Error: {}", describe_error(e.as_ref()));
        std::process::exit(1);
    }
}
