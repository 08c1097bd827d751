// src/bin/pixel_vault.rs
//! pixel-vault CLI — reveal, seal, keygen

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixel_vault::config::CipherParams;
use pixel_vault::export::to_json_response_pretty;
use pixel_vault::seal::seal_file;
use pixel_vault::{load_config, Passkey, Pipeline, Source};
use rpassword::read_password;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pixel-vault", about = "Reveal passkey-sealed images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decrypt the configured source and print data URIs
    Reveal {
        /// File or directory of ciphertext images (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Print the {"images": [...]} JSON body instead of one URI per line
        #[arg(long)]
        json: bool,
    },
    /// Seal a plaintext image into a ciphertext PNG
    Seal {
        /// Plaintext image
        input: PathBuf,
        /// Ciphertext PNG to write
        output: PathBuf,
    },
    /// Print a fresh random salt and nonce as hex
    Keygen,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Reveal { source, json } => {
            let config = load_config().context("failed to load configuration")?;
            let pipeline = Pipeline::from_config(&config)
                .context("salt/nonce configuration is invalid — set PV_SALT and PV_NONCE")?;
            let path = source.unwrap_or_else(|| config.source.path.clone());
            let source = Source::resolve(&path)
                .with_context(|| format!("cannot open source {}", path.display()))?;
            info!("revealing {source}");

            let passkey = prompt_passkey()?;
            let batch = pipeline.run(&source, &passkey)?;

            if json {
                println!("{}", to_json_response_pretty(&batch)?);
            } else {
                for uri in batch.iter() {
                    println!("{uri}");
                }
            }
        }
        Command::Seal { input, output } => {
            let config = load_config().context("failed to load configuration")?;
            let params = config
                .cipher_params()
                .context("salt/nonce configuration is invalid — set PV_SALT and PV_NONCE")?;
            let passkey = prompt_passkey()?;
            seal_file(&input, &output, &passkey, &params)
                .with_context(|| format!("failed to seal {}", input.display()))?;
            println!("sealed {} → {}", input.display(), output.display());
        }
        Command::Keygen => {
            let params = CipherParams::generate();
            println!("PV_SALT={}", params.salt_hex());
            println!("PV_NONCE={}", params.nonce_hex());
        }
    }

    Ok(())
}

fn prompt_passkey() -> Result<Passkey> {
    eprint!("Passkey: ");
    std::io::stderr().flush()?;
    let input = read_password().context("failed to read passkey")?;
    Ok(Passkey::new(input))
}
