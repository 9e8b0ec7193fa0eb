use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use linkedpackets_utils::keypair::Keypair;

#[derive(Debug, Parser)]
#[command(about = "Create a keypair whose address can sign link messages")]
pub struct Opts {
    #[clap(long)]
    name: Option<String>,

    /// Directory the key file is written to.
    #[clap(long, default_value = ".")]
    dir: PathBuf,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let keypair = Keypair::generate()?;
    let address = keypair.as_public_address();

    let filename = opts.name.clone().unwrap_or_else(|| address.clone());
    let filepath = opts.dir.join(format!("{}.keypair.json", filename));

    if filepath.exists() {
        return Err(anyhow!(
            "Key file already exists at {}. Choose a different name or remove the existing file.",
            filepath.display()
        ));
    }

    keypair.as_json_file(&filepath)?;

    println!("Created a new ID");
    println!("Private key saved to: {}", filepath.display());
    println!("Public address: {}", address);
    println!("\nKeep the private key file secure and never share it.");

    Ok(())
}
