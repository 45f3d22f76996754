use std::process;

use clap::Parser;
use tyme::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    match cli::run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("tyme: {:#}", anyhow::Error::from(e));
            process::exit(1);
        }
    }
}
