use anyhow::Result;
use clap::Parser;
use soil_extract::cli;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    // Config and logging setup can fail before a subscriber exists.
    if let Err(err) = cli::dispatch(args) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
