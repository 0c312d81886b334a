use chaturaji::{Cli, Console};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = Console::new(&cli).run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}
