use clap::Parser;
use cli::Cli;

mod cli;
mod convert;
pub mod helpers;
mod reconstruct;
mod summary;

fn main() {
    if let Err(err) = Cli::parse().execute() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
