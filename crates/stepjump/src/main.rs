//! Command line front end for stepjump.

mod cli;
mod output;

fn main() -> eyre::Result<()> {
    cli::run()
}
