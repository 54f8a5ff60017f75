use clap::Parser;

mod train;

/// Evolves neural networks that play snake.
///
/// Resumes from the population snapshot in the working directory when one
/// matches the built-in settings, and saves a new snapshot after every
/// generation.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs {} = CommandArgs::parse();
    train::run()
}
