use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Storefront HTTP server")]
pub struct Cli {
    /// Apply pending database migrations before starting the server.
    #[arg(long)]
    pub migrate: bool,
}
