use crate::demo::{run_demo, run_digest_report, run_trip_report, DemoArgs, DigestArgs, TripsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use voyage_ops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Travel Ops Copilot",
    about = "Demonstrate and run the travel operations copilot from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the prioritized follow-up digest from the sample batch
    Digest(DigestArgs),
    /// Print the trip health report from the sample batch
    Trips(TripsArgs),
    /// Run an end-to-end CLI demo covering triage and trip health
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Digest(args) => run_digest_report(args),
        Command::Trips(args) => run_trip_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
