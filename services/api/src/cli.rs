use crate::commands::{run_register, run_validate, RegisterArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use employee_registry::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Employee Registration Gateway",
    about = "Validate employee registrations and forward them to the employee registry",
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
    /// Check a registration request file against the admission rules without calling the registry
    Validate(ValidateArgs),
    /// Run one registration request file through the full pipeline
    Register(RegisterArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured employee registry base URL
    #[arg(long)]
    pub(crate) registry_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Register(args) => run_register(args).await,
    }
}
