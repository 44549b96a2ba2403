use crate::demo::{run_demo, run_lia_evaluate, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use compliance_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Compliance Hub",
    about = "Score legitimate interest assessments and serve the assessment API",
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
    /// Work with legitimate interest assessments offline
    Lia {
        #[command(subcommand)]
        command: LiaCommand,
    },
    /// Walk through blocked, auto-approved, and scored assessments
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum LiaCommand {
    /// Score a JSON answers file and print the recommendation
    Evaluate(EvaluateArgs),
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
        Command::Lia {
            command: LiaCommand::Evaluate(args),
        } => run_lia_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}
