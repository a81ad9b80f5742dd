//! Meal max smoke test
//!
//! Runs an ordered list of HTTP checks against the meal max API and stops at
//! the first response that lacks its expected marker.

use clap::Parser;
use meal_max_smoke::commands::{Commands, RunArgs};
use meal_max_smoke::{cli, common};

#[derive(Parser)]
#[command(name = "smoketest", about = "Fail-fast smoke test for the meal max API")]
#[command(version, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments for the implicit `run`
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Usage errors exit 1, not clap's default 2; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let command = cli.command.unwrap_or(Commands::Run(cli.run));
    let verbose = matches!(&command, Commands::Run(args) if args.verbose);
    common::logging::init_cli(verbose);

    match cli::dispatch(command).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
