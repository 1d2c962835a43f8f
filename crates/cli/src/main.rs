use std::process::ExitCode;

use clap::Parser;
use log::info;
use rust_prompts_cli::cli_args::Args;
use rust_prompts_cli::questions::{appearance, ask};
use rust_prompts_core::error::Result;
use rust_prompts_core::prompt::Prompt;

fn execute() -> Result<()> {
    let args = Args::parse();

    let mut prompt = Prompt::stdout().with_appearance(appearance(&args));
    let answers = ask(&mut prompt, &args.command)?;
    info!("Collected {} answers", answers.len());

    for answer in answers {
        println!("{answer}");
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
