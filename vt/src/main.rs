//! Valet CLI entry point
//!
//! Thin driver: wires config, logging, the LLM client, and the built-in
//! action registry together, runs one goal through the agent, and prints
//! the result. Ctrl-C cancels the in-flight plan.

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use valet::agent::Agent;
use valet::cli::Cli;
use valet::config::Config;
use valet::domain::ExecutionResult;
use valet::executor::cancel_channel;
use valet::llm::create_client;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

fn print_steps(result: &ExecutionResult) {
    eprintln!("\nsteps ({}):", result.run_id);
    for record in &result.records {
        let duration = record
            .duration_ms()
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "-".to_string());
        let detail = record
            .output
            .as_deref()
            .or(record.error.as_deref())
            .unwrap_or_default();
        eprintln!("  {:<6} {:<10} {:>8}  {}", record.step_id, record.status.to_string(), duration, detail);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(provider = %config.llm.provider, model = %config.llm.model, "valet starting");

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let registry = Arc::new(actionhub::builtin_registry());
    let schema = registry.schema();
    let agent = Agent::new(llm, registry, schema, &config);

    // Ctrl-C cancels the in-flight plan instead of killing the process
    let (cancel_tx, cancel_rx) = cancel_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let result = agent.handle_goal_with_cancel(&cli.goal_text(), cancel_rx).await;

    println!("{}", result.message);
    if cli.show_steps {
        print_steps(&result);
    }

    if !result.succeeded {
        std::process::exit(1);
    }
    Ok(())
}
