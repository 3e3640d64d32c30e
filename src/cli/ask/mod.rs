//! Ask command - answers one question from the command line

use clap::Args;
use serde_json::json;

use crate::api::process::status_for;
use crate::domain::pipeline::PipelineOutcome;

#[derive(Args, Clone, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(short, long)]
    pub message: String,
}

/// Run the pipeline once and print the HTTP status and message `/process` would return
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state_with_config(&config).await?;

    let outcome = state.pipeline.answer(&args.message).await;
    state.shutdown().await;

    println!("{}", render(&outcome)?);

    Ok(())
}

fn render(outcome: &PipelineOutcome) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&json!({
        "status": status_for(outcome).as_u16(),
        "outcome": outcome.label(),
        "message": outcome.user_message(),
    }))?)
}
