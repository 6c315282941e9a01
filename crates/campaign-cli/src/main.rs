//! Campaign CLI: compose and submit campaign briefs.
//!
//! Set CAMPAIGN_API_URL (default http://localhost:8080/api/campaigns) or pass --base-url.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use campaign_api_client::{ApiClient, GenerateOrchestrator, SubmissionClient, UploadOrchestrator};
use campaign_cli::{
    apply_overrides, build_config, init_tracing, load_brief, parse_products,
    render_generate_outcome, render_upload_outcome, select_png, BriefOverrides,
};
use campaign_core::models::CampaignBrief;

#[derive(Parser)]
#[command(name = "campaign", about = "Campaign brief composer and submitter")]
struct Cli {
    /// API base URL (overrides CAMPAIGN_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Request timeout in seconds (overrides CAMPAIGN_API_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a campaign brief for asset generation
    Generate {
        /// Brief JSON file to start from
        #[arg(long)]
        brief: Option<PathBuf>,
        #[arg(long)]
        campaign_name: Option<String>,
        #[arg(long)]
        target_region: Option<String>,
        #[arg(long)]
        target_audience: Option<String>,
        #[arg(long)]
        campaign_message: Option<String>,
        /// Product to add, repeatable
        #[arg(long = "product", value_name = "NAME::DESCRIPTION::STYLE")]
        products: Vec<String>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload an existing PNG asset for a product
    Upload {
        /// Product name (exact match with the brief)
        #[arg(long)]
        product_name: String,
        /// PNG file to upload
        file: PathBuf,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print an empty brief to start a brief file
    Template,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let connect = || -> anyhow::Result<Arc<dyn SubmissionClient>> {
        let config = build_config(cli.base_url.as_deref(), cli.timeout_secs)?;
        let client: Arc<dyn SubmissionClient> =
            Arc::new(ApiClient::new(config).context("Failed to create API client")?);
        Ok(client)
    };

    match &cli.command {
        Commands::Template => {
            print_json(&CampaignBrief::default())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate {
            brief,
            campaign_name,
            target_region,
            target_audience,
            campaign_message,
            products,
            json,
        } => {
            let initial = match brief {
                Some(path) => load_brief(path)?,
                None => CampaignBrief::default(),
            };
            let overrides = BriefOverrides {
                campaign_name: campaign_name.clone(),
                target_region: target_region.clone(),
                target_audience: target_audience.clone(),
                campaign_message: campaign_message.clone(),
                products: parse_products(products)?,
            };

            let mut orchestrator = GenerateOrchestrator::with_brief(connect()?, initial);
            apply_overrides(orchestrator.brief_mut()?, &overrides)?;

            let outcome = orchestrator.submit().await?;
            if *json {
                print_json(&outcome)?;
            } else {
                println!("{}", render_generate_outcome(&outcome));
            }
            Ok(exit_code(outcome.is_success()))
        }
        Commands::Upload {
            product_name,
            file,
            json,
        } => {
            let image = select_png(file)?;

            let mut orchestrator = UploadOrchestrator::new(connect()?);
            orchestrator.set_product_name(product_name.as_str())?;
            orchestrator.select_file(image)?;

            let outcome = orchestrator.submit().await?;
            if *json {
                print_json(&outcome)?;
            } else {
                println!("{}", render_upload_outcome(&outcome));
            }
            Ok(exit_code(outcome.is_success()))
        }
    }
}
