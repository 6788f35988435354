//! Run the asset pipeline from the command line.
//!
//! Usage: `generate-assets <voice> <script> [prompt...]`
//!
//! Prompts are applied to segments by position. `USE_VIDEO=false` switches to
//! still images.

use anyhow::Context;
use tracing::{error, info};

use shorts_pipeline::{logging, AssetPipeline, PipelineConfig, Providers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    dotenvy::dotenv().ok();
    logging::init_tracing()?;

    let mut args = std::env::args().skip(1);
    let (voice, script) = match (args.next(), args.next()) {
        (Some(voice), Some(script)) => (voice, script),
        _ => {
            eprintln!("usage: generate-assets <voice> <script> [prompt...]");
            std::process::exit(2);
        }
    };
    let prompts: Vec<String> = args.collect();

    let use_video = std::env::var("USE_VIDEO")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);

    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let providers = Providers::from_env().context("building provider clients")?;
    let pipeline = AssetPipeline::new(providers, config);

    let custom_prompts = if prompts.is_empty() { None } else { Some(prompts) };
    match pipeline
        .run_asset_pipeline(&script, &voice, custom_prompts, None, use_video)
        .await
    {
        Ok(document) => {
            println!("{}", document.to_json_pretty()?);
            Ok(())
        }
        Err(e) => {
            error!("Asset generation failed: {}", e);
            Err(e.into())
        }
    }
}
