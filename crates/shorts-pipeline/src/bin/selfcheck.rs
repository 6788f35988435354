use std::path::Path;

use shorts_pipeline::PipelineConfig;
use shorts_providers::{ElevenLabsClient, ReplicateClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;
    dotenvy::dotenv().ok();

    let config = PipelineConfig::from_env();
    println!(
        "shorts-selfcheck: starting with output_dir={}",
        config.output_dir.display()
    );

    ensure_writable(&config.output_dir).await?;
    ensure_env_present(&[
        "OPENAI_API_KEY",
        "ELEVEN_API_KEY",
        "ASSEMBLYAI_API_KEY",
        "REPLICATE_API_TOKEN",
    ])?;
    list_voices().await?;
    show_image_model_version().await?;

    println!("shorts-selfcheck: ok");
    Ok(())
}

async fn ensure_writable(path: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(path).await?;
    let probe = path.join(".selfcheck");
    tokio::fs::write(&probe, b"ok")
        .await
        .map_err(|e| anyhow::anyhow!("{} is not writable: {}", path.display(), e))?;
    tokio::fs::remove_file(&probe).await?;
    Ok(())
}

fn ensure_env_present(vars: &[&str]) -> anyhow::Result<()> {
    for var in vars {
        if std::env::var(var).map(|v| v.is_empty()).unwrap_or(true) {
            return Err(anyhow::anyhow!("missing required env var {}", var));
        }
    }
    Ok(())
}

async fn list_voices() -> anyhow::Result<()> {
    let client = ElevenLabsClient::from_env()?;
    let voices = client.list_voices().await?;

    println!("--- AVAILABLE VOICES ---");
    for voice in voices {
        println!("Name: {} (ID: {})", voice.name, voice.voice_id);
    }
    Ok(())
}

async fn show_image_model_version() -> anyhow::Result<()> {
    let client = ReplicateClient::from_env()?;
    let model = client.image_model().clone();

    match client.latest_version(&model).await? {
        Some(version) => println!("Latest version of {}: {}", model, version),
        None => println!("No published version found for {}", model),
    }
    Ok(())
}
