use clap::Parser;
use ytgrab::application::ejecutar_cli;
use ytgrab::infrastructure::{AppConfig, FfmpegTranscoder, YtDlpClient};
use ytgrab::presentation::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let config = AppConfig::load();
    let client = YtDlpClient::new();
    let transcoder = FfmpegTranscoder::new();

    ejecutar_cli(cli, config, client, transcoder).await?;

    Ok(())
}
