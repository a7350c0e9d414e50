pub mod cli_controller;
pub mod download_orchestrator;
pub mod errors;

pub use cli_controller::ejecutar_cli;
pub use download_orchestrator::{IntermediateCleanup, VideoDownloader};
pub use errors::DownloadError;
