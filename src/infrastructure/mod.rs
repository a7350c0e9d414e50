pub mod config;
pub mod errors;
pub mod external;

pub use config::AppConfig;
pub use errors::InfrastructureError;
pub use external::{FfmpegTranscoder, YtDlpClient};
