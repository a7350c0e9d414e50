mod process;

pub mod ffmpeg_transcoder;
pub mod ytdlp_client;

pub use ffmpeg_transcoder::FfmpegTranscoder;
pub use ytdlp_client::YtDlpClient;
