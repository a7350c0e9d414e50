pub mod media_transcoder;
pub mod video_source_resolver;

pub use media_transcoder::{AudioFormat, MediaTranscoder};
pub use video_source_resolver::VideoSourceResolver;
