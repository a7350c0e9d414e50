pub mod errors;
pub mod filename;
pub mod repositories;
pub mod request;
pub mod stream;
pub mod value_objects;

pub use errors::DomainError;
pub use request::{DownloadProgress, DownloadRequest, ProgressCallback};
pub use stream::{StreamInfo, VideoInfo};
