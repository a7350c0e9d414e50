pub mod itag;
pub mod mime_type;
pub mod proxy_config;
pub mod video_source;

pub use itag::Itag;
pub use mime_type::MimeType;
pub use proxy_config::ProxyConfig;
pub use video_source::VideoSource;
