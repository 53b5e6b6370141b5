// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod probe_ffprobe;
pub mod thumbs_ffmpeg;

// Re-export adapters
pub use exec_ffmpeg::FfmpegExecAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use thumbs_ffmpeg::FfmpegThumbnailAdapter;
