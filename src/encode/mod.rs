pub mod ffmpeg;
pub mod files;
pub mod sink;
