//! Data models for Scallion

mod tweet;
mod upload;

pub use tweet::Tweet;
pub use upload::MediaUpload;
