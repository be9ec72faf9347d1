pub mod error;
pub mod job;
pub mod transform;
pub mod watermark;
