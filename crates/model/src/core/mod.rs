pub mod timestamp;
pub mod value;
