pub mod collector;
pub mod json;
pub mod platform;
pub mod process;
pub mod snapshot;
pub mod source;
