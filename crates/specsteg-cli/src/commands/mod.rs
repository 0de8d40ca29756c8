//! CLI command implementations

pub mod compare;
pub mod config;
pub mod decode;
pub mod encode;
pub mod json_output;
