//! SpecSteg CLI library.
//!
//! This crate provides the command implementations behind the `specsteg`
//! binary: codec option resolution, console progress, and the `encode`,
//! `decode`, `compare` and `config` commands.

pub mod commands;
pub mod options;
pub mod progress;
