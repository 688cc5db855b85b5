//! Bilin - English/Chinese Text Translation
//!
//! A Rust implementation of a bidirectional English/Chinese translator that
//! delegates to interchangeable LLM backends (Gemini, Zhipu GLM).

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod probe;
pub mod provider;
pub mod selector;
pub mod task;
