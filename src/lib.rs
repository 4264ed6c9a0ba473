// src/lib.rs
pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod export;
pub mod graph;
pub mod loader;
pub mod reporting;
pub mod types;
