// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod extract;
pub mod file;
pub mod log;
pub mod model;
pub mod progress;
pub mod report;
pub mod runner;
pub mod specs;
pub mod store;

pub use error::{Result, ScrapeError};
