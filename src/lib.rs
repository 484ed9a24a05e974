pub mod cli;
pub mod config;
pub mod error;
pub mod fixture;
pub mod probe;
pub mod report;
pub mod runner;
pub mod service;
pub mod util;
