pub mod cli;
pub mod config;
pub mod metrics;
pub mod node;
pub mod recovery;
pub mod wallet;
