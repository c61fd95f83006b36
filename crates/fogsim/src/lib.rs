#![doc = include_str!("../readme.md")]

pub mod allocation;
pub mod config;
pub mod error;
pub mod experiment;
pub mod mobility;
pub mod scorer;
pub mod service_performance;
