#![deny(warnings)]

pub mod align;
pub mod config;
pub mod dataset;
pub mod infer;
pub mod metrics;
pub mod report;
pub mod transcript;
