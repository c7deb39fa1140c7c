pub mod config;
pub mod input;
pub mod region;
pub mod report;
pub mod scoring;
