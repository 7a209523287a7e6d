pub mod calculator;
pub mod config;
pub mod import;
pub mod lap;
pub mod lap_log;
pub mod list;
pub mod log;
pub mod project;
