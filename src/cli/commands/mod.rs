pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod lap;
pub mod list;
pub mod log;
pub mod new;
