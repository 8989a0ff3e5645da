pub mod backup;
pub mod config;
pub mod event;
pub mod finish;
pub mod init;
pub mod list;
pub mod log;
pub mod start;
