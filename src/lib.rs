pub mod adb;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod theme;
pub mod tui;
