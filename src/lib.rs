// Library exports for testing
pub mod app;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod rename_log;
pub mod renamer;
pub mod selector;
