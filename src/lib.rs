pub mod analyzer;
pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
