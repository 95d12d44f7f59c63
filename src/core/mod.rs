pub mod app;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod fallback;
pub mod paths;
pub mod repair;
pub mod response;
pub mod settings;
pub mod text;
pub mod transport;
