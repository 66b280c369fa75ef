pub mod config;
pub mod controllers;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod server;
pub mod services;
pub mod storage;

pub use config::ServerConfig;
pub use server::{app_config, run, AppState};
