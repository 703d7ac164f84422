pub mod auth;
pub mod config;
pub mod content;
pub mod route;
pub mod tools;
pub mod utils;
