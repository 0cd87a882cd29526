pub mod app;
pub mod config;
pub mod links;
pub mod models;
pub mod omdb;
pub mod release;
pub mod session;
pub mod streaming;
pub mod view;
