pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod detail;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod pages;
pub mod posts;
pub mod session;
