pub mod clients;
pub mod config;
pub mod models;
pub mod prompts;
pub mod routes;
pub mod services;
pub mod store;
