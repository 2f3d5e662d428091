//! # HTTP Server Module
//!
//! Serves the REST API over HTTP with request tracing and CORS.

pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
