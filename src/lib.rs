// src/lib.rs

//! Storefront backend library.
//!
//! Product catalog CRUD and user profile routes over actix-web, backed by
//! PostgreSQL. The binary in `main.rs` wires configuration, the connection
//! pool and the HTTP server; everything else lives here so integration
//! tests can drive the full application in-process.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;
