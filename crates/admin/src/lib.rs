//! Sucursales Admin library.
//!
//! The administration console as a library, so the router can be driven
//! from tests and the binary stays a thin launcher.
//!
//! # Layers
//!
//! - [`backend`] - REST adapters, one per backend resource
//! - [`query`] - Cached reads and invalidating mutations on top of the adapters
//! - [`routes`] - Server-rendered pages and htmx fragments
//! - [`components`] - Toasts, tables and select options shared by the pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod state;
