//! Sucursales Core - Shared domain types.
//!
//! This crate provides the types used across all Sucursales components:
//! - `admin` - Server-rendered administration console
//! - `cli` - Command-line access to the same backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. The backend stays an opaque REST service; everything here
//! is either its wire shape or logic derived client-side from it.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and validated value types (phone, email, coordinates, times)
//! - [`models`] - Branch, staff and schedule entities and their DTOs
//! - [`schedule`] - Opening-window validation and the shared duration formatter
//! - [`forms`] - Form aggregates that validate input and build DTOs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod forms;
pub mod models;
pub mod schedule;
pub mod types;

pub use models::*;
pub use schedule::{OpeningWindow, ScheduleError, format_duration};
pub use types::*;
