//! Meadowlark Travel site library.
//!
//! This crate provides the site as a library, allowing the request
//! pipeline to be tested without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_app;
