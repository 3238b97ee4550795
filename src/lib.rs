//! Contact form and page interaction scripts for the Aventura Travel website.
//!
//! The controllers are plain Rust over the page binding traits in [`page`];
//! on `wasm32` the `web` module binds them to the live DOM.

pub mod analytics;
pub mod app;
pub mod config;
pub mod contact;
pub mod error;
pub mod events;
pub mod interaction;
pub mod logger;
pub mod page;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod web;
