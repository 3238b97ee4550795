//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: contact form submission and delivery
//! - Site events: navigation, scrolling, resizing and animation triggers

pub mod network;
pub mod site;
