//! Page interaction module.
//!
//! This module contains the behaviour shared by every page of the site:
//! - Navigation menu toggling and active link highlighting
//! - Header appearance on scroll and smooth anchor scrolling
//! - Entrance and hover animations for cards

mod animation;
mod controller;
mod navigation;
mod scroll;

pub use animation::{root_margin, SubjectStyle};
pub use controller::InteractionController;
pub use scroll::HeaderStyle;
