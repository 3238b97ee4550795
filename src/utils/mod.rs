//! Small helpers shared by the controllers.

pub mod debounce;
