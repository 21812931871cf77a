//! Concrete token sources for hosting platforms.

pub mod github;
