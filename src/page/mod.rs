//! Routing: request paths to page metadata, and the head each navigation
//! mounts.

mod navigator;
mod route;

pub use navigator::Navigator;
pub use route::{Resolved, Route, Router};
