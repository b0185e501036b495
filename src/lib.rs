//! Client-side content-site engine.
//!
//! The library owns everything a single-page article site needs to stay
//! consistent without full page reloads: a load-once content store with
//! embedded fallback data, a constrained markdown-to-HTML renderer, view
//! builders for article/list/search/category pages, and a URL-driven
//! session that keeps history entries, the rendered content surface and
//! persisted read-state in sync.

pub mod accessibility;
pub mod app;
pub mod config;
pub mod content;
pub mod render;
pub mod router;
pub mod share;
pub mod state;
pub mod views;
