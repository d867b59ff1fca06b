pub mod api;
pub mod config;
pub mod error;
pub mod online;
pub mod platform;
pub mod stream;
pub mod template;
pub mod watchlist;

pub use error::{Error, Result};
