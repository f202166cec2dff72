//! # Roster Service
//!
//! Business rules for users and the cache-aside layer in front of the
//! persistence gateway.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
