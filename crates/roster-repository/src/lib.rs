//! # Roster Repository
//!
//! Persistence gateway for users.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! PgUserRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```
//!
//! [`InMemoryUserRepository`] implements the same trait without a database.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::*;
pub use pool::*;
pub use postgres::*;
pub use traits::*;
