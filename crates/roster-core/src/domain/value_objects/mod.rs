//! Domain value objects.

mod record_state;

pub use record_state::*;
