//! Bearer credential lifecycle

mod state;
mod token_manager;
mod token_store;

pub use self::state::{generate_state, validate_state};
pub use self::token_manager::TokenManager;
pub use self::token_store::TokenStore;
