// Public API surface of the launcher module.
pub mod adapter;
pub mod profiles;
pub mod session;
