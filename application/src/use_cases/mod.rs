//! Application use cases.

pub mod handle_turn;
