//! Game rule implementations.
//!
//! Only Connect 4 lives here today; the [`crate::GameState`] trait keeps the
//! engine decoupled from the rules so the module can grow.

pub mod connect4;
