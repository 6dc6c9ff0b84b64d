//! Application layer - command handlers.
//!
//! Handlers wire domain logic to the ports. They own no business rules of
//! their own: orchestration and validation live in `crate::domain`.

pub mod handlers;
