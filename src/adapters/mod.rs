//! Adapters - Concrete implementations of the ports.
//!
//! Everything that touches the outside world (the Gemini API, storage) lives
//! here, behind the interfaces defined in `crate::ports`.

pub mod ai;
pub mod persistence;
