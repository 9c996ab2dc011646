//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside any one handler.

pub mod trace;

pub use trace::Trace;
