//! dynstr: growable, length-tracked byte strings
//!
//! [`DynString`] keeps an explicit capacity with a `0` sentinel after the
//! content, grows with a configurable slack, and supports search, resumable
//! replacement, slicing, classification and line I/O. Each module also
//! exposes free functions that take `Option` operands and treat `None` as a
//! no-op. The `dynstr` binary at src/main.rs is a line filter built on top.

pub mod buffer;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod error_helpers;
pub mod filter;
pub mod io;
pub mod logger;
pub mod replace;
pub mod search;
pub mod slice;
pub mod transform;

// Re-export commonly used types for convenience
pub use buffer::{DEFAULT_CAPACITY, DEFAULT_GROWTH_SLACK, DynString, GrowthPolicy};
pub use error::{GrowError, IntegerError};
pub use filter::{LineFilter, LineOp, LineReport};
pub use replace::ReplaceCursor;
