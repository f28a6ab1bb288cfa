//! Core types for pinout.

mod attribute;
mod chunk;
mod filter;
mod message;
mod outcome;
mod record;

pub use attribute::*;
pub use chunk::*;
pub use filter::*;
pub use message::*;
pub use outcome::*;
pub use record::*;
