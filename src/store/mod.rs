pub mod client;
pub mod error;
pub mod memory;
pub mod record;

pub use client::*;
pub use error::*;
pub use memory::*;
pub use record::*;
