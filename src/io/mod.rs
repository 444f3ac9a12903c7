pub mod config_io;
pub mod store_io;

pub use config_io::*;
pub use store_io::*;
