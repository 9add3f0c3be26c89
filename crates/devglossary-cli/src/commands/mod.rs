//! Command implementations.

pub mod import;
pub mod init;
pub mod parse;

pub use self::import::execute_import;
pub use self::init::execute_init;
pub use self::parse::execute_parse;
