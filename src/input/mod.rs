mod config;
mod description;
mod issue;
mod log_file;

pub use config::*;
pub use description::*;
pub use issue::*;
pub use log_file::*;
