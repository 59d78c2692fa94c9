pub mod services;
pub mod utils;

pub use utils::ResultExt;
