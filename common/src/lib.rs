pub mod result;
pub mod utils;
