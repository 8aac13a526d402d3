pub mod errors;
pub mod protected;
pub mod traits;
pub mod unprotected;
