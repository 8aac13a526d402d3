pub mod characteristics;
pub mod collector;
pub mod errors;
pub mod listing;
pub mod locale;
pub mod pipeline;
pub mod price;
pub mod site;
pub mod url_list;
pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod testing;
