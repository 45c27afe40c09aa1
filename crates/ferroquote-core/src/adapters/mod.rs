//! Provider adapters implementing [`crate::data_source::DataSource`].

pub mod yahoo;

pub use yahoo::YahooAdapter;
