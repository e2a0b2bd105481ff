pub mod backend;
pub mod bulk;
pub mod documents;
pub mod elastic;
pub mod indices;
pub mod query;
pub mod schema;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
