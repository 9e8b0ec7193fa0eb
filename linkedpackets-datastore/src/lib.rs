mod error;

pub mod datastore;
pub mod model;
pub mod models;

pub use datastore::Datastore;
pub use error::Error;
pub use model::Model;

pub type Result<T> = std::result::Result<T, Error>;
