pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repos;
pub mod seed;

pub use error::{RepoError, RepoResult};
