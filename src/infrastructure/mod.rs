pub mod backends;
pub mod documents;
