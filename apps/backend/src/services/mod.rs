pub mod sessions;
pub mod speech;
