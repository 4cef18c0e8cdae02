pub mod listings;
pub mod photos;
