pub mod conflict;
pub mod repository;
pub mod types;
pub mod utils;
pub mod view_model;
