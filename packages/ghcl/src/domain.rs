pub mod changelog;
pub mod models;
