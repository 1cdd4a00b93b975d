pub mod config;
pub mod instruments;
pub mod mapper;
pub mod song;
