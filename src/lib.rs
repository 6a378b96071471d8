pub mod analyzers;
pub mod data;
pub mod error;
pub mod output;
pub mod repository;
