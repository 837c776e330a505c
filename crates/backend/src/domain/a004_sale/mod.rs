pub mod allocation;
pub mod repository;
pub mod service;
