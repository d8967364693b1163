// Infrastructure layer - external dependencies and adapters
pub mod config;
pub mod http_repository;
