// Library for tests to access modules

pub mod config;
pub mod docker_repo;
pub mod error;
pub mod health;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod sysinfo_repo;
pub mod version;
