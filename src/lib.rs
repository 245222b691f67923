// Library for tests to access modules

pub mod cli;
pub mod config;
pub mod humanize;
pub mod index;
pub mod models;
pub mod normalize;
pub mod series_repo;
pub mod sysinfo_repo;
pub mod worker;
