// Library for tests to access modules

pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod ctl_repo;
pub mod error;
pub mod models;
pub mod parser;
pub mod probe;
pub mod report;
pub mod version;
