//! Clinical risk and severity score calculators with a parameter-name
//! matcher, validation, and a JSON calculation log.

pub mod catalog;
pub mod config;
pub mod matcher;
pub mod output;
pub mod scoring;
pub mod store;
