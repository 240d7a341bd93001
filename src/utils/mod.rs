pub mod files;
pub mod languages;
pub mod support;
