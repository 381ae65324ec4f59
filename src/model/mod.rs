pub mod annotation;
pub mod config;
pub mod record;
pub mod sequence;
