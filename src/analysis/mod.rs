pub mod finding;
pub mod rules;
