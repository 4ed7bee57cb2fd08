//! CLI command implementations

pub mod assign;
pub mod build;
pub mod combine;
pub mod inspect;
pub mod json_output;
pub mod select;
pub mod submat;
pub mod validate;

mod reporting;
