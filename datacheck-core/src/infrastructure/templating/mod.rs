// datacheck-core/src/infrastructure/templating/mod.rs

pub mod jinja;

pub use jinja::{ERROR_TEMPLATE, JinjaRenderer, NOT_FOUND_TEMPLATE, REPORT_TEMPLATE};
