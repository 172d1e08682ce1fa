// datacheck-core/src/lib.rs

// 1. Documentation is not enforced yet
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Domain (business core)
// Table model, column classification, check battery, report model.
// Depends on nothing else (neither infra nor app).
pub mod domain;

// 2. Infrastructure (Adapters)
// File loaders (CSV, Excel, JSON), Jinja templates, config files, upload intake.
// Depends on the Domain and on the application ports.
pub mod infrastructure;

// 3. Application (Use Cases)
// Orchestration: load -> evaluate -> build -> render -> persist.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use datacheck_core::DataCheckError;
pub use error::DataCheckError;
