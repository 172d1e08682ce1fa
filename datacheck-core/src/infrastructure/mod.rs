// datacheck-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod fs;
pub mod intake;
pub mod loaders;
pub mod templating;

pub use intake::{StoredUpload, UploadIntake};
pub use loaders::FileTableLoader;
pub use templating::JinjaRenderer;
