// datacheck/src/commands/validate.rs
//
// USE CASE: Validate a file that already sits in the upload directory.

use std::path::Path;

use super::{build_service, deliver};

pub fn execute(config: Option<&Path>, name: &str, stdout: bool) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let result = service.validate_stored(name);
    deliver(&service, result, stdout)
}
