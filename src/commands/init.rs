//! `playport init` command.

use std::path::PathBuf;

use super::Workspace;
use crate::context::ServiceContext;
use crate::project::{read_project_info, Scaffold};

/// Writes the Playwright project skeleton into the output folder.
///
/// # Errors
///
/// Returns an error string if the project descriptor cannot be read or a
/// skeleton file cannot be written.
pub fn run(ctx: &ServiceContext, workspace: &Workspace) -> Result<Vec<PathBuf>, String> {
    let info = read_project_info(ctx.fs.as_ref(), &workspace.input)?;
    let written = Scaffold::new(ctx.fs.as_ref(), &workspace.output, &info).write_all()?;
    println!(
        "Initialized {} {} in {}",
        info.name,
        info.version,
        workspace.output.display()
    );
    Ok(written)
}
