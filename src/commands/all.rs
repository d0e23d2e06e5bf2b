//! `playport all` command.

use tracing::info;

use super::{init, pages, specs, Workspace};
use crate::context::ServiceContext;

/// Scaffolds the output project, then converts page objects, then tests.
///
/// A failed page pass stops the run before tests are converted.
///
/// # Errors
///
/// Returns the first error from any step.
pub async fn run(ctx: &ServiceContext, workspace: &Workspace) -> Result<(), String> {
    init::run(ctx, workspace)?;
    let page_report = pages::run(ctx, workspace).await?;
    let spec_report = specs::run(ctx, workspace).await?;
    info!(
        pages = page_report.written(),
        specs = spec_report.written(),
        failed = page_report.failed() + spec_report.failed(),
        output = %workspace.output.display(),
        "migration finished"
    );
    Ok(())
}
