//! `playport tests` command.

use super::{finish_pass, Workspace};
use crate::config::PassKind;
use crate::context::ServiceContext;
use crate::migrate::pipeline::{run_pass, test_pass_context, PassPlan};
use crate::migrate::MigrationReport;

/// Converts every test class, with the page objects as context.
///
/// # Errors
///
/// Returns an error string if the generation call fails.
pub async fn run(ctx: &ServiceContext, workspace: &Workspace) -> Result<MigrationReport, String> {
    let context =
        test_pass_context(ctx, &workspace.config, &workspace.input, &workspace.output);
    let plan = PassPlan {
        kind: PassKind::Tests,
        config: &workspace.config,
        input_root: &workspace.input,
        output_root: &workspace.output,
        context,
    };
    finish_pass(run_pass(ctx, &plan).await)
}
