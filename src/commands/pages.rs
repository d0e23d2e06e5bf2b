//! `playport pages` command.

use super::{finish_pass, Workspace};
use crate::config::PassKind;
use crate::context::ServiceContext;
use crate::migrate::pipeline::{run_pass, PassPlan};
use crate::migrate::MigrationReport;

/// Converts every page object in one generation call.
///
/// # Errors
///
/// Returns an error string if the generation call fails.
pub async fn run(ctx: &ServiceContext, workspace: &Workspace) -> Result<MigrationReport, String> {
    let plan = PassPlan {
        kind: PassKind::Pages,
        config: &workspace.config,
        input_root: &workspace.input,
        output_root: &workspace.output,
        context: Vec::new(),
    };
    finish_pass(run_pass(ctx, &plan).await)
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::commands::test_support::{global, write};
    use crate::commands::resolve_workspace;
    use crate::context::ServiceContext;
    use crate::ports::llm::fake::CannedLlm;

    #[tokio::test]
    async fn pages_command_writes_into_pages_folder() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write(input.path(), "src/main/java/LoginPage.java", "class LoginPage {}");
        let ctx = ServiceContext::with_llm(Box::new(CannedLlm::new(
            "```typescript\nexport class LoginPage {}\n```\n---*---\n",
        )));
        let workspace = resolve_workspace(&ctx, &global(input.path(), output.path())).unwrap();

        let report = run(&ctx, &workspace).await.unwrap();
        assert_eq!(report.written(), 1);
        let written = output.path().join("src/pages/LoginPage.ts");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "export class LoginPage {}");
    }

    #[tokio::test]
    async fn pages_command_fails_on_empty_response() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write(input.path(), "LoginPage.java", "class LoginPage {}");
        let ctx = ServiceContext::with_llm(Box::new(CannedLlm::new("")));
        let workspace = resolve_workspace(&ctx, &global(input.path(), output.path())).unwrap();

        assert!(run(&ctx, &workspace).await.is_err());
        assert!(!output.path().join("src/pages").exists());
    }
}
