//! Drives one migration pass end to end.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use super::batch::{append_context, build_payload, load_contents};
use super::error::MigrationError;
use super::extract::CodeBlockExtractor;
use super::gateway::generate;
use super::output::{dest_path, write_all};
use super::prompts::{payload_header, system_prompt};
use super::report::MigrationReport;
use super::scan::{scan, ScanFilter};
use super::split::{split, trim_trailing_blank};
use super::unit::MigrationUnit;
use crate::config::{MigrationConfig, PassKind};
use crate::context::ServiceContext;

/// Pattern identifying generated page objects in the output project.
const GENERATED_PAGE_PATTERN: &str = "Page.ts";

/// Inputs of a single pass.
#[derive(Debug, Clone)]
pub struct PassPlan<'a> {
    /// Which pass to run.
    pub kind: PassKind,
    /// Full settings; the pass reads its own section.
    pub config: &'a MigrationConfig,
    /// Root of the project being migrated.
    pub input_root: &'a Path,
    /// Root of the generated project.
    pub output_root: &'a Path,
    /// Extra blocks appended after the file blocks.
    pub context: Vec<String>,
}

impl PassPlan<'_> {
    /// Folder the pass writes into.
    #[must_use]
    pub fn dest_folder(&self) -> PathBuf {
        self.output_root.join(&self.config.pass(self.kind).output_subdir)
    }
}

/// Scans, batches, generates, splits and writes one pass.
///
/// A gateway failure aborts before anything is written. Every other problem
/// is confined to the unit it affects and shows up in the report.
///
/// # Errors
///
/// Returns [`MigrationError::Gateway`] if generation fails or returns no text.
pub async fn run_pass(
    ctx: &ServiceContext,
    plan: &PassPlan<'_>,
) -> Result<MigrationReport, MigrationError> {
    let pass = plan.config.pass(plan.kind);
    let run_id = Uuid::new_v4().to_string();
    info!(pass = %plan.kind, %run_id, root = %plan.input_root.display(), "starting pass");

    let extractor = CodeBlockExtractor::new(&pass.fence_language)
        .map_err(|e| MigrationError::Config(format!("fence language: {e}")))?;

    let dest_folder = plan.dest_folder();
    let mut units: Vec<MigrationUnit> = scan(ctx.fs.as_ref(), plan.input_root, &pass.filter())
        .into_iter()
        .enumerate()
        .map(|(index, source)| {
            let dest =
                dest_path(&source, &dest_folder, &pass.source_extension, &pass.target_extension);
            MigrationUnit::new(index, source, dest)
        })
        .collect();

    let mut report =
        MigrationReport { run_id, pass: plan.kind, segment_count: 0, units: Vec::new() };
    if units.is_empty() {
        warn!(pass = %plan.kind, pattern = %pass.pattern, "no source files found");
        return Ok(report);
    }
    info!(files = units.len(), "discovered source files");

    load_contents(ctx.fs.as_ref(), &mut units);
    let mut payload =
        build_payload(&units, &plan.config.request_delimiter, payload_header(plan.kind));
    append_context(&mut payload, &plan.context);

    let text = generate(
        ctx.llm.as_ref(),
        &system_prompt(plan.kind, pass),
        &payload,
        &plan.config.model_params(plan.kind),
    )
    .await?;

    let mut segments = split(&text, &pass.response_delimiter);
    trim_trailing_blank(&mut segments);
    if segments.len() != units.len() {
        warn!(
            files = units.len(),
            segments = segments.len(),
            "response segment count differs from file count; files are paired by position"
        );
    }

    write_all(ctx.fs.as_ref(), &mut units, &segments, &extractor);

    report.segment_count = segments.len();
    report.units = units;
    info!(written = report.written(), failed = report.failed(), "pass complete");
    Ok(report)
}

/// Context blocks for the test pass.
///
/// The page-object sources the tests use, the generated TypeScript page
/// objects, and the folder the specs will live in, so the service can write
/// correct relative imports.
#[must_use]
pub fn test_pass_context(
    ctx: &ServiceContext,
    config: &MigrationConfig,
    input_root: &Path,
    output_root: &Path,
) -> Vec<String> {
    let fs = ctx.fs.as_ref();
    let pages = &config.pages;

    let mut page_units: Vec<MigrationUnit> = scan(fs, input_root, &pages.filter())
        .into_iter()
        .enumerate()
        .map(|(index, source)| MigrationUnit::new(index, source, PathBuf::new()))
        .collect();
    load_contents(fs, &mut page_units);

    let pages_folder = output_root.join(&pages.output_subdir);
    let generated: Vec<String> =
        scan(fs, &pages_folder, &ScanFilter::name(GENERATED_PAGE_PATTERN, &[]))
            .iter()
            .map(|p| p.display().to_string())
            .collect();
    let specs_folder = output_root.join(&config.tests.output_subdir);

    let mut blocks = Vec::new();
    if !page_units.is_empty() {
        blocks.push(format!(
            "Below are the page object files used by the tests:\n{}",
            build_payload(&page_units, &config.request_delimiter, "")
        ));
    }
    if !generated.is_empty() {
        blocks.push(format!(
            "Here are the paths of the converted TypeScript page objects:\n{}",
            generated.join("\n")
        ));
    }
    blocks.push(format!(
        "Converted tests will be stored in:\n{}\nUse these paths to import the page objects correctly.",
        specs_folder.display()
    ));
    blocks
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::migrate::error::UnitFailure;
    use crate::migrate::unit::UnitStatus;
    use crate::ports::llm::fake::{CannedLlm, SeenRequests};

    fn context_with(text: &str) -> (ServiceContext, SeenRequests) {
        let llm = CannedLlm::new(text);
        let seen = llm.requests();
        (ServiceContext::with_llm(Box::new(llm)), seen)
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn fenced(code: &str) -> String {
        format!("```typescript\n{code}\n```")
    }

    #[tokio::test]
    async fn three_files_three_segments_written_in_order() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write(input.path(), "src/main/APage.java", "class APage {}");
        write(input.path(), "src/main/BPage.java", "class BPage {}");
        write(input.path(), "src/main/CPage.java", "class CPage {}");

        let response = [
            fenced("export class APage {}"),
            fenced("export class BPage {}"),
            fenced("export class CPage {}"),
        ]
        .join("\n---*---\n");
        let (ctx, seen) = context_with(&response);
        let config = MigrationConfig::default();
        let plan = PassPlan {
            kind: PassKind::Pages,
            config: &config,
            input_root: input.path(),
            output_root: output.path(),
            context: Vec::new(),
        };

        let report = run_pass(&ctx, &plan).await.unwrap();

        assert_eq!(report.written(), 3);
        assert!(report.is_aligned());
        let pages = output.path().join("src/pages");
        assert_eq!(std::fs::read_to_string(pages.join("APage.ts")).unwrap(), "export class APage {}");
        assert_eq!(std::fs::read_to_string(pages.join("CPage.ts")).unwrap(), "export class CPage {}");

        let requests = seen.lock().unwrap();
        let request = &requests[0];
        let a = request.prompt.find("APage.java").unwrap();
        let c = request.prompt.find("CPage.java").unwrap();
        assert!(a < c);
        assert!(request.system.contains("---*---"));
        assert_eq!(request.temperature, 0.2);
    }

    #[tokio::test]
    async fn blank_response_writes_nothing() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write(input.path(), "LoginPage.java", "class LoginPage {}");

        let (ctx, _) = context_with("   ");
        let config = MigrationConfig::default();
        let plan = PassPlan {
            kind: PassKind::Pages,
            config: &config,
            input_root: input.path(),
            output_root: output.path(),
            context: Vec::new(),
        };

        let err = run_pass(&ctx, &plan).await.unwrap_err();
        assert!(matches!(err, MigrationError::Gateway(_)));
        assert!(!output.path().join("src").exists());
    }

    #[tokio::test]
    async fn no_sources_skips_the_service() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let (ctx, seen) = context_with("unused");
        let config = MigrationConfig::default();
        let plan = PassPlan {
            kind: PassKind::Tests,
            config: &config,
            input_root: input.path(),
            output_root: output.path(),
            context: Vec::new(),
        };

        let report = run_pass(&ctx, &plan).await.unwrap();
        assert!(report.units.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn short_response_fails_trailing_unit_only() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for name in ["ATest", "BTest", "CTest"] {
            write(input.path(), &format!("{name}.java"), "class T {}");
        }
        let response = format!("{}---*---{}---*---\n", fenced("// a"), fenced("// b"));
        let (ctx, _) = context_with(&response);
        let config = MigrationConfig::default();
        let plan = PassPlan {
            kind: PassKind::Tests,
            config: &config,
            input_root: input.path(),
            output_root: output.path(),
            context: Vec::new(),
        };

        let report = run_pass(&ctx, &plan).await.unwrap();

        assert_eq!(report.segment_count, 2);
        assert!(report.units[0].is_written());
        assert!(report.units[1].is_written());
        assert_eq!(report.units[2].status, UnitStatus::Failed(UnitFailure::MissingSegment));
        let specs = output.path().join("src/specs");
        assert_eq!(std::fs::read_to_string(specs.join("BTest.spec.ts")).unwrap(), "// b");
        assert!(!specs.join("CTest.spec.ts").exists());
    }

    #[tokio::test]
    async fn test_context_follows_test_files() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write(input.path(), "src/main/LoginPage.java", "class LoginPage {}");
        write(input.path(), "src/test/LoginTest.java", "class LoginTest {}");
        write(output.path(), "src/pages/LoginPage.ts", "export class LoginPage {}");

        let (ctx, seen) = context_with(&fenced("test('login', async () => {});"));
        let config = MigrationConfig::default();
        let context = test_pass_context(&ctx, &config, input.path(), output.path());
        assert_eq!(context.len(), 3);

        let plan = PassPlan {
            kind: PassKind::Tests,
            config: &config,
            input_root: input.path(),
            output_root: output.path(),
            context,
        };
        let report = run_pass(&ctx, &plan).await.unwrap();
        assert_eq!(report.written(), 1);

        let prompt = seen.lock().unwrap()[0].prompt.clone();
        let test_block = prompt.find("LoginTest.java").unwrap();
        let page_context = prompt.find("page object files used by the tests").unwrap();
        assert!(test_block < page_context);
        assert!(prompt.contains("src/pages/LoginPage.ts"));
        assert!(prompt.contains("src/specs"));
    }
}
