//! Command dispatch and handlers.

pub mod all;
pub mod init;
pub mod pages;
pub mod specs;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::{Command, GlobalArgs};
use crate::config::MigrationConfig;
use crate::context::{replayed_llm, NoGeneration, ServiceContext};
use crate::migrate::{MigrationError, MigrationReport};
use crate::ports::llm::LlmClient;
use crate::project::read_project_info;

/// Environment variable naming the directory recorded sessions go to.
pub const RECORD_ENV: &str = "PLAYPORT_RECORD";

/// Resolved locations and settings shared by the handlers.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Root of the Selenium project.
    pub input: PathBuf,
    /// Root of the generated project.
    pub output: PathBuf,
    /// Migration settings after the YAML overlay and CLI overrides.
    pub config: MigrationConfig,
}

/// Dispatch a parsed command to its handler.
///
/// When `PLAYPORT_RECORD` is set to a directory path, filesystem and
/// generation calls are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if setup or the selected command handler fails.
pub fn dispatch(global: &GlobalArgs, command: Command) -> Result<(), String> {
    let llm: Box<dyn LlmClient> = match command {
        Command::Init => Box::new(NoGeneration),
        Command::Pages | Command::Tests | Command::All => generation_client(global)?,
    };
    let (ctx, session) = if let Ok(path) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(Path::new(&path), llm)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::with_llm(llm), None)
    };

    let result = runtime().and_then(|rt| rt.block_on(dispatch_with_context(global, command, &ctx)));

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the workspace cannot be resolved or the handler fails.
pub async fn dispatch_with_context(
    global: &GlobalArgs,
    command: Command,
    ctx: &ServiceContext,
) -> Result<(), String> {
    let workspace = resolve_workspace(ctx, global)?;
    match command {
        Command::Init => init::run(ctx, &workspace).map(|_| ()),
        Command::Pages => pages::run(ctx, &workspace).await.map(|_| ()),
        Command::Tests => specs::run(ctx, &workspace).await.map(|_| ()),
        Command::All => all::run(ctx, &workspace).await,
    }
}

/// Builds the workspace from flags, environment and the project descriptor.
///
/// # Errors
///
/// Returns an error if no input folder is given, the config file is invalid,
/// or the output folder must be derived and the project has no descriptor.
pub fn resolve_workspace(ctx: &ServiceContext, global: &GlobalArgs) -> Result<Workspace, String> {
    let input = global
        .input
        .clone()
        .ok_or("No input folder: pass --input or set INPUT_FOLDER")?;
    if !ctx.fs.is_dir(&input) {
        return Err(format!("Input folder does not exist: {}", input.display()));
    }

    let mut config = match &global.config {
        Some(path) => MigrationConfig::load(ctx.fs.as_ref(), path)?,
        None => MigrationConfig::default(),
    };
    if let Some(model) = &global.model {
        config.model.clone_from(model);
    }

    let output = match &global.output {
        Some(output) => output.clone(),
        None => default_output(&input, &read_project_info(ctx.fs.as_ref(), &input)?.name),
    };
    Ok(Workspace { input, output, config })
}

/// `trans-<name>` next to the input folder.
#[must_use]
pub fn default_output(input: &Path, project_name: &str) -> PathBuf {
    let folder = format!("trans-{project_name}");
    match (input.file_name(), input.parent()) {
        (Some(_), Some(parent)) => parent.join(folder),
        _ => input.join("..").join(folder),
    }
}

/// The replayed client when a cassette is given, otherwise the live provider.
fn generation_client(global: &GlobalArgs) -> Result<Box<dyn LlmClient>, String> {
    if let Some(cassette) = &global.replay_llm {
        return replayed_llm(cassette);
    }
    let var = global.provider.api_key_var();
    let api_key = global
        .api_key
        .clone()
        .or_else(|| env::var(var).ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| format!("No API key: pass --api-key or set {var}"))?;
    Ok(global.provider.client(api_key))
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))
}

/// Prints a pass report and turns a gateway failure into the command error.
fn finish_pass(
    result: Result<MigrationReport, MigrationError>,
) -> Result<MigrationReport, String> {
    match result {
        Ok(report) => {
            println!("{report}");
            Ok(report)
        }
        Err(err) => Err(err.to_string()),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod test_support {
    use std::path::Path;

    use crate::adapters::live::llm::Provider;
    use crate::cli::GlobalArgs;

    pub const POM: &str = "<project><artifactId>shop</artifactId><version>0.3.0</version></project>";

    pub fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn global(input: &Path, output: &Path) -> GlobalArgs {
        GlobalArgs {
            input: Some(input.to_path_buf()),
            output: Some(output.to_path_buf()),
            provider: Provider::OpenAi,
            model: None,
            api_key: None,
            config: None,
            replay_llm: None,
            verbose: false,
        }
    }
}
