//! Skeleton of the generated Playwright project.

use std::path::PathBuf;

use serde_json::json;
use tracing::info;

use super::info::ProjectInfo;
use crate::ports::filesystem::FileSystem;

const PLAYWRIGHT_CONFIG: &str = r"import { defineConfig, devices } from '@playwright/test';

export default defineConfig({
  testDir: './src/specs',
  fullyParallel: true,
  forbidOnly: !!process.env.CI,
  retries: process.env.CI ? 2 : 0,
  workers: process.env.CI ? 1 : undefined,
  reporter: 'html',
  use: {
    trace: 'on-first-retry',
  },
  projects: [
    { name: 'chromium', use: { ...devices['Desktop Chrome'] } },
    { name: 'firefox', use: { ...devices['Desktop Firefox'] } },
    { name: 'webkit', use: { ...devices['Desktop Safari'] } },
  ],
});
";

/// Writes the static files of the output project.
pub struct Scaffold<'a> {
    fs: &'a dyn FileSystem,
    out: PathBuf,
    info: &'a ProjectInfo,
}

impl<'a> Scaffold<'a> {
    /// Scaffold rooted at `out` for the given project.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, out: impl Into<PathBuf>, info: &'a ProjectInfo) -> Self {
        Self { fs, out: out.into(), info }
    }

    /// `package.json` with the migrated project's identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_package_json(&self) -> Result<PathBuf, String> {
        let manifest = json!({
            "name": self.info.name,
            "version": self.info.version,
            "description": "",
            "scripts": { "test": "playwright test" },
            "license": "ISC",
            "devDependencies": {
                "@playwright/test": "^1.46.1",
                "@types/node": "^22.4.0",
                "typescript": "^5.5.4"
            }
        });
        self.write_json("package.json", &manifest)
    }

    /// `tsconfig.json` with strict type checking and no emit.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_tsconfig(&self) -> Result<PathBuf, String> {
        let tsconfig = json!({
            "compilerOptions": {
                "target": "es2016",
                "module": "commonjs",
                "esModuleInterop": true,
                "forceConsistentCasingInFileNames": true,
                "strict": true,
                "skipLibCheck": true,
                "noEmit": true
            }
        });
        self.write_json("tsconfig.json", &tsconfig)
    }

    /// `playwright.config.ts` running the specs on three browsers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_playwright_config(&self) -> Result<PathBuf, String> {
        self.write_file("playwright.config.ts", PLAYWRIGHT_CONFIG)
    }

    /// Empty `src` folder the passes write under.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created.
    pub fn create_src_folder(&self) -> Result<PathBuf, String> {
        let src = self.out.join("src");
        self.fs
            .create_dir_all(&src)
            .map_err(|e| format!("Failed to create {}: {e}", src.display()))?;
        info!(path = %src.display(), "created source folder");
        Ok(src)
    }

    /// Everything above, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    pub fn write_all(&self) -> Result<Vec<PathBuf>, String> {
        Ok(vec![
            self.write_package_json()?,
            self.write_tsconfig()?,
            self.write_playwright_config()?,
            self.create_src_folder()?,
        ])
    }

    fn write_json(&self, name: &str, value: &serde_json::Value) -> Result<PathBuf, String> {
        let mut text = serde_json::to_string_pretty(value)
            .map_err(|e| format!("Failed to serialize {name}: {e}"))?;
        text.push('\n');
        self.write_file(name, &text)
    }

    fn write_file(&self, name: &str, content: &str) -> Result<PathBuf, String> {
        let path = self.out.join(name);
        self.fs
            .write(&path, content)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        info!(project = %self.info.name, path = %path.display(), "wrote {name}");
        Ok(path)
    }
}
