//! Application context for CLI command execution.
//!
//! [`App`] resolves configuration, decodes the data file once and computes
//! the analytics every command works from.
//!
//! # Example
//!
//! ```no_run
//! use jdx::app::App;
//! use jdx::config::JdxConfig;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::load(JdxConfig::default(), Path::new("project")).await?;
//!     println!("{} packages", app.model().package_count());
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use tokio::fs::File;

use crate::analytics::Analytics;
use crate::config::JdxConfig;
use crate::error::Result;
use crate::model::{GraphModel, ModelBuilder};
use crate::navigation::Navigator;

/// A decoded data file with its analytics.
#[derive(Debug)]
pub struct App {
    config: JdxConfig,
    data_path: PathBuf,
    model: GraphModel,
    analytics: Analytics,
}

impl App {
    /// Decode the data file named by `data_arg`, appending the configured
    /// data suffix when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be opened or read, or a format
    /// error for the first bad line.
    pub async fn load(config: JdxConfig, data_arg: &Path) -> Result<Self> {
        let data_path = config.data_path(data_arg);
        tracing::debug!(path = %data_path.display(), "loading data file");

        let file = File::open(&data_path).await?;
        let builder = ModelBuilder::new().with_data_suffix(config.data_suffix.clone());
        let model = GraphModel::read(builder, file).await?;
        let analytics = Analytics::compute(&model);

        tracing::info!(
            path = %data_path.display(),
            packages = model.package_count(),
            classes = model.class_count(),
            cycles = model.cycles().len(),
            "loaded dependency data"
        );

        Ok(Self {
            config,
            data_path,
            model,
            analytics,
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &JdxConfig {
        &self.config
    }

    /// Resolved path of the data file.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// The decoded model.
    #[must_use]
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    /// Analytics of the model.
    #[must_use]
    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// A fresh navigator over the model, starting idle.
    #[must_use]
    pub fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.model, &self.analytics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_by_basename() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("proj.data"), ";T\n;D\n;proj.data\nPa\nSX\n").unwrap();

        let app = App::load(JdxConfig::default(), &dir.path().join("proj"))
            .await
            .unwrap();
        assert_eq!(app.data_path(), dir.path().join("proj.data"));
        assert_eq!(app.model().package_count(), 1);
        assert_eq!(app.analytics().roots().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = App::load(JdxConfig::default(), &dir.path().join("absent"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[tokio::test]
    async fn bad_line_reports_its_number() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.data"), "Pa\nSX\nXoops\n").unwrap();

        let err = App::load(JdxConfig::default(), &dir.path().join("bad.data"))
            .await
            .unwrap_err();
        assert!(err.is_format_error());
        assert!(err.to_string().contains("line 3"), "{err}");
    }
}
