//! Command execution logic.
//!
//! This module contains the implementation of all one-shot CLI commands.
//! Output goes to the writer passed in; files are written with tokio.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::args::{CyclesArgs, EncodeArgs, ExportArgs, ShowArgs};
use crate::analytics::PackageDetail;
use crate::app::App;
use crate::encode::encode;
use crate::export::ExplorerData;
use crate::navigation::{ClassEntry, ImportEntry};
use crate::output::{self, OutputConfig, OutputMode};

/// Execute the summary command
pub fn execute_summary<W: Write>(
    w: &mut W,
    app: &App,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    output::print_summary(w, app.model(), app.analytics(), output_mode, config)?;
    Ok(())
}

/// Execute the roots command
pub fn execute_roots<W: Write>(
    w: &mut W,
    app: &App,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    output::print_roots(w, app.model(), app.analytics(), output_mode, config)?;
    Ok(())
}

/// Execute the cycles command
pub fn execute_cycles<W: Write>(
    w: &mut W,
    app: &App,
    args: &CyclesArgs,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let findings = args.check.then(|| app.analytics().check(app.model()));
    output::print_cycles(
        w,
        app.model(),
        app.analytics(),
        args.longest,
        findings.as_deref(),
        output_mode,
        config,
    )?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowJson {
    detail: PackageDetail,
    classes: Vec<ClassEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    imports: Option<Vec<ImportEntry>>,
}

/// Execute the show command
pub fn execute_show<W: Write>(
    w: &mut W,
    app: &App,
    args: &ShowArgs,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let model = app.model();
    let mut nav = app.navigator();

    let package = model.find_package(&args.package)?;
    nav.select_package(package)?;
    if let Some(class) = &args.class {
        let key = model.find_class(package, class)?;
        nav.select_class(package, key.class)?;
    }

    let Some(detail) = nav.detail()? else {
        anyhow::bail!("no package selected");
    };
    let classes = nav.class_list()?;
    let imports = match nav.state().class() {
        Some(_) => Some(nav.import_list()?),
        None => None,
    };

    if output_mode == OutputMode::Json {
        output::print_json(
            w,
            &ShowJson {
                detail,
                classes,
                imports,
            },
        )?;
        return Ok(());
    }

    output::print_detail(w, model, &detail, config)?;
    writeln!(w)?;
    output::print_class_list(w, &classes, config)?;
    if let (Some(key), Some(imports)) = (nav.state().class(), imports) {
        writeln!(w)?;
        output::print_import_list(w, &model.qualified_name(key)?, &imports, config)?;
    }
    Ok(())
}

/// Execute the export command
pub async fn execute_export<W: Write>(w: &mut W, app: &App, args: &ExportArgs) -> Result<()> {
    let data = ExplorerData::new(app.model(), app.analytics());
    let json = data.to_json(args.compact)?;

    let path = match &args.output {
        Some(path) if path.as_os_str() == "-" => {
            writeln!(w, "{json}")?;
            return Ok(());
        }
        Some(path) => path.clone(),
        None => app.config().json_path(app.data_path()),
    };

    tokio::fs::write(&path, format!("{json}\n")).await?;
    tracing::info!(path = %path.display(), bytes = json.len(), "exported explorer data");
    writeln!(
        w,
        "Exported {} packages to {}",
        data.summary.n_packages,
        path.display()
    )?;
    Ok(())
}

/// Execute the encode command
pub async fn execute_encode<W: Write>(w: &mut W, app: &App, args: &EncodeArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let file = tokio::fs::File::create(path).await?;
            let lines = encode(app.model(), file, &file_name(path)).await?;
            tracing::info!(path = %path.display(), lines, "encoded data file");
        }
        None => {
            let mut buffer = Vec::new();
            encode(app.model(), &mut buffer, &file_name(app.data_path())).await?;
            w.write_all(&buffer)?;
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
