use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{error, info, info_span};

use recon_core::{
    ChunkedReconciler, ColumnReconciler, InMemoryReconciler, compare_tables,
};
use recon_ingest::{archive_inventory, load_csv, load_csv_from_zip, resolve_inputs};
use recon_model::ReconConfig;
use recon_report::{write_column_mismatches, write_id_discrepancies};

use crate::cli::{DirArgs, RunArgs};
use crate::summary::apply_table_style;
use crate::types::{ComparedDataset, DatasetDetail, DatasetOutcome, RunOutcome};

/// Number of archive members shown per archive by `inspect`.
const INVENTORY_PREVIEW: usize = 8;

/// Load the run configuration: built-in defaults, or a TOML override.
pub fn load_config(path: Option<&Path>) -> Result<ReconConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
        }
        None => Ok(ReconConfig::default()),
    }
}

fn apply_dir_overrides(config: &mut ReconConfig, dirs: &DirArgs) {
    if let Some(dir) = &dirs.old_dir {
        config.old_dir = dir.clone();
    }
    if let Some(dir) = &dirs.new_dir {
        config.new_dir = dir.clone();
    }
}

pub fn run_datasets(config: &ReconConfig) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "Old-side patterns", "New-side patterns"]);
    apply_table_style(&mut table);
    for (label, spec) in &config.datasets {
        table.add_row(vec![
            label.clone(),
            spec.old_patterns.join(", "),
            spec.new_patterns.join(", "),
        ]);
    }
    println!("{table}");
    println!("key column: {}", config.key_column);
    Ok(())
}

/// Resolve both input directories and preview archive contents.
pub fn run_inspect(config: &ReconConfig, dirs: &DirArgs) -> Result<()> {
    let mut config = config.clone();
    apply_dir_overrides(&mut config, dirs);

    let old_inputs = resolve_inputs(&config.old_dir, &config.old_patterns(), "zip")?;
    let new_inputs = resolve_inputs(&config.new_dir, &config.new_patterns(), "csv")?;

    println!("old-side inputs ({}):", config.old_dir.display());
    for (label, path) in &old_inputs {
        println!("  - {label}: {}", file_name(path));
        let members = archive_inventory(path)?;
        println!("    tabular members: {}", members.len());
        for member in members.iter().take(INVENTORY_PREVIEW) {
            println!("      - {member}");
        }
        if members.len() > INVENTORY_PREVIEW {
            println!("      - ...");
        }
    }

    println!("new-side inputs ({}):", config.new_dir.display());
    for (label, path) in &new_inputs {
        println!("  - {label}: {}", file_name(path));
    }
    Ok(())
}

/// Resolve, load, and compare every configured dataset pair.
///
/// Resolution failure on either side aborts the run (nothing to compare
/// against). Load failures are per-dataset: siblings still run, and the
/// outcome records the failure.
pub fn run_compare(config: &ReconConfig, args: &RunArgs) -> Result<RunOutcome> {
    let mut config = config.clone();
    apply_dir_overrides(&mut config, &args.dirs);
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }

    let reconciler: Box<dyn ColumnReconciler> = if args.chunked {
        Box::new(ChunkedReconciler {
            chunk_size: args.chunk_size,
        })
    } else {
        Box::new(InMemoryReconciler)
    };

    let old_inputs = resolve_inputs(&config.old_dir, &config.old_patterns(), "zip")?;
    let new_inputs = resolve_inputs(&config.new_dir, &config.new_patterns(), "csv")?;

    let mut datasets = Vec::new();
    for label in config.datasets.keys() {
        let span = info_span!("dataset", label = %label);
        let _guard = span.enter();

        let detail = compare_dataset(
            &config,
            label,
            &old_inputs[label],
            &new_inputs[label],
            reconciler.as_ref(),
        );
        if let DatasetDetail::Failed { error } = &detail {
            error!(label = %label, error = %error, "dataset comparison failed");
        }
        datasets.push(DatasetOutcome {
            label: label.clone(),
            detail,
        });
    }

    Ok(RunOutcome {
        output_dir: config.output_dir.clone(),
        datasets,
    })
}

fn compare_dataset(
    config: &ReconConfig,
    label: &str,
    old_path: &Path,
    new_path: &Path,
    reconciler: &dyn ColumnReconciler,
) -> DatasetDetail {
    match try_compare_dataset(config, label, old_path, new_path, reconciler) {
        Ok(compared) => DatasetDetail::Compared(Box::new(compared)),
        Err(error) => DatasetDetail::Failed {
            error: format!("{error:#}"),
        },
    }
}

fn try_compare_dataset(
    config: &ReconConfig,
    label: &str,
    old_path: &Path,
    new_path: &Path,
    reconciler: &dyn ColumnReconciler,
) -> Result<ComparedDataset> {
    let old = load_csv_from_zip(old_path)
        .with_context(|| format!("load old side of {label}"))?;
    let new = load_csv(new_path).with_context(|| format!("load new side of {label}"))?;
    info!(
        old_rows = old.row_count(),
        new_rows = new.row_count(),
        "loaded dataset pair"
    );

    let result = compare_tables(&old, &new, &config.key_column, reconciler);

    let id_report = write_id_discrepancies(
        &config.output_dir,
        label,
        &result.keys,
        config.id_sample_cap,
    )?;
    let mismatch_report =
        write_column_mismatches(&config.output_dir, label, &result.report)?;

    Ok(ComparedDataset {
        old_rows: result.old_rows,
        new_rows: result.new_rows,
        shared_keys: result.keys.shared_count(),
        only_in_old: result.keys.only_in_old.len(),
        only_in_new: result.keys.only_in_new.len(),
        compared_columns: result.report.columns.len(),
        total_mismatches: result.report.total_mismatches(),
        top_columns: result.report.top(5).to_vec(),
        id_report,
        mismatch_report,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
