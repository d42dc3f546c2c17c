use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use mprkit::{
    init_logging, scan_text, transform_text, InventoryOptions, MprFileReader, ProcessInventory,
    TransformOptions,
};

#[derive(Parser)]
#[command(name = "mprkit", version, about = "Inspect and convert WoodWOP MPR machining files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a process inventory for each MPR file
    Report {
        /// An .mpr file or a folder to scan recursively
        path: PathBuf,
        /// Emit the full inventories as JSON instead of summaries
        #[arg(long)]
        json: bool,
        /// Exclude macros disabled with EN="0"
        #[arg(long)]
        skip_disabled: bool,
    },
    /// Convert underside saw-grooves to pockets, in place
    Convert {
        /// An .mpr file or a folder to scan recursively
        path: PathBuf,
        /// Milling tool diameter added to the pocket length
        #[arg(long, default_value_t = 0.0)]
        tool_diameter: f64,
        /// Also drop angle-groove (124) blocks entirely
        #[arg(long)]
        strip_angle_grooves: bool,
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Report {
            path,
            json,
            skip_disabled,
        } => run_report(&path, json, skip_disabled),
        Command::Convert {
            path,
            tool_diameter,
            strip_angle_grooves,
            dry_run,
        } => run_convert(&path, tool_diameter, strip_angle_grooves, dry_run),
    }
}

/// Gather .mpr files: a file argument as-is, a folder recursively.
fn collect_mpr_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("{} is neither a file nor a folder", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("mpr"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Read and decode one file, reporting failures per file.
fn read_file(path: &Path) -> Option<String> {
    let reader = match MprFileReader::new(path) {
        Ok(reader) => reader,
        Err(err) => {
            tracing::error!("{}: {}", path.display(), err);
            return None;
        }
    };
    match reader.read_all() {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::error!("{}: {}", path.display(), err);
            None
        }
    }
}

fn run_report(path: &Path, json: bool, skip_disabled: bool) -> Result<()> {
    let files = collect_mpr_files(path)?;
    if files.is_empty() {
        bail!("no .mpr files found under {}", path.display());
    }

    let opts = InventoryOptions {
        include_disabled: !skip_disabled,
        ..InventoryOptions::default()
    };

    let mut inventories: BTreeMap<String, ProcessInventory> = BTreeMap::new();
    for file in &files {
        let Some(text) = read_file(file) else {
            continue;
        };
        inventories.insert(file.display().to_string(), scan_text(&text, &opts));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&inventories)?);
        return Ok(());
    }

    for (name, inv) in &inventories {
        println!("{}", name);
        println!(
            "  workpiece: {} x {}, {} macro blocks",
            inv.dimensions.length,
            inv.dimensions.width,
            inv.total_blocks()
        );
        let summary = inv.summary();
        if !summary.is_empty() {
            println!("  processes: {}", summary);
        }
        let vert = ProcessInventory::signature_detail(&inv.vertical_drill_signatures);
        if !vert.is_empty() {
            println!("  vertical drilling: {}", vert);
        }
        let horiz = ProcessInventory::signature_detail(&inv.horizontal_drill_signatures);
        if !horiz.is_empty() {
            println!("  horizontal drilling: {}", horiz);
        }
        for (id, count) in &inv.unknown_counts {
            println!("  unmapped macro {}: {}", id, count);
        }
    }
    Ok(())
}

/// Keep a .bak sibling of the original bytes; an existing backup is never
/// overwritten.
fn backup_file(path: &Path) -> Result<()> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);
    if !backup.exists() {
        fs::copy(path, &backup)
            .with_context(|| format!("creating backup {}", backup.display()))?;
    }
    Ok(())
}

fn run_convert(
    path: &Path,
    tool_diameter: f64,
    strip_angle_grooves: bool,
    dry_run: bool,
) -> Result<()> {
    let files = collect_mpr_files(path)?;
    if files.is_empty() {
        bail!("no .mpr files found under {}", path.display());
    }

    let opts = TransformOptions {
        tool_diameter,
        remove_angle_grooves: strip_angle_grooves,
        ..TransformOptions::default()
    };

    let mut written = 0usize;
    for file in &files {
        let Some(text) = read_file(file) else {
            continue;
        };

        let report = transform_text(&text, &opts);
        if !report.changed {
            tracing::info!("{}: nothing to change", file.display());
            continue;
        }

        for conv in &report.conversions {
            println!(
                "{}: 109 -> 151, axis={}, length={}",
                file.display(),
                conv.axis,
                conv.groove_length
            );
        }
        if report.removed_component {
            println!("{}: removed component reference", file.display());
        }
        if report.removed_angle_grooves {
            println!("{}: removed angle-groove blocks", file.display());
        }

        if dry_run {
            continue;
        }

        backup_file(file)?;
        fs::write(file, &report.text)
            .with_context(|| format!("writing {}", file.display()))?;
        written += 1;
    }

    if dry_run {
        println!("dry run: no files written");
    } else {
        println!("{} file(s) updated", written);
    }
    Ok(())
}
