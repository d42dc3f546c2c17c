//! Process inventory (read path)
//!
//! Aggregates one file into per-macro-ID counts, drilling-signature
//! histograms, and groove-length lists. The pass is pure: it never
//! mutates or reorders anything, and it processes the entire file even
//! when individual blocks are unmeasurable; those are omitted from the
//! signature/groove collections, never from the per-ID counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mprkit_core::data::{macro_ids, UNDERSIDE_TOOL_SUFFIX};
use mprkit_core::{process_description, MacroDocument, WorkpieceDimensions, UNKNOWN_PROCESS_DESC};
use mprkit_macrofile::{param, tokenize, workpiece_dimensions};

use crate::groove::{analyze_angle_groove, analyze_saw_groove};
use crate::signatures::{horizontal_drill_signature, vertical_drill_signature};

/// Options for one inventory pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryOptions {
    /// Count blocks disabled with `EN="0"`. On by default; the machines
    /// skip disabled macros but they still describe intended work.
    pub include_disabled: bool,
    /// Underside-origin marker for saw-groove face attribution.
    pub underside_suffix: String,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            include_disabled: true,
            underside_suffix: UNDERSIDE_TOOL_SUFFIX.to_string(),
        }
    }
}

/// Count plus mapped description for one macro ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedCount {
    /// Occurrences in the file.
    pub count: u64,
    /// Description from the reference table, or the unknown marker.
    pub description: String,
}

/// Structured inventory of one file's manufacturing operations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessInventory {
    /// Occurrences per macro ID.
    pub counts_by_id: BTreeMap<u32, u64>,
    /// Per-ID counts enriched with reference-table descriptions.
    pub mapped_counts: BTreeMap<u32, MappedCount>,
    /// Occurrences of IDs absent from the reference table.
    pub unknown_counts: BTreeMap<u32, u64>,
    /// Vertical drilling signature histogram.
    pub vertical_drill_signatures: BTreeMap<String, u64>,
    /// Horizontal drilling signature histogram.
    pub horizontal_drill_signatures: BTreeMap<String, u64>,
    /// Saw-groove descriptors, in file order.
    pub saw_groove_lengths: Vec<String>,
    /// Angle-groove descriptors, in file order.
    pub angle_groove_lengths: Vec<String>,
    /// Workpiece dimensions extracted from the file.
    pub dimensions: WorkpieceDimensions,
}

impl ProcessInventory {
    /// Total number of counted blocks.
    pub fn total_blocks(&self) -> u64 {
        self.counts_by_id.values().sum()
    }

    /// One-line human-readable process summary:
    /// `description:count` parts joined with `@`, with groove lengths
    /// appended as `[L=a,b]` for the groove macros.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (&id, mapped) in &self.mapped_counts {
            if mapped.count == 0 || mapped.description == UNKNOWN_PROCESS_DESC {
                continue;
            }
            let lengths = match id {
                macro_ids::SAW_GROOVE => &self.saw_groove_lengths,
                macro_ids::ANGLE_GROOVE => &self.angle_groove_lengths,
                _ => {
                    parts.push(format!("{}:{}", mapped.description, mapped.count));
                    continue;
                }
            };
            if lengths.is_empty() {
                parts.push(format!("{}:{}", mapped.description, mapped.count));
            } else {
                let length_values: Vec<&str> = lengths
                    .iter()
                    .map(|l| l.split('_').next().unwrap_or(l.as_str()))
                    .collect();
                parts.push(format!(
                    "{}:{} [L={}]",
                    mapped.description,
                    mapped.count,
                    length_values.join(",")
                ));
            }
        }
        parts.join("@")
    }

    /// Signature histogram rendered as `signature:count` pairs joined
    /// with `@`, sorted by signature.
    pub fn signature_detail(histogram: &BTreeMap<String, u64>) -> String {
        histogram
            .iter()
            .map(|(sig, count)| format!("{}:{}", sig, count))
            .collect::<Vec<_>>()
            .join("@")
    }
}

fn is_disabled(block: &str) -> bool {
    param(block, "EN") == Some("0")
}

/// Build the inventory for a tokenized document.
pub fn scan_document(doc: &MacroDocument, opts: &InventoryOptions) -> ProcessInventory {
    let mut inv = ProcessInventory {
        dimensions: workpiece_dimensions(doc),
        ..ProcessInventory::default()
    };

    for block in &doc.blocks {
        if !opts.include_disabled && is_disabled(&block.raw) {
            tracing::debug!(id = block.id, order = block.order, "skipping disabled macro");
            continue;
        }

        *inv.counts_by_id.entry(block.id).or_insert(0) += 1;
        if process_description(block.id).is_none() {
            *inv.unknown_counts.entry(block.id).or_insert(0) += 1;
        }

        match block.id {
            macro_ids::VERT_DRILL => {
                let sig = vertical_drill_signature(&block.raw);
                *inv.vertical_drill_signatures.entry(sig).or_insert(0) += 1;
            }
            macro_ids::HORIZ_DRILL => {
                let sig = horizontal_drill_signature(&block.raw);
                *inv.horizontal_drill_signatures.entry(sig).or_insert(0) += 1;
            }
            macro_ids::SAW_GROOVE => {
                if let Some(desc) =
                    analyze_saw_groove(&block.raw, inv.dimensions, &opts.underside_suffix)
                {
                    inv.saw_groove_lengths.push(desc.to_string());
                }
            }
            macro_ids::ANGLE_GROOVE => {
                if let Some(desc) = analyze_angle_groove(&block.raw, inv.dimensions) {
                    inv.angle_groove_lengths.push(desc.to_string());
                }
            }
            _ => {}
        }
    }

    inv.mapped_counts = inv
        .counts_by_id
        .iter()
        .map(|(&id, &count)| {
            let description = process_description(id)
                .unwrap_or(UNKNOWN_PROCESS_DESC)
                .to_string();
            (id, MappedCount { count, description })
        })
        .collect();

    inv
}

/// Build the inventory straight from decoded text.
pub fn scan_text(text: &str, opts: &InventoryOptions) -> ProcessInventory {
    scan_document(&tokenize(text), opts)
}
