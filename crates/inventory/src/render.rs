//! Plain-text rendering of store results

use inventory_store::{Added, Health, Record, Summary};
use std::fmt::Write;

pub fn added(added: &Added) -> String {
    format!("✓ Added {} (id {})", added.name, added.id)
}

/// One line per record: name, quantity and location
pub fn records(records: &[Record]) -> String {
    if records.is_empty() {
        return "  (no items)".to_string();
    }

    let mut out = String::new();
    for r in records {
        let _ = writeln!(
            out,
            "  [{}] {} - {}x ({}) [{}]",
            r.id, r.name, r.quantity, r.location, r.category
        );
    }
    out.truncate(out.trim_end().len());
    out
}

/// One line per search hit: name, quantity and notes
pub fn matches(records: &[Record]) -> String {
    if records.is_empty() {
        return "  (no matches)".to_string();
    }

    let mut out = String::new();
    for r in records {
        let _ = writeln!(out, "  - {} ({}x) - {}", r.name, r.quantity, r.notes);
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Total Items: {}", summary.total_items);
    let _ = writeln!(out, "  Categories: {}", summary.categories);
    for (category, qty) in &summary.by_category {
        let _ = writeln!(out, "    - {}: {}", category, qty);
    }
    if !summary.items.is_empty() {
        let _ = writeln!(out, "  First items:");
        for r in &summary.items {
            let _ = writeln!(
                out,
                "    {} - {}x ({}), added {}",
                r.name,
                r.quantity,
                r.location,
                inventory_util::format_datetime_full(&r.date_added)
            );
        }
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn health(health: &Health) -> String {
    if health.is_healthy() {
        return format!("✓ Store is healthy ({} records)", health.records);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "✗ Store has problems ({} good records)",
        health.records
    );
    if !health.corrupt.is_empty() {
        let _ = writeln!(out, "Corrupt rows ({}):", health.corrupt.len());
        for row in &health.corrupt {
            let _ = writeln!(out, "  - line {}: {}", row.line, row.reason);
        }
    }
    if !health.duplicate_ids.is_empty() {
        let ids: Vec<String> = health.duplicate_ids.iter().map(|id| id.to_string()).collect();
        let _ = writeln!(out, "Duplicate ids: {}", ids.join(", "));
    }
    out.truncate(out.trim_end().len());
    out
}
