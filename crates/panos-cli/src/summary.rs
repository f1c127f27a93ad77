use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use panos_cli::types::{LogTypeStatus, PlannedVersion, RunOutcome, VersionOutcome};

pub fn print_summary(outcome: &RunOutcome) {
    if !outcome.skipped.is_empty() {
        println!("Already complete: {}", outcome.skipped.join(", "));
    }
    if outcome.versions.is_empty() {
        println!("Nothing to scrape.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Version"),
        header_cell("Log types"),
        header_cell("Complete"),
        header_cell("Partial"),
        header_cell("Failed"),
        header_cell("Matrix"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);

    let mut totals = [0usize; 4];
    for version in &outcome.versions {
        let counts = version_counts(version);
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
        table.add_row(vec![
            Cell::new(&version.version).add_attribute(Attribute::Bold),
            Cell::new(counts[0]),
            count_cell(counts[1], Color::Green),
            count_cell(counts[2], Color::Yellow),
            count_cell(counts[3], Color::Red),
            matrix_cell(version),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        count_cell(totals[1], Color::Green),
        count_cell(totals[2], Color::Yellow),
        count_cell(totals[3], Color::Red),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_failures(outcome);
    println!(
        "Scraping completed! Total log types processed: {}",
        outcome.total_successful()
    );
}

pub fn print_plan(plan: &[PlannedVersion]) {
    println!("DRY RUN - no pages will be fetched");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Version"),
        header_cell("Log type"),
        header_cell("URL"),
    ]);
    apply_table_style(&mut table);
    for version in plan {
        table.add_row(vec![
            Cell::new(&version.version).add_attribute(Attribute::Bold),
            dim_cell(version.output_dir.display()),
            dim_cell(""),
        ]);
        for log_type in &version.log_types {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(&log_type.name),
                Cell::new(&log_type.url),
            ]);
        }
    }
    println!("{table}");
    println!("Total versions to scrape: {}", plan.len());
}

fn print_failures(outcome: &RunOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Version"),
        header_cell("Log type"),
        header_cell("Status"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    let mut rows = 0usize;
    for version in &outcome.versions {
        for message in &version.errors {
            table.add_row(vec![
                Cell::new(&version.version),
                dim_cell("-"),
                status_cell(LogTypeStatus::Failed),
                Cell::new(message),
            ]);
            rows += 1;
        }
        for log_type in &version.log_types {
            if log_type.is_complete() && log_type.errors.is_empty() {
                continue;
            }
            let detail = if log_type.errors.is_empty() {
                missing_detail(log_type.format_found, log_type.table_rows.is_some())
            } else {
                log_type.errors.join("; ")
            };
            table.add_row(vec![
                Cell::new(&version.version),
                Cell::new(&log_type.log_type),
                status_cell(log_type.status),
                Cell::new(detail),
            ]);
            rows += 1;
        }
    }
    if rows > 0 {
        println!("{table}");
    }
}

fn missing_detail(format_found: bool, table_found: bool) -> String {
    match (format_found, table_found) {
        (false, false) => "no format string, no field table".to_string(),
        (false, true) => "no format string".to_string(),
        (true, false) => "no field table".to_string(),
        (true, true) => String::new(),
    }
}

fn version_counts(version: &VersionOutcome) -> [usize; 4] {
    [
        version.log_types.len(),
        version.count(LogTypeStatus::Complete),
        version.count(LogTypeStatus::Partial),
        version.count(LogTypeStatus::Failed),
    ]
}

fn matrix_cell(version: &VersionOutcome) -> Cell {
    if version.matrix.is_some() {
        Cell::new("✓").fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn status_cell(status: LogTypeStatus) -> Cell {
    match status {
        LogTypeStatus::Complete => Cell::new("complete").fg(Color::Green),
        LogTypeStatus::Partial => Cell::new("partial").fg(Color::Yellow),
        LogTypeStatus::Failed => Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
