//! Print the column groups (table candidates) of each page as grids.
//!
//! Usage: `cargo run --features serde --example extract_table -- <pages.json>`

use std::fs::File;

use textflow::{Document, MemorySource};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: extract_table <pages.json>");
        std::process::exit(1);
    });

    let source = File::open(&path)
        .map_err(textflow::SourceError::from)
        .and_then(MemorySource::from_reader)
        .unwrap_or_else(|e| {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        });

    let doc = Document::open(source).unwrap_or_else(|e| {
        eprintln!("Error opening document: {e}");
        std::process::exit(1);
    });

    for page_result in doc.pages() {
        let page = page_result.unwrap();
        let groups = page.column_groups();

        if groups.is_empty() {
            continue;
        }

        println!(
            "--- Page {} ({} table(s)) ---",
            page.index() + 1,
            groups.len()
        );

        for (i, group) in groups.iter().enumerate() {
            println!("  Table {}:", i + 1);
            for line in group.start..=group.end {
                let cells: Vec<&str> = page.line_elements(line).map(|e| e.text()).collect();
                println!("    {:?}", cells);
            }
            println!();
        }
    }
}
