//! Rebuild the text of each page from a JSON glyph dump.
//!
//! Usage: `cargo run --features serde --example extract_text -- <pages.json>`

use std::fs::File;

use textflow::{Document, MemorySource};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: extract_text <pages.json>");
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

    println!("Pages: {}", doc.page_count());
    println!();

    for page_result in doc.pages() {
        let page = page_result.unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
        println!("--- Page {} ---", page.index() + 1);
        println!("{}", page.markdown());
        println!();
    }
}
