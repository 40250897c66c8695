use crate::page_range::parse_page_spec;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output: Q) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    let total_pages = doc.page_count();

    let indices = parse_page_spec(pages, total_pages)?;

    let mut new_doc = doc.extract_pages(&indices)?;
    PdfDocument::save(&mut new_doc, &output)?;

    println!(
        "Extracted {} page(s) to {}",
        indices.len(),
        output.as_ref().display()
    );

    Ok(())
}
