use std::path::Path;

use lopdf::{Dictionary, Document, Object};

use crate::error::ExtractError;

/// A loaded source PDF. Read-only once constructed; extraction produces a
/// fresh `lopdf::Document` and never mutates the source.
pub struct PdfDocument {
    doc: Document,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let doc = Document::load(path).map_err(ExtractError::Load)?;
        Ok(PdfDocument { doc })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExtractError> {
        let doc = Document::load_mem(bytes).map_err(ExtractError::Load)?;
        Ok(PdfDocument { doc })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Metadata from the document info dictionary.
    pub fn info(&self) -> PdfInfo {
        let mut info = PdfInfo {
            page_count: self.page_count(),
            ..PdfInfo::default()
        };

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                info.title = doc_string(dict, b"Title");
                info.author = doc_string(dict, b"Author");
                info.producer = doc_string(dict, b"Producer");
            }
        }

        info
    }

    /// Build a new document containing the pages at `indices` (zero-based),
    /// in the given order. A page appears once per occurrence of its index.
    ///
    /// Kept pages are reparented directly under the root pages node and the
    /// root's Kids array is rewritten in the requested order; pages that
    /// inherited attributes from intermediate tree nodes lose them. Flat
    /// page trees, the common case, are unaffected.
    pub fn extract_pages(&self, indices: &[u32]) -> Result<Document, ExtractError> {
        let mut doc = self.doc.clone();
        let page_map = doc.get_pages();
        let total = page_map.len() as u32;

        let mut kids = Vec::with_capacity(indices.len());
        for &idx in indices {
            let number = idx + 1;
            let id = page_map
                .get(&number)
                .copied()
                .ok_or(ExtractError::PageOutOfRange {
                    page: number,
                    total,
                })?;
            kids.push(Object::Reference(id));
        }

        let pages_id = doc
            .catalog()
            .map_err(ExtractError::Build)?
            .get(b"Pages")
            .map_err(ExtractError::Build)?
            .as_reference()
            .map_err(ExtractError::Build)?;

        for &idx in indices {
            let page = doc
                .get_dictionary_mut(page_map[&(idx + 1)])
                .map_err(ExtractError::Build)?;
            page.set("Parent", Object::Reference(pages_id));
        }

        let pages = doc
            .get_dictionary_mut(pages_id)
            .map_err(ExtractError::Build)?;
        pages.set("Kids", Object::Array(kids));
        pages.set("Count", Object::Integer(indices.len() as i64));

        // Drop everything no longer reachable from the trailer, i.e. the
        // unselected pages and their now-orphaned resources.
        doc.prune_objects();
        doc.compress();

        Ok(doc)
    }

    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<(), ExtractError> {
        doc.save(path).map_err(ExtractError::Save)?;
        Ok(())
    }

    /// Serialize to a complete byte buffer; no partial output on error.
    pub fn save_to_bytes(doc: &mut Document) -> Result<Vec<u8>, ExtractError> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(ExtractError::Save)?;
        Ok(buffer)
    }
}

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
    pub page_count: u32,
}

fn doc_string(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        _ => None,
    }
}

fn decode_text(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        // UTF-16 BE with BOM
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        // PDFDocEncoding, approximated as Latin-1
        bytes.iter().map(|&b| b as char).collect()
    }
}
