mod document;

pub use document::{PdfDocument, PdfInfo};
