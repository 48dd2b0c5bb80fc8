//! PDF text extraction.

use lopdf::Document;

use service_hub_core::{traits::DocumentExtractor, Error, Result};

/// Per-page text extraction with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for PdfTextExtractor {
    fn extract_pages(&self, document: &[u8]) -> Result<Vec<String>> {
        let pdf = Document::load_mem(document)
            .map_err(|e| Error::parsing(format!("Failed to read PDF: {}", e)))?;

        let pages = pdf
            .get_pages()
            .into_keys()
            .map(|number| match pdf.extract_text(&[number]) {
                Ok(text) => text,
                Err(e) => {
                    // Scanned or font-less pages have no extractable text.
                    tracing::debug!(page = number, error = %e, "No text on page");
                    String::new()
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(pages = pages.len(), "PDF text extracted");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn one_page_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_single_page_text() {
        let pdf = one_page_pdf("Quarterly report");

        let pages = PdfTextExtractor::new().extract_pages(&pdf).unwrap();

        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("Quarterly report"));
    }

    #[test]
    fn test_not_a_pdf() {
        let err = PdfTextExtractor::new()
            .extract_pages(b"plain text, not a PDF")
            .unwrap_err();
        assert_eq!(err.kind(), service_hub_core::ErrorKind::Parsing);
    }
}
