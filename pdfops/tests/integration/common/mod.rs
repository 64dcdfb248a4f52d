//! Integration test helpers for pdfops.
//!
//! Fixture PDFs are generated programmatically with `lopdf` so the tests
//! stay self-contained. Each generated page carries a distinct MediaBox
//! width, which lets tests verify page identity and order after an
//! operation without inspecting page content.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Build an in-memory document with the given number of pages.
///
/// Page *i* (1-based) gets a MediaBox width of `base_width + i` and a small
/// content stream, so pages are distinguishable and non-empty.
pub fn sample_document(pages: usize, base_width: i64) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for i in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {i}").into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id =
            doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let width = base_width + i as i64;
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a generated sample PDF into `dir` and return its path.
pub fn write_sample_pdf(dir: &Path, name: &str, pages: usize, base_width: i64) -> PathBuf {
    let path = dir.join(name);
    sample_document(pages, base_width).save(&path).unwrap();
    path
}

/// Load a PDF and return its page MediaBox widths in page order.
pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let Ok(Object::Dictionary(dict)) = doc.get_object(page_id) else {
                panic!("page {page_id:?} is not a dictionary");
            };
            let Ok(Object::Array(media_box)) = dict.get(b"MediaBox") else {
                panic!("page {page_id:?} has no MediaBox");
            };
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// Load a PDF and return its page count.
pub fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}
