//! Fixture PDFs for unit tests.
//!
//! Every page carries a `/Label` string `"{tag}-{index}"` so tests can tell
//! which source page ended up where after an export.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Build a document with `pages` labelled pages.
///
/// MediaBox and Resources live on the `/Pages` node, so they are inherited.
/// All pages share one font object.
pub(crate) fn tagged_document(tag: &str, pages: usize, rotate: Option<i64>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for index in 0..pages {
        let label = format!("{tag}-{index}");
        let content = format!("BT /F1 24 Tf 72 720 Td ({label}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Label" => Object::string_literal(label),
        };
        if let Some(degrees) = rotate {
            page.set("Rotate", degrees);
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => pages as i64,
            "Kids" => kids,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Save `doc` as `dir/name`.
pub(crate) fn write_document(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Write a labelled PDF and return its path.
pub(crate) fn write_tagged_pdf(dir: &Path, name: &str, tag: &str, pages: usize) -> PathBuf {
    write_document(dir, name, tagged_document(tag, pages, None))
}

/// Labels of the pages of `doc`, in page order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|id| match doc.get_dictionary(*id).unwrap().get(b"Label") {
            Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        })
        .collect()
}

/// `/Rotate` of the pages of `doc`, in page order. Missing means 0.
pub(crate) fn page_rotations(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|id| {
            doc.get_dictionary(*id)
                .unwrap()
                .get(b"Rotate")
                .and_then(Object::as_i64)
                .unwrap_or(0)
        })
        .collect()
}
