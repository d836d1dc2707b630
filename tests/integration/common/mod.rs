//! Shared helpers for the integration tests.
//!
//! Fixture PDFs are generated with lopdf. Every page carries a `/Label`
//! string `"{tag}-{index}"` so the tests can tell which source page ended
//! up where.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// How to build one fixture.
#[derive(Debug, Clone)]
pub struct Fixture<'a> {
    pub tag: &'a str,
    pub pages: usize,
    /// `/Rotate` written on every page.
    pub rotate: Option<i64>,
    /// Page size in points, written on each page rather than inherited.
    pub media_box: Option<(i64, i64)>,
}

impl<'a> Fixture<'a> {
    pub fn new(tag: &'a str, pages: usize) -> Self {
        Self {
            tag,
            pages,
            rotate: None,
            media_box: None,
        }
    }

    pub fn rotated(mut self, degrees: i64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn sized(mut self, width: i64, height: i64) -> Self {
        self.media_box = Some((width, height));
        self
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });

        let mut kids = Vec::new();
        for index in 0..self.pages {
            let label = format!("{}-{index}", self.tag);
            let content = format!("BT /F1 18 Tf 50 700 Td ({label}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Label" => Object::string_literal(label),
            };
            if let Some(degrees) = self.rotate {
                page.set("Rotate", degrees);
            }
            if let Some((width, height)) = self.media_box {
                page.set(
                    "MediaBox",
                    vec![0.into(), 0.into(), width.into(), height.into()],
                );
            }
            kids.push(Object::Reference(doc.add_object(page)));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => self.pages as i64,
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

    /// Write the fixture to `dir/name` and return the path.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        self.build().save(&path).expect("Failed to write fixture");
        path
    }
}

/// Shorthand for a plain fixture.
pub fn write_pdf(dir: &Path, name: &str, tag: &str, pages: usize) -> PathBuf {
    Fixture::new(tag, pages).write(dir, name)
}

/// Labels of the pages of the PDF at `path`, in page order.
pub fn labels_of(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .values()
        .map(|id| match doc.get_dictionary(*id).unwrap().get(b"Label") {
            Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        })
        .collect()
}

/// `/Rotate` of the pages of the PDF at `path`, in page order.
pub fn rotations_of(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("Failed to load output");
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

/// MediaBox width and height of the pages of the PDF at `path`.
pub fn sizes_of(path: &Path) -> Vec<(i64, i64)> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .values()
        .map(|id| {
            let page = doc.get_dictionary(*id).unwrap();
            let values = page.get(b"MediaBox").unwrap().as_array().unwrap();
            let number = |object: &Object| match object {
                Object::Integer(i) => *i,
                Object::Real(r) => *r as i64,
                _ => 0,
            };
            (number(&values[2]), number(&values[3]))
        })
        .collect()
}
