//! A single page lifted out of its source document.
//!
//! The page dictionary is copied without its `/Parent` link. Attributes a
//! page may inherit from the page tree are resolved first, so the copy
//! renders the same once it is attached to a different tree.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Thumbnail;
use super::reader::LopdfSource;
use crate::error::{PdfDeckError, Result};
use crate::io::SourceDocument;
use crate::pageset::Rotation;

/// Page attributes that may be inherited from ancestor `/Pages` nodes.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page-tree walks stop after this many ancestors.
const MAX_TREE_DEPTH: usize = 64;

/// US Letter, used when a page declares no MediaBox.
const DEFAULT_MEDIA_BOX: (f64, f64) = (612.0, 792.0);

/// A page read from a source PDF.
#[derive(Debug, Clone)]
pub struct LopdfPage {
    source_path: PathBuf,
    document: Arc<Document>,
    page_id: ObjectId,
    dictionary: Dictionary,
    rotation: Rotation,
}

impl LopdfPage {
    /// Read page `index` of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::IndexOutOfRange`] if the page does not exist,
    /// or [`PdfDeckError::Pdf`] if the page object is not a dictionary.
    pub fn read(source: &LopdfSource, index: usize) -> Result<Self> {
        let page_id = source
            .page_id(index)
            .ok_or_else(|| PdfDeckError::IndexOutOfRange {
                path: source.path().to_path_buf(),
                index,
                page_count: source.page_count(),
            })?;

        let document = Arc::clone(source.document());
        let mut dictionary = document.get_dictionary(page_id)?.clone();

        for key in INHERITABLE {
            if !dictionary.has(key)
                && let Some(value) = inherited_attribute(&document, &dictionary, key)
            {
                dictionary.set(key.to_vec(), value);
            }
        }
        dictionary.remove(b"Parent");

        let rotation = dictionary
            .get(b"Rotate")
            .and_then(Object::as_i64)
            .map(Rotation::from_degrees)
            .unwrap_or_default();

        Ok(Self {
            source_path: source.path().to_path_buf(),
            document,
            page_id,
            dictionary,
            rotation,
        })
    }

    /// Path of the source this page came from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The source document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Object id of the page within its source.
    pub fn page_id(&self) -> ObjectId {
        self.page_id
    }

    /// The detached page dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Current rotation of the page.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Overwrite the page rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.dictionary
            .set("Rotate", Object::Integer(i64::from(rotation.degrees())));
    }

    /// Page size in points as `(width, height)`, before rotation.
    pub fn media_size(&self) -> (f64, f64) {
        self.dictionary
            .get(b"MediaBox")
            .ok()
            .and_then(|object| resolve(&self.document, object))
            .and_then(|object| object.as_array().ok())
            .and_then(|values| box_size(values))
            .unwrap_or(DEFAULT_MEDIA_BOX)
    }

    /// Preview geometry fitted into `max_width` x `max_height`, with the
    /// page rotation applied before measuring.
    pub fn thumbnail(&self, max_width: u32, max_height: u32) -> Thumbnail {
        let (mut width, mut height) = self.media_size();
        if self.rotation.swaps_axes() {
            std::mem::swap(&mut width, &mut height);
        }

        // Shrink to fit, never enlarge.
        let scale = (f64::from(max_width) / width)
            .min(f64::from(max_height) / height)
            .min(1.0);

        Thumbnail {
            width: ((width * scale).round() as u32).max(1),
            height: ((height * scale).round() as u32).max(1),
            rotation: self.rotation,
        }
    }
}

fn inherited_attribute(document: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = document.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

fn box_size(values: &[Object]) -> Option<(f64, f64)> {
    let numbers: Vec<f64> = values
        .iter()
        .filter_map(|value| match value {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(f64::from(*r)),
            _ => None,
        })
        .collect();

    match numbers.as_slice() {
        [x0, y0, x1, y1] if x1 != x0 && y1 != y0 => Some(((x1 - x0).abs(), (y1 - y0).abs())),
        _ => None,
    }
}
