//! Building the output document one page at a time.
//!
//! Every object a page refers to is copied into the output under a fresh
//! object id. Copies are remembered per `(source, object id)`, so a font
//! shared by ten pages of one source is copied once. The source page tree
//! is never copied: references to `/Pages` nodes, and to pages that are not
//! part of the output, become `null`.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::page::LopdfPage;

/// A PDF under construction.
#[derive(Debug)]
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    sources: HashMap<PathBuf, usize>,
    copied: HashMap<(usize, ObjectId), ObjectId>,
}

impl OutputDocument {
    /// Start an empty document.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            kids: Vec::new(),
            sources: HashMap::new(),
            copied: HashMap::new(),
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append `page` after the current last page and return its new id.
    pub fn append(&mut self, page: &LopdfPage) -> ObjectId {
        let source = self.source_slot(page.source_path());
        let page_id = self.document.new_object_id();

        // Back-references to this page (e.g. an annotation's /P) land on the
        // first output copy of it.
        self.copied.entry((source, page.page_id())).or_insert(page_id);

        let mut dictionary = self.copy_dictionary(page.document(), source, page.dictionary());
        dictionary.set("Parent", Object::Reference(self.pages_id));

        self.document
            .objects
            .insert(page_id, Object::Dictionary(dictionary));
        self.kids.push(page_id);

        page_id
    }

    /// Close the page tree and return the finished document.
    pub fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        let kids = self
            .kids
            .into_iter()
            .map(Object::Reference)
            .collect::<Vec<_>>();

        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        self.document
    }

    fn source_slot(&mut self, path: &Path) -> usize {
        let next = self.sources.len();
        *self.sources.entry(path.to_path_buf()).or_insert(next)
    }

    fn copy_object(&mut self, source: &Document, slot: usize, object: &Object) -> Object {
        match object {
            Object::Reference(id) => match self.copy_reference(source, slot, *id) {
                Some(new_id) => Object::Reference(new_id),
                None => Object::Null,
            },
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(source, slot, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(source, slot, dict)),
            Object::Stream(stream) => {
                let mut stream = stream.clone();
                stream.dict = self.copy_dictionary(source, slot, &stream.dict);
                Object::Stream(stream)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, source: &Document, slot: usize, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            copy.set(key.clone(), self.copy_object(source, slot, value));
        }
        copy
    }

    fn copy_reference(&mut self, source: &Document, slot: usize, id: ObjectId) -> Option<ObjectId> {
        if let Some(&new_id) = self.copied.get(&(slot, id)) {
            return Some(new_id);
        }

        let object = source.get_object(id).ok()?;
        if matches!(object.type_name().unwrap_or(b""), b"Page" | b"Pages") {
            return None;
        }

        // Registered before recursing so cycles resolve to this id.
        let new_id = self.document.new_object_id();
        self.copied.insert((slot, id), new_id);

        let copy = self.copy_object(source, slot, object);
        self.document.objects.insert(new_id, copy);

        Some(new_id)
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}
