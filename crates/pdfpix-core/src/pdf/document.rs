//! Page image enumeration using lopdf.

use std::collections::HashSet;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::decode::decode_image;
use super::{ImageSource, PageImage, Result};
use crate::error::PdfError;

/// Page trees deeper than this are treated as broken.
const MAX_TREE_DEPTH: usize = 64;

/// An opened PDF document.
pub struct PdfDocument {
    document: Document,
    /// Page object ids in page-number order.
    pages: Vec<ObjectId>,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = Document::load(path)
            .map_err(|e| PdfError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_document(document)
    }

    /// Load a PDF from bytes.
    pub fn load_mem(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        Self::from_document(document)
    }

    fn from_document(mut document: Document) -> Result<Self> {
        // Handle PDFs with empty password encryption
        if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let pages: Vec<ObjectId> = document.get_pages().into_values().collect();
        debug!("Loaded PDF with {} pages", pages.len());

        Ok(Self { document, pages })
    }

    /// Resources dictionary for a page, following `/Parent` for inherited ones.
    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut node = self.document.get_object(page_id).and_then(Object::as_dict).ok()?;

        for _ in 0..MAX_TREE_DEPTH {
            if let Ok(resources) = node.get(b"Resources") {
                if let Ok((_, Object::Dictionary(dict))) = self.document.dereference(resources) {
                    return Some(dict);
                }
            }

            let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = self.document.get_object(parent).and_then(Object::as_dict).ok()?;
        }

        None
    }

    /// Walk the `/XObject` entries of `resources` in dictionary order.
    ///
    /// Image XObjects are decoded and appended to `out`; form XObjects are
    /// entered in place. `visiting` holds the forms on the current path so
    /// self-referencing forms terminate.
    fn collect_images(
        &self,
        page: u32,
        resources: &Dictionary,
        prefix: &str,
        visiting: &mut HashSet<ObjectId>,
        out: &mut Vec<PageImage>,
    ) -> Result<()> {
        let Ok(xobjects) = resources.get(b"XObject") else {
            return Ok(());
        };
        let Ok((_, Object::Dictionary(xobjects))) = self.document.dereference(xobjects) else {
            return Ok(());
        };

        for (key, entry) in xobjects.iter() {
            let name = format!("{}{}", prefix, String::from_utf8_lossy(key));
            let (id, object) = self
                .document
                .dereference(entry)
                .map_err(|e| PdfError::Parse(format!("page {page}, /{name}: {e}")))?;

            let Object::Stream(stream) = object else {
                continue;
            };
            let subtype = stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .unwrap_or_default();

            match subtype {
                b"Image" => {
                    trace!("Decoding /{} on page {}", name, page);
                    let image = decode_image(&self.document, stream).map_err(|reason| {
                        PdfError::UnsupportedImage {
                            page,
                            name: name.clone(),
                            reason,
                        }
                    })?;
                    out.push(PageImage { name, image });
                }
                b"Form" => {
                    if let Some(id) = id {
                        if !visiting.insert(id) {
                            trace!("Skipping recursive form /{}", name);
                            continue;
                        }
                    }

                    if let Ok((_, Object::Dictionary(form_resources))) = stream
                        .dict
                        .get(b"Resources")
                        .and_then(|r| self.document.dereference(r))
                    {
                        let nested = format!("{name}/");
                        self.collect_images(page, form_resources, &nested, visiting, out)?;
                    }

                    if let Some(id) = id {
                        visiting.remove(&id);
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl ImageSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_images(&self, page: u32) -> Result<Vec<PageImage>> {
        let page_id = page
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .copied()
            .ok_or(PdfError::InvalidPage(page))?;

        let mut images = Vec::new();
        if let Some(resources) = self.page_resources(page_id) {
            let mut visiting = HashSet::new();
            self.collect_images(page, resources, "", &mut visiting, &mut images)?;
        }

        debug!("Extracted {} images from page {}", images.len(), page);
        Ok(images)
    }
}
