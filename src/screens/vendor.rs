//! Vendor list and the vendor-creation wizard.
//!
//! DESIGN
//! ======
//! The wizard keeps its whole form in one [`VendorDraft`] and writes it
//! through to the session store after every change, so an interrupted run
//! resumes where it stopped. Submission is a fixed sequence: upload every
//! local document, then POST one composite vendor. An upload failure stops
//! before the POST and keeps the draft, including URLs already obtained, so a
//! retry only uploads what is left. The draft is cleared on close and after a
//! successful submit.

#[cfg(test)]
#[path = "vendor_test.rs"]
mod vendor_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{Flow, RemoteCollection, Toasts, check, needle, settle};
use crate::model::port_call::Service;
use crate::model::vendor::{NewVendorPayload, Vendor, VendorCompanyInfo, VendorDocument, VendorPicDraft};
use crate::net::ApiClient;
use crate::storage::VENDOR_DRAFT_KEY;

// =============================================================================
// VENDOR LIST
// =============================================================================

pub struct VendorScreen {
    api: ApiClient,
    pub vendors: RemoteCollection<Vendor>,
    pub services: RemoteCollection<Service>,
    pub toasts: Toasts,
}

impl VendorScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, vendors: RemoteCollection::new(), services: RemoteCollection::new(), toasts: Toasts::default() }
    }

    pub async fn load(&mut self) -> Flow<()> {
        self.vendors.load(&self.api, &mut self.toasts, "/vendor", &[], "Failed to load vendors").await?;
        self.services.load(&self.api, &mut self.toasts, "/service", &[], "Failed to load services").await?;
        Ok(())
    }

    /// Search over name, email, phone, and services; `status` narrows to one
    /// status (rows without a status count as active).
    #[must_use]
    pub fn filtered(&self, search: &str, status: Option<&str>) -> Vec<&Vendor> {
        let needle = needle(search);
        self.vendors
            .filtered(|v| (needle.is_empty() || v.matches(&needle)) && status.is_none_or(|s| v.status_is(s)))
    }

    pub async fn update(&mut self, vendor: &Vendor) -> Flow<bool> {
        let body = serde_json::to_value(vendor).unwrap_or_default();
        let result = self.api.put(&format!("/vendor/{}", vendor.vendor_id), body).await;
        if settle(&mut self.toasts, result, "Failed to update vendor")?.is_none() {
            return Ok(false);
        }
        self.vendors.replace_where(|v| v.vendor_id == vendor.vendor_id, vendor.clone());
        self.toasts.success("Vendor updated");
        Ok(true)
    }

    pub async fn delete(&mut self, vendor_id: &str) -> Flow<bool> {
        let result = self.api.delete(&format!("/vendor/{vendor_id}")).await;
        if settle(&mut self.toasts, result, "Failed to delete vendor")?.is_none() {
            return Ok(false);
        }
        self.vendors.remove_where(|v| v.vendor_id == vendor_id);
        self.toasts.success("Vendor deleted");
        Ok(true)
    }
}

// =============================================================================
// WIZARD DRAFT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocumentSource {
    /// Picked but not uploaded yet.
    Local { path: PathBuf },
    Uploaded { url: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDraft {
    /// Stable row key; survives renames and reordering.
    pub key: String,
    pub name: String,
    pub source: DocumentSource,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDraft {
    pub info: VendorCompanyInfo,
    pub documents: Vec<DocumentDraft>,
    pub pics: Vec<VendorPicDraft>,
}

impl VendorDraft {
    fn fresh() -> Self {
        Self { pics: vec![VendorPicDraft::default()], ..Self::default() }
    }
}

// =============================================================================
// WIZARD
// =============================================================================

pub struct VendorWizard {
    api: ApiClient,
    draft: VendorDraft,
    pub toasts: Toasts,
}

impl VendorWizard {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, draft: VendorDraft::fresh(), toasts: Toasts::default() }
    }

    /// Open the wizard, restoring a saved draft when one exists.
    pub fn open(&mut self) -> bool {
        match self.api.session().load_draft::<VendorDraft>(VENDOR_DRAFT_KEY) {
            Ok(Some(draft)) => {
                self.draft = draft;
                true
            }
            Ok(None) => {
                self.draft = VendorDraft::fresh();
                false
            }
            Err(e) => {
                warn!(error = %e, "vendor draft unreadable; starting fresh");
                self.draft = VendorDraft::fresh();
                false
            }
        }
    }

    #[must_use]
    pub fn draft(&self) -> &VendorDraft {
        &self.draft
    }

    pub fn set_info(&mut self, info: VendorCompanyInfo) {
        self.draft.info = info;
        self.persist();
    }

    /// Attach a local file; returns the new row's key.
    pub fn add_document(&mut self, path: impl Into<PathBuf>, name: Option<String>) -> String {
        let path = path.into();
        let name = name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| file_name(&path));
        let key = uuid::Uuid::new_v4().to_string();
        self.draft.documents.push(DocumentDraft { key: key.clone(), name, source: DocumentSource::Local { path } });
        self.persist();
        key
    }

    pub fn remove_document(&mut self, key: &str) -> bool {
        let before = self.draft.documents.len();
        self.draft.documents.retain(|d| d.key != key);
        let removed = self.draft.documents.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Fill the first blank PIC row, or append a new one.
    pub fn add_pic(&mut self, pic: VendorPicDraft) {
        match self.draft.pics.iter_mut().find(|p| **p == VendorPicDraft::default()) {
            Some(blank) => *blank = pic,
            None => self.draft.pics.push(pic),
        }
        self.persist();
    }

    pub fn update_pic(&mut self, index: usize, pic: VendorPicDraft) -> bool {
        let Some(slot) = self.draft.pics.get_mut(index) else {
            return false;
        };
        *slot = pic;
        self.persist();
        true
    }

    /// Remove a PIC row. The last row stays so the section is never empty.
    pub fn remove_pic(&mut self, index: usize) -> bool {
        if self.draft.pics.len() <= 1 || index >= self.draft.pics.len() {
            return false;
        }
        self.draft.pics.remove(index);
        self.persist();
        true
    }

    /// Discard the form and its saved draft.
    pub fn close(&mut self) {
        self.draft = VendorDraft::fresh();
        self.clear_saved();
    }

    /// Validate, upload pending documents, then create the vendor.
    pub async fn submit(&mut self) -> Flow<bool> {
        if !self.validate() {
            return Ok(false);
        }

        for index in 0..self.draft.documents.len() {
            let DocumentSource::Local { path } = &self.draft.documents[index].source else {
                continue;
            };
            let path = path.clone();
            let Some(url) = self.upload(&path).await? else {
                return Ok(false);
            };
            self.draft.documents[index].source = DocumentSource::Uploaded { url };
            self.persist();
        }

        let documents = self
            .draft
            .documents
            .iter()
            .filter_map(|d| match &d.source {
                DocumentSource::Uploaded { url } => Some(VendorDocument { name: d.name.clone(), url: url.clone() }),
                DocumentSource::Local { .. } => None,
            })
            .collect();
        let pics: Vec<VendorPicDraft> =
            self.draft.pics.iter().filter(|p| **p != VendorPicDraft::default()).cloned().collect();
        let payload = NewVendorPayload::new(&self.draft.info, documents, &pics);

        let result = self.api.post("/vendor", serde_json::to_value(&payload).unwrap_or_default()).await;
        if settle(&mut self.toasts, result, "Failed to create vendor")?.is_none() {
            return Ok(false);
        }
        info!(name = %payload.name, documents = payload.documents.len(), pics = payload.pics.len(), "vendor created");
        self.toasts.success("Vendor created");
        self.close();
        Ok(true)
    }

    fn validate(&mut self) -> bool {
        if !check(&mut self.toasts, &self.draft.info) {
            return false;
        }
        let filled: Vec<&VendorPicDraft> = self.draft.pics.iter().filter(|p| **p != VendorPicDraft::default()).collect();
        if filled.is_empty() {
            self.toasts.error("Add at least one PIC");
            return false;
        }
        filled.into_iter().all(|pic| check(&mut self.toasts, pic))
    }

    async fn upload(&mut self, path: &Path) -> Flow<Option<String>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "document unreadable");
                self.toasts.error(format!("Cannot read {}", path.display()));
                return Ok(None);
            }
        };
        let name = file_name(path);
        let result = self.api.upload(&name, mime_for(path), bytes).await;
        settle(&mut self.toasts, result, &format!("Failed to upload {name}"))
    }

    fn persist(&self) {
        if let Err(e) = self.api.session().save_draft(VENDOR_DRAFT_KEY, &self.draft) {
            warn!(error = %e, "vendor draft not saved");
        }
    }

    fn clear_saved(&self) {
        if let Err(e) = self.api.session().clear_draft(VENDOR_DRAFT_KEY) {
            warn!(error = %e, "vendor draft not cleared");
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
