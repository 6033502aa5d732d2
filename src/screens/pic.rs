//! PIC management: vendor and customer contacts in one table.

#[cfg(test)]
#[path = "pic_test.rs"]
mod pic_test;

use tracing::info;

use super::{Flow, RemoteCollection, Toasts, check, created_id, needle, settle};
use crate::model::pic::{CustomerPicWire, Pic, PicForm, PicType, VendorPicWire};
use crate::net::ApiClient;

pub struct PicScreen {
    api: ApiClient,
    pub pics: RemoteCollection<Pic>,
    pub toasts: Toasts,
}

impl PicScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, pics: RemoteCollection::new(), toasts: Toasts::default() }
    }

    /// Fetch both endpoints and merge them, vendors first. If one endpoint
    /// fails its previous rows are kept.
    pub async fn load(&mut self) -> Flow<()> {
        let vendor = self.api.get_list::<VendorPicWire>(PicType::Vendor.endpoint(), &[]).await;
        let vendor = settle(&mut self.toasts, vendor, "Failed to load vendor PICs")?
            .map(|rows| rows.into_iter().filter_map(VendorPicWire::into_pic).collect::<Vec<_>>());

        let customer = self.api.get_list::<CustomerPicWire>(PicType::Customer.endpoint(), &[]).await;
        let customer = settle(&mut self.toasts, customer, "Failed to load customer PICs")?
            .map(|rows| rows.into_iter().filter_map(CustomerPicWire::into_pic).collect::<Vec<_>>());

        let previous = |kind: PicType| -> Vec<Pic> {
            self.pics.items().iter().filter(|p| p.pic_type() == kind).cloned().collect()
        };
        let mut merged = vendor.unwrap_or_else(|| previous(PicType::Vendor));
        merged.extend(customer.unwrap_or_else(|| previous(PicType::Customer)));
        self.pics.set_items(merged);
        Ok(())
    }

    /// Search over name, email, and phone, optionally narrowed to one type.
    #[must_use]
    pub fn filtered(&self, search: &str, kind: Option<PicType>) -> Vec<&Pic> {
        let needle = needle(search);
        self.pics.filtered(|pic| {
            (needle.is_empty() || pic.matches(&needle)) && kind.is_none_or(|k| pic.pic_type() == k)
        })
    }

    /// POST to the endpoint for `form.kind`. The new row is appended locally
    /// when the backend echoes an id, otherwise the list is re-fetched.
    pub async fn create(&mut self, form: &PicForm) -> Flow<bool> {
        if !check(&mut self.toasts, form) {
            return Ok(false);
        }
        let result = self.api.post(form.kind.endpoint(), form.to_api(None)).await;
        let Some(created) = settle(&mut self.toasts, result, "Failed to create PIC")? else {
            return Ok(false);
        };
        info!(kind = form.kind.as_str(), "pic created");
        self.toasts.success("PIC created");
        match created_id(&created, &["pic_id", "id"]) {
            Some(id) => self.pics.push(form.to_pic(&id)),
            None => self.load().await?,
        }
        Ok(true)
    }

    pub async fn update(&mut self, pic_id: &str, form: &PicForm) -> Flow<bool> {
        if !check(&mut self.toasts, form) {
            return Ok(false);
        }
        let path = format!("{}/{pic_id}", form.kind.endpoint());
        let result = self.api.put(&path, form.to_api(Some(pic_id))).await;
        if settle(&mut self.toasts, result, "Failed to update PIC")?.is_none() {
            return Ok(false);
        }
        let kind = form.kind;
        self.pics.replace_where(|p| p.pic_id == pic_id && p.pic_type() == kind, form.to_pic(pic_id));
        self.toasts.success("PIC updated");
        Ok(true)
    }

    pub async fn delete(&mut self, kind: PicType, pic_id: &str) -> Flow<bool> {
        let path = format!("{}/{pic_id}", kind.endpoint());
        let result = self.api.delete(&path).await;
        if settle(&mut self.toasts, result, "Failed to delete PIC")?.is_none() {
            return Ok(false);
        }
        self.pics.remove_where(|p| p.pic_id == pic_id && p.pic_type() == kind);
        self.toasts.success("PIC deleted");
        Ok(true)
    }
}
