//! Port-call detail page: assigned services, the assign dialog, and the
//! status roll-up.
//!
//! DESIGN
//! ======
//! The roll-up walks services one at a time, reads each one's task headers,
//! and PATCHes `{status: true}` when every header is done. It does no locking
//! and no retries. Two viewers can both PATCH the same service; the body is
//! idempotent so the duplicate is harmless.

#[cfg(test)]
#[path = "port_call_test.rs"]
mod port_call_test;

use serde_json::{Value, json};
use tracing::{info, warn};

use super::{Flow, Redirect, RemoteCollection, Toasts, check, needle, settle};
use crate::model::pcs::{CompletionStats, NewPortCallService, PortCallService, TaskHeader, needs_completion};
use crate::model::port_call::{PortCall, Service};
use crate::model::wire;
use crate::model::vendor::Vendor;
use crate::net::ApiClient;

pub struct PortCallScreen {
    api: ApiClient,
    job_id: String,
    pub port_call: Option<PortCall>,
    pub services: RemoteCollection<PortCallService>,
    pub catalog: RemoteCollection<Service>,
    pub vendors: RemoteCollection<Vendor>,
    pub toasts: Toasts,
}

impl PortCallScreen {
    #[must_use]
    pub fn new(api: ApiClient, job_id: impl Into<String>) -> Self {
        Self {
            api,
            job_id: job_id.into(),
            port_call: None,
            services: RemoteCollection::new(),
            catalog: RemoteCollection::new(),
            vendors: RemoteCollection::new(),
            toasts: Toasts::default(),
        }
    }

    #[must_use]
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Populate the page: assigned services, the port call itself, and the
    /// service and vendor catalogs used by the assign dialog.
    pub async fn load(&mut self) -> Flow<()> {
        self.load_services().await?;

        let port_call = self.api.get_one::<Value>("/portcall", &[("job_id", self.job_id.as_str())]).await;
        if let Some(value) = settle(&mut self.toasts, port_call, "Failed to load port call")? {
            self.port_call = first_port_call(value, &self.job_id);
        }

        self.catalog.load(&self.api, &mut self.toasts, "/service", &[], "Failed to load services").await?;
        self.vendors.load(&self.api, &mut self.toasts, "/vendor", &[], "Failed to load vendors").await?;
        Ok(())
    }

    async fn load_services(&mut self) -> Flow<bool> {
        let path = format!("/pcs/job/{}", self.job_id);
        self.services.load(&self.api, &mut self.toasts, &path, &[], "Failed to load port call services").await
    }

    /// Service/vendor search. A blank search returns every row in order.
    #[must_use]
    pub fn filtered(&self, search: &str) -> Vec<&PortCallService> {
        let needle = needle(search);
        self.services.filtered(|pcs| needle.is_empty() || pcs.matches(&needle))
    }

    /// Vendors the assign dialog offers once `service_id` is picked.
    #[must_use]
    pub fn vendors_for_service(&self, service_id: &str) -> Vec<&Vendor> {
        let service_name = self
            .catalog
            .items()
            .iter()
            .find(|s| s.service_id == service_id)
            .map_or("", |s| s.service_name.as_str());
        self.vendors.filtered(|v| v.offers(service_id, service_name))
    }

    #[must_use]
    pub fn completion_stats(&self) -> CompletionStats {
        CompletionStats::from_services(self.services.items())
    }

    /// Assign-dialog submit. Returns true once the service is created and the
    /// list re-fetched.
    pub async fn create_service(&mut self, service_id: &str, vendor_id: &str) -> Flow<bool> {
        let form = NewPortCallService {
            job_id: self.job_id.clone(),
            service_id: service_id.trim().to_owned(),
            vendor_id: vendor_id.trim().to_owned(),
            service_name: self
                .catalog
                .items()
                .iter()
                .find(|s| s.service_id == service_id)
                .map(|s| s.service_name.clone()),
            vendor_name: self.vendors.items().iter().find(|v| v.vendor_id == vendor_id).map(|v| v.name.clone()),
        };
        if !check(&mut self.toasts, &form) {
            return Ok(false);
        }

        let body = serde_json::to_value(&form).unwrap_or(Value::Null);
        let created = self.api.post("/pcs", body).await;
        if settle(&mut self.toasts, created, "Failed to add service")?.is_none() {
            return Ok(false);
        }
        info!(job_id = %self.job_id, service_id, vendor_id, "port call service created");
        self.toasts.success("Service added");
        self.load_services().await?;
        Ok(true)
    }

    pub async fn delete_service(&mut self, id: &str) -> Flow<bool> {
        let result = self.api.delete(&format!("/pcs/{id}")).await;
        if settle(&mut self.toasts, result, "Failed to delete service")?.is_none() {
            return Ok(false);
        }
        self.services.remove_where(|pcs| pcs.id == id);
        self.toasts.success("Service removed");
        Ok(true)
    }

    /// Flip services whose task headers are all complete. Services already
    /// marked complete are not polled. A failure on one service is logged and
    /// the walk continues. Returns the ids that were flipped.
    pub async fn roll_up_statuses(&mut self) -> Flow<Vec<String>> {
        let pending: Vec<PortCallService> = self.services.filtered(|pcs| !pcs.status).into_iter().cloned().collect();
        let mut flipped = Vec::new();

        for pcs in pending {
            let path = format!("/servicetask/headers/service/{}", pcs.id);
            let headers = match self.api.get_list::<TaskHeader>(&path, &[]).await {
                Ok(headers) => headers,
                Err(e) if e.is_auth() => return Err(Redirect::login()),
                Err(e) => {
                    warn!(pcs_id = %pcs.id, error = %e, "task headers unavailable; skipping");
                    continue;
                }
            };
            if !needs_completion(&pcs, &headers) {
                continue;
            }

            match self.api.patch(&format!("/pcs/{}", pcs.id), json!({ "status": true })).await {
                Ok(_) => {
                    self.services.update_where(|s| s.id == pcs.id, |s| s.status = true);
                    info!(pcs_id = %pcs.id, headers = headers.len(), "service rolled up to complete");
                    flipped.push(pcs.id);
                }
                Err(e) if e.is_auth() => return Err(Redirect::login()),
                Err(e) => warn!(pcs_id = %pcs.id, error = %e, "status patch failed; skipping"),
            }
        }
        Ok(flipped)
    }
}

/// `/portcall?job_id=` answers either one object or a list.
fn first_port_call(value: Value, job_id: &str) -> Option<PortCall> {
    let rows = match crate::net::envelope::unwrap_data(value) {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    let calls: Vec<PortCall> = rows.into_iter().filter_map(|row| wire::from_row(row).ok()).collect();
    let index = calls.iter().position(|c| c.job_id == job_id).unwrap_or(0);
    calls.into_iter().nth(index)
}
