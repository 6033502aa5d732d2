//! Load a remote collection once, filter it locally.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;


use super::{Flow, Toasts, settle};
use crate::model::wire::WireRow;
use crate::net::ApiClient;

#[derive(Clone, Debug)]
pub struct RemoteCollection<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new(), loading: false, error: None }
    }
}

impl<T> RemoteCollection<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed load, cleared by the next success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the first item matching `predicate`. Returns false when none did.
    pub fn replace_where(&mut self, predicate: impl Fn(&T) -> bool, item: T) -> bool {
        match self.items.iter_mut().find(|existing| predicate(existing)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Apply `update` to the first item matching `predicate`.
    pub fn update_where(&mut self, predicate: impl Fn(&T) -> bool, update: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|existing| predicate(existing)) {
            Some(slot) => {
                update(slot);
                true
            }
            None => false,
        }
    }

    /// Remove every item matching `predicate`, returning how many went.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }
}

impl<T: WireRow> RemoteCollection<T> {
    /// Fetch `path` and replace the items. On failure the previous items are
    /// kept and the message is toasted with `fallback` as the default.
    pub async fn load(
        &mut self,
        api: &ApiClient,
        toasts: &mut Toasts,
        path: &str,
        query: &[(&str, &str)],
        fallback: &str,
    ) -> Flow<bool> {
        self.loading = true;
        let result = api.get_list::<T>(path, query).await;
        self.loading = false;

        if let Err(e) = &result {
            self.error = Some(e.toast_message(fallback));
        }
        match settle(toasts, result, fallback)? {
            Some(items) => {
                self.items = items;
                self.error = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
