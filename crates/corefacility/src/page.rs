use crate::{
    entity::{Entity, EntityDef, EntityState, ParentRef},
    transport::PageData,
    Error, Model, Result,
};

use std::{ops::Deref, sync::Arc};

/// One slice of a paginated search result.
///
/// A page is immutable with respect to navigation: [`next`](Self::next) and
/// [`previous`](Self::previous) fetch and return a new page, leaving this one
/// as it was.
#[derive(Debug)]
pub struct EntityPage<M> {
    def: Arc<EntityDef>,
    parent: Option<ParentRef>,
    total_count: u64,
    items: Vec<M>,
    next: Option<String>,
    previous: Option<String>,
}

impl<M: Model> EntityPage<M> {
    pub(crate) fn from_data(
        def: Arc<EntityDef>,
        parent: Option<ParentRef>,
        data: PageData,
    ) -> Result<EntityPage<M>> {
        if data.results.len() as u64 > data.count {
            return Err(Error::invalid_response(format!(
                "page holds {} items but the total count is {}",
                data.results.len(),
                data.count
            )));
        }

        let items = data
            .results
            .into_iter()
            .map(|record| {
                Entity::hydrate(Arc::clone(&def), record, parent.clone(), EntityState::Found)
                    .map(M::from)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EntityPage {
            def,
            parent,
            total_count: data.count,
            items,
            next: data.next,
            previous: data.previous,
        })
    }

    /// Fetches the following page.
    pub async fn next(&self) -> Result<EntityPage<M>> {
        match &self.next {
            Some(cursor) => self.fetch(cursor).await,
            None => Err(Error::page_range("next")),
        }
    }

    /// Fetches the preceding page.
    pub async fn previous(&self) -> Result<EntityPage<M>> {
        match &self.previous {
            Some(cursor) => self.fetch(cursor).await,
            None => Err(Error::page_range("previous")),
        }
    }

    async fn fetch(&self, cursor: &str) -> Result<EntityPage<M>> {
        tracing::debug!(entity = self.def.name(), cursor, "fetching page");
        let data = self.def.provider().fetch_page(cursor).await?;
        EntityPage::from_data(Arc::clone(&self.def), self.parent.clone(), data)
    }
}

impl<M> EntityPage<M> {
    /// Number of items across all pages.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of items on this page.
    pub fn page_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_first_page(&self) -> bool {
        self.previous.is_none()
    }

    pub fn is_last_page(&self) -> bool {
        self.next.is_none()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn previous_cursor(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Puts a freshly created entity in front, so it shows up without
    /// another request. The total count grows by one.
    pub fn unshift(&mut self, item: M) {
        self.items.insert(0, item);
        self.total_count += 1;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<M> {
        self.items
    }
}

impl<M> Deref for EntityPage<M> {
    type Target = [M];

    fn deref(&self) -> &[M] {
        &self.items
    }
}

impl<'a, M> IntoIterator for &'a EntityPage<M> {
    type Item = &'a M;
    type IntoIter = std::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<M> IntoIterator for EntityPage<M> {
    type Item = M;
    type IntoIter = std::vec::IntoIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
