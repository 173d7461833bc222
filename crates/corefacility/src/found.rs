use crate::EntityPage;

/// Outcome of a search. The shape follows the entity type: paginated types
/// answer with a page, the others with every match at once.
#[derive(Debug)]
pub enum Found<M> {
    List(Vec<M>),
    Page(EntityPage<M>),
}

impl<M> Found<M> {
    pub fn is_page(&self) -> bool {
        matches!(self, Found::Page(_))
    }

    /// Items on hand, i.e. the whole list or the current page.
    pub fn items(&self) -> &[M] {
        match self {
            Found::List(items) => items,
            Found::Page(page) => page,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Total number of matches on the server.
    pub fn total_count(&self) -> u64 {
        match self {
            Found::List(items) => items.len() as u64,
            Found::Page(page) => page.total_count(),
        }
    }

    pub fn into_page(self) -> Option<EntityPage<M>> {
        match self {
            Found::Page(page) => Some(page),
            Found::List(_) => None,
        }
    }

    pub fn into_items(self) -> Vec<M> {
        match self {
            Found::List(items) => items,
            Found::Page(page) => page.into_items(),
        }
    }
}
