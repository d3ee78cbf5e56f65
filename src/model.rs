//! Ordered root and modal stacks backing the platform's navigation state.

use crate::error::NavError;
use crate::page::{PageId, PageRef};

/// Pure navigation state: a stack of root pages and, above the current
/// root, a stack of modal pages.
///
/// Mutation is synchronous and never touches the physical tree, so
/// [`current_page`] always reflects intent immediately, even while a
/// transition is still animating the matching physical change.
///
/// [`current_page`]: NavigationModel::current_page
#[derive(Default)]
pub struct NavigationModel {
    roots: Vec<PageRef>,
    modals: Vec<PageRef>,
}

impl NavigationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new root page.
    ///
    /// The secondary insertion point exists for interface parity with
    /// nested navigation containers; cross-stack inserts are not supported
    /// at this level and fail without mutating anything.
    pub fn push(&mut self, page: PageRef, before: Option<&PageRef>) -> Result<(), NavError> {
        if before.is_some() {
            return Err(NavError::unsupported("push before an existing page"));
        }
        self.roots.push(page);
        Ok(())
    }

    pub fn push_modal(&mut self, page: PageRef) {
        self.modals.push(page);
    }

    /// Remove and return the top modal.
    ///
    /// # Panics
    ///
    /// Popping with no modal present is a caller bug, not a recoverable
    /// state.
    pub fn pop_modal(&mut self) -> PageRef {
        self.modals
            .pop()
            .expect("pop_modal called with an empty modal stack")
    }

    /// The topmost modal if any, else the topmost root.
    pub fn current_page(&self) -> Option<&PageRef> {
        self.modals.last().or_else(|| self.roots.last())
    }

    pub fn is_current(&self, id: PageId) -> bool {
        self.current_page().map(|page| page.id()) == Some(id)
    }

    pub fn roots(&self) -> &[PageRef] {
        &self.roots
    }

    pub fn modals(&self) -> &[PageRef] {
        &self.modals
    }
}
