//! Packs rendered items into fixed-height pages.
//!
//! Items are laid out top to bottom. An item whose bottom edge would cross
//! the current page's bottom edge starts a new page; items are never split.

use anyconf_model::ItemId;
use std::collections::HashMap;

use crate::page::{Page, PageId, RenderedItem};

#[derive(Debug, Clone)]
pub struct PageLayoutPacker {
    page_height: f32,
    pages: Vec<Page>,
    by_item: HashMap<ItemId, PageId>,
}

/// Result of a packing pass.
#[derive(Debug, Clone, Default)]
pub struct PackedPages {
    pub pages: Vec<Page>,
    pub by_item: HashMap<ItemId, PageId>,
}

impl PackedPages {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }
}

impl PageLayoutPacker {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            pages: Vec::new(),
            by_item: HashMap::new(),
        }
    }

    /// Page currently receiving items.
    pub fn current(&self) -> Option<&Page> {
        self.pages.last()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Place `item` on the current page, or on a fresh page when it does not
    /// fit. Returns the page the item ended up on.
    pub fn pack(&mut self, item: RenderedItem) -> PageId {
        if self.pages.is_empty() {
            self.add_page();
        }

        let page = self.current_mut();
        let bottom = page.append(item).bottom();
        let overflows = bottom > page.bottom();

        // An item that overflows an otherwise empty page stays where it is;
        // moving it would only leave an empty page behind.
        if overflows && page.items().len() > 1 {
            let moved = page.take_last();
            self.add_page();
            if let Some(moved) = moved {
                let page = self.current_mut();
                let bottom = page.append(moved).bottom();
                if bottom > page.bottom() {
                    log::warn!(
                        "item taller than a page ({bottom} > {}) on {}",
                        page.bottom(),
                        page.id()
                    );
                }
            }
        } else if overflows {
            log::warn!(
                "item taller than a page ({bottom} > {})",
                self.page_height
            );
        }

        let page = self.current_mut();
        page.fix_height();
        let page_id = page.id();
        let last = page.items().last().map(|placed| placed.id.clone());
        if let Some(id) = last {
            self.by_item.insert(id, page_id);
        }
        page_id
    }

    pub fn finish(self) -> PackedPages {
        log::debug!("packed into {} pages", self.pages.len());
        PackedPages {
            pages: self.pages,
            by_item: self.by_item,
        }
    }

    fn add_page(&mut self) {
        let id = PageId(self.pages.len());
        self.pages.push(Page::new(id, self.page_height));
    }

    fn current_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
