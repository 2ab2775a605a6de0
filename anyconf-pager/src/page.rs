//! Pages and the items placed on them.

use anyconf_model::ItemId;
use std::fmt;

use crate::transition::TransitionKind;

/// Position of a page in the collection's page sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(pub usize);

impl PageId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

/// An item as measured by the host, before it is placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    pub id: ItemId,
    pub height: f32,
}

impl RenderedItem {
    pub fn new(id: impl Into<ItemId>, height: f32) -> Self {
        Self {
            id: id.into(),
            height,
        }
    }
}

/// An item placed on a page. `rendered_top` is relative to the page's top
/// edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub rendered_top: f32,
    pub rendered_height: f32,
}

impl PlacedItem {
    pub fn bottom(&self) -> f32 {
        self.rendered_top + self.rendered_height
    }
}

/// How a page element is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageVisibility {
    #[default]
    Hidden,
    /// Fully rendered in place (current page, or the next page beneath it).
    Rendered,
    /// Lighter background rendering, parked one page height above.
    RenderedAsPrevious,
}

/// Fixed-height container for a contiguous run of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: PageId,
    items: Vec<PlacedItem>,
    height: f32,
    height_fixed: bool,
    visibility: PageVisibility,
    motion: Option<TransitionKind>,
    offset_y: f32,
}

impl Page {
    pub(crate) fn new(id: PageId, height: f32) -> Self {
        Self {
            id,
            items: Vec::new(),
            height,
            height_fixed: false,
            visibility: PageVisibility::Hidden,
            motion: None,
            offset_y: 0.0,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.items.iter().any(|placed| &placed.id == item)
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_height_fixed(&self) -> bool {
        self.height_fixed
    }

    /// Bottom edge of the rendered content.
    pub fn content_height(&self) -> f32 {
        self.items.last().map_or(0.0, PlacedItem::bottom)
    }

    /// Bottom edge of the page container. Pages share one origin.
    pub fn bottom(&self) -> f32 {
        self.height
    }

    pub fn visibility(&self) -> PageVisibility {
        self.visibility
    }

    pub fn motion(&self) -> Option<TransitionKind> {
        self.motion
    }

    /// Current vertical translation of the page element.
    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    /// Translation at which the page sits when parked as the previous page.
    pub fn parked_offset(&self) -> f32 {
        -self.height
    }

    pub(crate) fn append(&mut self, item: RenderedItem) -> &PlacedItem {
        let rendered_top = self.content_height();
        self.items.push(PlacedItem {
            id: item.id,
            rendered_top,
            rendered_height: item.height,
        });
        &self.items[self.items.len() - 1]
    }

    pub(crate) fn take_last(&mut self) -> Option<RenderedItem> {
        self.items.pop().map(|placed| RenderedItem {
            id: placed.id,
            height: placed.rendered_height,
        })
    }

    /// Freeze the container height, growing it to the rendered content when
    /// a single item is taller than the page.
    pub(crate) fn fix_height(&mut self) {
        self.height = self.height.max(self.content_height());
        self.height_fixed = true;
    }

    pub(crate) fn render(&mut self) {
        self.visibility = PageVisibility::Rendered;
        self.offset_y = 0.0;
    }

    pub(crate) fn render_as_previous(&mut self) {
        self.visibility = PageVisibility::RenderedAsPrevious;
        self.offset_y = self.parked_offset();
    }

    pub(crate) fn hide(&mut self) {
        self.visibility = PageVisibility::Hidden;
    }

    pub(crate) fn set_offset(&mut self, offset_y: f32) {
        self.offset_y = offset_y;
    }

    /// Mark the page as transitioning. Returns `false` when the same motion
    /// is already running, which means a completion is still outstanding.
    pub(crate) fn begin_motion(&mut self, kind: TransitionKind) -> bool {
        if self.motion == Some(kind) {
            return false;
        }
        self.motion = Some(kind);
        true
    }

    pub(crate) fn clear_motion(&mut self) {
        self.motion = None;
    }
}
