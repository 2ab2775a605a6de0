use crate::page::PageId;

/// Shared translucent layer stacked directly above the current page.
///
/// `opacity` is a manual override written during drags and reverts. `None`
/// means the host's default styling applies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overlay {
    anchor: Option<PageId>,
    opacity: Option<f32>,
    removed: bool,
}

impl Overlay {
    /// Page the overlay is stacked against.
    pub fn anchor(&self) -> Option<PageId> {
        self.anchor
    }

    pub fn opacity(&self) -> Option<f32> {
        self.opacity
    }

    /// Whether the overlay is fading out ahead of being re-anchored.
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub(crate) fn position(&mut self, current: PageId) {
        self.removed = false;
        self.anchor = Some(current);
    }

    pub(crate) fn begin_removal(&mut self) {
        self.removed = true;
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = Some(opacity);
    }

    pub(crate) fn clear_opacity(&mut self) {
        self.opacity = None;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
