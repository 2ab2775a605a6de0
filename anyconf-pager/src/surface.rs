use crate::transition::TransitionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewDisplay {
    #[default]
    Hidden,
    Shown,
}

/// Presentation state of the collection view as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSurface {
    pub display: ViewDisplay,
    /// Set between a render and the end of a leave transition.
    pub in_view: bool,
    pub motion: Option<TransitionKind>,
    /// Content is clipped while the view itself is transitioning.
    pub clip_content: bool,
    /// The collection rendered without any items.
    pub empty: bool,
}

impl ViewSurface {
    pub fn is_shown(&self) -> bool {
        self.display == ViewDisplay::Shown
    }
}
