//! # anyconf pager
//!
//! Headless paging engine for the conference schedule viewer.
//!
//! Items (sessions) are measured by the host and packed top to bottom into
//! fixed-height pages. Exactly one page is current; its neighbours are kept
//! rendered so a vertical drag can reveal them. Dragging up pulls the
//! current page away and fades the overlay towards the next page; dragging
//! down pulls the previous page back over the current one. On release the
//! drag either commits to a neighbour or reverts.
//!
//! ## Host integration
//!
//! The engine owns page visibility, offsets and motion state but never
//! animates. The host supplies:
//!
//! - a [`TransitionRunner`], which plays transitions and fires their
//!   completions ([`TweenRunner`] is a time-based implementation),
//! - a [`FrameScheduler`], which delivers the per-frame drag tick
//!   ([`ManualFrameScheduler`] suits hosts that pump frames themselves),
//! - a [`DocumentPointerHub`] for releases outside the view's bounds.
//!
//! After a runner fires a completion the host calls
//! [`CollectionView::pump`] so the commit chain can advance.
#![allow(missing_docs)]

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod overlay;
pub mod packer;
pub mod page;
pub mod pointer;
pub mod subscription;
pub mod surface;
pub mod transition;
pub mod view;
pub mod window;

pub use config::{EasingKind, PagerConfig};
pub use engine::{CompletionAction, PagingEngine};
pub use error::{PagerError, Result};
pub use frame::{FrameHandle, FrameScheduler, ManualFrameScheduler};
pub use geometry::{Delta, Point};
pub use gesture::{
    DragFrame, DragMode, GesturePhase, GestureTracker, Release, Settle,
};
pub use overlay::Overlay;
pub use packer::{PackedPages, PageLayoutPacker};
pub use page::{Page, PageId, PageVisibility, PlacedItem, RenderedItem};
pub use pointer::{
    DocumentPointerKind, EventTarget, PointerEvent, PointerOutcome,
};
pub use subscription::{
    DocumentPointerHub, DocumentSubscription, SubscriptionId,
};
pub use surface::{ViewDisplay, ViewSurface};
pub use transition::{
    Completion, TransitionKind, TransitionRequest, TransitionRunner,
    TransitionTarget, TweenRunner, TweenSample,
};
pub use view::{
    AfterRender, CollectionOptions, CollectionView, ItemFilter, ItemRenderer,
    RouteMatcher, RouteTarget,
};
pub use window::PageWindow;
