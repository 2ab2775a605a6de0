//! Collection view lifecycle
//!
//! A [`CollectionView`] is one paginated list instance: it renders a slice of
//! items into pages, reacts to route changes that target it, forwards pointer
//! input to its [`PagingEngine`], and tears everything down on destroy.

use std::fmt;
use std::rc::Rc;

use anyconf_model::{ItemId, ModelError};

use crate::config::PagerConfig;
use crate::engine::PagingEngine;
use crate::error::{PagerError, Result};
use crate::frame::{FrameHandle, FrameScheduler};
use crate::packer::PageLayoutPacker;
use crate::page::RenderedItem;
use crate::pointer::{DocumentPointerKind, PointerEvent, PointerOutcome};
use crate::subscription::{
    DocumentPointerHub, DocumentSubscription, SubscriptionId,
};
use crate::transition::{TransitionKind, TransitionRunner};

/// Item predicate applied before packing.
pub type ItemFilter<T> = Box<dyn Fn(&T) -> bool>;

/// Decides whether a route activates the view. Receives the view id.
pub type RouteMatcher = Box<dyn Fn(&str, &RouteTarget) -> bool>;

/// Runs after every render, once the pages are installed and the current
/// page is set. Used for jumps such as "open on the session running now".
pub type AfterRender = Box<dyn FnMut(&mut PagingEngine)>;

pub struct CollectionOptions<T> {
    /// Instance id matched against incoming routes.
    pub id: String,
    pub filter: Option<ItemFilter<T>>,
    /// Replaces the default `instance_id == id` match.
    pub route_matcher: Option<RouteMatcher>,
    pub after_render: Option<AfterRender>,
}

impl<T> CollectionOptions<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filter: None,
            route_matcher: None,
            after_render: None,
        }
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn with_route_matcher(
        mut self,
        matcher: impl Fn(&str, &RouteTarget) -> bool + 'static,
    ) -> Self {
        self.route_matcher = Some(Box::new(matcher));
        self
    }

    pub fn with_after_render(
        mut self,
        hook: impl FnMut(&mut PagingEngine) + 'static,
    ) -> Self {
        self.after_render = Some(Box::new(hook));
        self
    }

    fn accepts(&self, item: &T) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(item))
    }

    fn handles(&self, route: &RouteTarget) -> bool {
        match &self.route_matcher {
            Some(matcher) => matcher(&self.id, route),
            None => route.instance_id == self.id,
        }
    }
}

impl<T> fmt::Debug for CollectionOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionOptions")
            .field("id", &self.id)
            .field("filter", &self.filter.is_some())
            .field("route_matcher", &self.route_matcher.is_some())
            .field("after_render", &self.after_render.is_some())
            .finish()
    }
}

/// Route activation addressed to a view instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteTarget {
    pub instance_id: String,
    /// Item to open the view on; falls back to the first page.
    pub item_id: Option<ItemId>,
    /// Router transition id; `None` uses the configured default.
    pub transition: Option<String>,
}

/// Measures an item for packing.
pub trait ItemRenderer<T> {
    fn render_item(
        &mut self,
        item: &T,
    ) -> std::result::Result<RenderedItem, ModelError>;
}

impl<T, F> ItemRenderer<T> for F
where
    F: FnMut(&T) -> std::result::Result<RenderedItem, ModelError>,
{
    fn render_item(
        &mut self,
        item: &T,
    ) -> std::result::Result<RenderedItem, ModelError> {
        self(item)
    }
}

pub struct CollectionView<T> {
    options: CollectionOptions<T>,
    engine: PagingEngine,
    subscription: Option<DocumentSubscription>,
    attached: bool,
}

impl<T> fmt::Debug for CollectionView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionView")
            .field("options", &self.options)
            .field("engine", &self.engine)
            .field("subscription", &self.subscription)
            .field("attached", &self.attached)
            .finish()
    }
}

impl<T> CollectionView<T> {
    pub fn new(
        options: CollectionOptions<T>,
        config: PagerConfig,
        runner: impl TransitionRunner + 'static,
        scheduler: impl FrameScheduler + 'static,
        hub: &Rc<DocumentPointerHub>,
    ) -> Result<Self> {
        let engine = PagingEngine::new(config, runner, scheduler)?;
        let subscription = hub.subscribe();
        log::debug!("collection view {} attached", options.id);
        Ok(Self {
            options,
            engine,
            subscription: Some(subscription),
            attached: true,
        })
    }

    pub fn id(&self) -> &str {
        &self.options.id
    }

    pub fn engine(&self) -> &PagingEngine {
        &self.engine
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(DocumentSubscription::id)
    }

    /// Render and activate the view if `route` addresses this instance.
    /// Returns whether the route was handled.
    pub fn handle_route_in(
        &mut self,
        route: &RouteTarget,
        items: &[T],
        renderer: &mut impl ItemRenderer<T>,
    ) -> Result<bool> {
        if !self.options.handles(route) {
            return Ok(false);
        }
        self.render(
            items,
            renderer,
            route.item_id.as_ref(),
            route.transition.as_deref(),
        )?;
        Ok(true)
    }

    /// Pack `items` into pages, open on the page holding `target_item` and
    /// transition the view in.
    pub fn render(
        &mut self,
        items: &[T],
        renderer: &mut impl ItemRenderer<T>,
        target_item: Option<&ItemId>,
        transition: Option<&str>,
    ) -> Result<()> {
        if !self.attached {
            log::warn!("render on destroyed view {}", self.options.id);
            return Ok(());
        }

        self.engine.reset();
        let mut packer =
            PageLayoutPacker::new(self.engine.config().page_height);
        for (index, item) in items.iter().enumerate() {
            if !self.options.accepts(item) {
                continue;
            }
            let rendered = renderer
                .render_item(item)
                .map_err(|source| PagerError::Item { index, source })?;
            packer.pack(rendered);
        }

        let packed = packer.finish();
        if packed.is_empty() {
            log::debug!("collection view {} is empty", self.options.id);
            self.engine.show_empty_page();
        } else {
            self.engine.install(packed);
            let page = target_item
                .and_then(|id| self.engine.page_for_item(id))
                .or_else(|| self.engine.first_page());
            if let Some(page) = page {
                self.engine.set_current_page(page)?;
            }
            self.engine.position_overlay();
        }
        if let Some(hook) = self.options.after_render.as_mut() {
            hook(&mut self.engine);
        }

        let transition = self.transition_id(transition);
        self.engine.transition_view(TransitionKind::In, &transition);
        self.engine.pump();
        Ok(())
    }

    pub fn leave(&mut self, transition: Option<&str>) {
        let transition = self.transition_id(transition);
        self.engine.transition_view(TransitionKind::Out, &transition);
        self.engine.pump();
    }

    pub fn hide(&mut self) {
        self.engine.hide();
    }

    pub fn destroy(&mut self) {
        self.engine.halt();
        self.subscription = None;
        self.attached = false;
        log::debug!("collection view {} destroyed", self.options.id);
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        if !self.attached {
            return PointerOutcome::PassThrough;
        }
        self.engine.pointer_down(event)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> PointerOutcome {
        if !self.attached {
            return PointerOutcome::PassThrough;
        }
        self.engine.pointer_move(event)
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> PointerOutcome {
        if !self.attached {
            return PointerOutcome::PassThrough;
        }
        self.engine.pointer_up(event)
    }

    pub fn pointer_cancel(&mut self, event: &PointerEvent) -> PointerOutcome {
        self.pointer_up(event)
    }

    pub fn pointer_leave(&mut self, event: &PointerEvent) -> PointerOutcome {
        self.pointer_up(event)
    }

    /// Releases seen at document level, outside the view's own bounds.
    /// Only an active gesture is settled here.
    pub fn document_pointer(
        &mut self,
        kind: DocumentPointerKind,
        event: &PointerEvent,
    ) -> PointerOutcome {
        let subscribed = self
            .subscription
            .as_ref()
            .is_some_and(DocumentSubscription::is_active);
        if !self.attached
            || !subscribed
            || !self.engine.gesture().is_tracking()
        {
            return PointerOutcome::PassThrough;
        }
        log::debug!("document pointer {kind:?} settles the gesture");
        self.engine.pointer_up(event)
    }

    fn transition_id(&self, requested: Option<&str>) -> String {
        requested.map_or_else(
            || self.engine.config().default_transition.clone(),
            str::to_string,
        )
    }

    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        self.attached && self.engine.on_frame(handle)
    }

    pub fn pump(&mut self) -> usize {
        self.engine.pump()
    }
}

impl<T> Drop for CollectionView<T> {
    fn drop(&mut self) {
        self.engine.halt();
    }
}
