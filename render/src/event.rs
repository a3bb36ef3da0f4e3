//! Lifecycle events emitted around render and remount.

use std::{collections::HashMap, fmt, future::Future, rc::Rc};

use dioxus_logger::tracing;
use futures::future::{FutureExt, LocalBoxFuture};

use crate::data::Data;

/// Renderer lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererEvent {
    /// After data and props are resolved, before the render function is called.
    BeforeRender,

    /// After the render function returned.
    Render,

    /// After `remount` rendered the component again.
    Remount,
}

impl fmt::Display for RendererEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BeforeRender => "beforeRender",
            Self::Render => "render",
            Self::Remount => "remount",
        })
    }
}

/// Resolved values handed to event callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContext<P> {
    pub data: Data,
    pub props: P,
}

type EventCallback<P> = Rc<dyn Fn(EventContext<P>) -> LocalBoxFuture<'static, ()>>;

/// At most one callback per event; registering again replaces the callback.
pub(crate) struct Events<P> {
    callbacks: HashMap<RendererEvent, EventCallback<P>>,
}

impl<P> Default for Events<P> {
    fn default() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }
}

impl<P: Clone + 'static> Events<P> {
    pub(crate) fn set<F, Fut>(&mut self, event: RendererEvent, callback: F)
    where
        F: Fn(EventContext<P>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let callback: EventCallback<P> =
            Rc::new(move |context: EventContext<P>| callback(context).boxed_local());
        if self.callbacks.insert(event, callback).is_some() {
            tracing::debug!(event = %event, "Replaced renderer event callback");
        }
    }

    /// Runs the callback registered for `event`, if any, and waits for it.
    pub(crate) async fn trigger(&self, event: RendererEvent, data: &Data, props: &P) {
        let Some(callback) = self.callbacks.get(&event) else {
            return;
        };

        tracing::debug!(event = %event, "Emitting renderer event");
        callback(EventContext {
            data: data.clone(),
            props: props.clone(),
        })
        .await;
    }
}
