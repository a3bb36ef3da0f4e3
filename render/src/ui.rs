//! Render engine contract: the component instantiation, render options and handle.

use std::rc::Rc;

use dioxus_core::Element;

use crate::data::Data;

/// Dioxus component under test.
pub type Component<P> = fn(P) -> Element;

/// Wrapper around the rendered component, typically providing context.
///
/// Receives the rendered component and returns the tree to render in its place.
pub type Wrapper = fn(Element) -> Element;

/// Component instantiated with its resolved props.
pub struct Ui<P> {
    pub component: Component<P>,
    pub props: P,
}

impl<P: Clone> Clone for Ui<P> {
    fn clone(&self) -> Self {
        Self {
            component: self.component,
            props: self.props.clone(),
        }
    }
}

/// Options passed to the render function alongside the component.
#[derive(Clone, Default)]
pub struct RenderOptions {
    /// Resolved data of the invocation.
    pub data: Data,

    /// Wrapper set with `Renderer::set_wrapper`.
    pub wrapper: Option<Wrapper>,
}

/// Handle returned by a render function.
pub trait RenderHandle {
    /// Tears the rendered tree down.
    fn unmount(&mut self);
}

pub(crate) type RenderFunction<P, H> = Rc<dyn Fn(Ui<P>, &RenderOptions) -> H>;
