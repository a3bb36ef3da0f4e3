//! Server-side render function for Dioxus components.
//!
//! `render` can be passed straight to `Renderer::set_render_function`. The component is
//! mounted in a fresh `VirtualDom`, wrapped by `RenderOptions::wrapper` when set, and
//! rendered to HTML with `dioxus-ssr`.

use dioxus_core::{Element, VirtualDom};
use dioxus_logger::tracing;

use crate::ui::{RenderHandle, RenderOptions, Ui};

/// Handle to a component rendered to HTML.
pub struct SsrHandle {
    dom: Option<VirtualDom>,
    html: String,
}

impl SsrHandle {
    /// Rendered HTML, empty once unmounted.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the rendered HTML contains `text`.
    pub fn contains_text(&self, text: &str) -> bool {
        self.is_mounted() && self.html.contains(text)
    }

    pub fn is_mounted(&self) -> bool {
        self.dom.is_some()
    }
}

impl RenderHandle for SsrHandle {
    fn unmount(&mut self) {
        if self.dom.take().is_some() {
            tracing::debug!("Unmounted server-side rendered component");
        }
        self.html.clear();
    }
}

/// Renders the component to HTML.
///
/// # Arguments
/// - `ui` - Component and its resolved props
/// - `options` - Render options, of which only the wrapper is used
///
/// # Returns
/// - `SsrHandle` - Mounted handle exposing the rendered HTML
pub fn render<P: Clone + 'static>(ui: Ui<P>, options: &RenderOptions) -> SsrHandle {
    let Ui { component, props } = ui;
    let wrapper = options.wrapper;

    let root = move |props: P| -> Element {
        let rendered = component(props);
        match wrapper {
            Some(wrap) => wrap(rendered),
            None => rendered,
        }
    };

    let mut dom = VirtualDom::new_with_props(root, props);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    tracing::debug!(bytes = html.len(), "Rendered component to HTML");

    SsrHandle {
        dom: Some(dom),
        html,
    }
}
