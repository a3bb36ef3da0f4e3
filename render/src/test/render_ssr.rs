use tracing_test::traced_test;

use super::*;

fn with_banner(children: Element) -> Element {
    rsx! {
        section {
            p { "Inside the wrapper" }
            {children}
        }
    }
}

/// Tests server-side rendering of the component.
///
/// Verifies that the resolved props reach the rendered HTML.
///
/// Expected: HTML contains the login email
#[tokio::test]
async fn renders_component_html() -> Result<(), RendererError> {
    let renderer = login_renderer(&Rc::new(Cell::new(0)))
        .set_render_function(ssr::render)
        .build()?;

    let rendered = renderer.render_default().await?;

    assert!(rendered.render_utils().is_mounted());
    assert!(rendered.render_utils().contains_text("test@test.com"));

    Ok(())
}

/// Tests that overrides reach the rendered HTML.
///
/// Expected: HTML contains the overridden email only
#[tokio::test]
async fn renders_overridden_data() -> Result<(), RendererError> {
    let renderer = login_renderer(&Rc::new(Cell::new(0)))
        .set_render_function(ssr::render)
        .build()?;

    let rendered = renderer
        .render(RenderOverrides::new().with_data("login", json!({ "email": "x@y.com" })))
        .await?;

    assert!(rendered.render_utils().contains_text("x@y.com"));
    assert!(!rendered.render_utils().contains_text("test@test.com"));

    Ok(())
}

/// Tests rendering inside a wrapper.
///
/// Expected: HTML contains both the wrapper and the component content
#[tokio::test]
async fn renders_inside_wrapper() -> Result<(), RendererError> {
    let renderer = login_renderer(&Rc::new(Cell::new(0)))
        .set_wrapper(with_banner)
        .set_render_function(ssr::render)
        .build()?;

    let rendered = renderer.render_default().await?;
    let html = rendered.render_utils().html();

    assert!(html.contains("Inside the wrapper"));
    assert!(html.contains("test@test.com"));
    assert!(html.find("Inside the wrapper") < html.find("test@test.com"));

    Ok(())
}

/// Tests unmounting and remounting a server-side render.
///
/// Expected: unmounted handle is empty, remounted handle renders again
#[tokio::test]
#[traced_test]
async fn remounts_server_side_render() -> Result<(), RendererError> {
    let renderer = login_renderer(&Rc::new(Cell::new(0)))
        .set_render_function(ssr::render)
        .build()?;
    let mut rendered = renderer.render_default().await?;

    rendered.render_utils_mut().unmount();
    assert!(!rendered.render_utils().is_mounted());
    assert!(rendered.render_utils().html().is_empty());

    let handle = rendered.remount().await;

    assert!(handle.contains_text("test@test.com"));
    assert!(logs_contain("Rendered component to HTML"));

    Ok(())
}

/// Tests rendering a component without props.
///
/// Verifies that unit props need no props definition.
///
/// Expected: static markup rendered
#[tokio::test]
async fn renders_component_without_props() -> Result<(), RendererError> {
    fn greeting(_: ()) -> Element {
        rsx! { p { "hey" } }
    }

    let renderer = create_renderer::<()>()
        .set_component(greeting)
        .set_render_function(ssr::render)
        .build()?;

    let rendered = renderer
        .render(RenderOverrides::new().with_prop("ignored", true))
        .await?;

    assert!(rendered.render_utils().contains_text("hey"));

    Ok(())
}
