use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use dioxus::prelude::*;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    create_renderer, ssr, ConfigError, Data, DataExt, EventContext, RenderHandle,
    RenderOptions, RenderOverrides, Renderer, RendererError, RendererEvent, Ui,
};

mod render_ssr;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Login {
    email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct LoginProps {
    login: Login,
}

#[allow(non_snake_case)]
fn LoginCard(props: LoginProps) -> Element {
    let email = props.login.email;

    rsx! {
        div {
            p { "{email}" }
        }
    }
}

/// Shared log of render calls, unmounts and events, in order.
#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// Render handle recording unmounts in the journal.
struct ProbeHandle {
    render: usize,
    mounted: bool,
    journal: Journal,
}

impl RenderHandle for ProbeHandle {
    fn unmount(&mut self) {
        self.mounted = false;
        self.journal.push(format!("unmount {}", self.render));
    }
}

/// Render function producing numbered `ProbeHandle`s and journaling each call.
fn probe_render(journal: &Journal) -> impl Fn(Ui<LoginProps>, &RenderOptions) -> ProbeHandle {
    let journal = journal.clone();
    let renders = Rc::new(Cell::new(0));

    move |ui: Ui<LoginProps>, _options: &RenderOptions| {
        renders.set(renders.get() + 1);
        journal.push(format!("render {}", ui.props.login.email));

        ProbeHandle {
            render: renders.get(),
            mounted: true,
            journal: journal.clone(),
        }
    }
}

/// Login renderer with a call-count probe on the `login` generator.
fn login_renderer(login_calls: &Rc<Cell<usize>>) -> Renderer<LoginProps> {
    let login_calls = login_calls.clone();

    create_renderer::<LoginProps>()
        .add_data("login", move |_| {
            login_calls.set(login_calls.get() + 1);
            json!({ "email": "test@test.com" })
        })
        .try_set_props(|data| {
            Ok::<_, RendererError>(LoginProps {
                login: data.field("login")?,
            })
        })
        .set_component(LoginCard)
}

fn object(value: Value) -> Data {
    match value {
        Value::Object(map) => map,
        _ => Data::new(),
    }
}
