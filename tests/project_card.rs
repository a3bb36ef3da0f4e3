//! End-to-end tests rendering a component fed by the fixture database.

use std::{error::Error, rc::Rc};

use dioxus::prelude::*;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use testing_initializer::prelude::{
    create_database_with, create_renderer, ssr, BoundRenderer, Database, DatabaseDefinition,
    DataExt, IdGenerator, ModelDefinition, Record, RenderOptions, RenderOverrides, SsrHandle,
};

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct ToDo {
    #[serde(rename = "__pk")]
    pk: u64,
    name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Project {
    id: u64,
    name: String,
    date: String,
    user: User,
    #[serde(rename = "toDos")]
    to_dos: Vec<ToDo>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct ProjectProps {
    project: Project,
}

#[allow(non_snake_case)]
fn ProjectCard(props: ProjectProps) -> Element {
    let user_name = props.project.user.name;
    let project_name = props.project.name;
    let todo_names: Vec<String> = props.project.to_dos.into_iter().map(|todo| todo.name).collect();

    rsx! {
        div {
            p { "{user_name}" }
            p { "{project_name}" }
            div {
                for name in todo_names {
                    p { key: "{name}", "{name}" }
                }
            }
        }
    }
}

fn with_provider(children: Element) -> Element {
    rsx! {
        div {
            p { "Inside a custom render function wrapper" }
            {children}
        }
    }
}

fn project_database(ids: &IdGenerator) -> Database {
    let user_ids = ids.clone();
    let user_names = ids.clone();
    let todo_names = ids.clone();
    let project_ids = ids.clone();
    let project_names = ids.clone();

    create_database_with(
        DatabaseDefinition::new()
            .model(
                "user",
                ModelDefinition::new()
                    .field("id", move || user_ids.generate("user-pk"))
                    .field("name", move || format!("User {}", user_names.generate("user-name"))),
            )
            .model(
                "toDo",
                ModelDefinition::new()
                    .field("name", move || format!("Todo {}", todo_names.generate("toDo-name"))),
            )
            .model(
                "project",
                ModelDefinition::new()
                    .field("id", move || project_ids.generate("project-pk"))
                    .field("date", || chrono::Utc::now().to_rfc3339())
                    .field("name", move || {
                        format!("Project {}", project_names.generate("project-name"))
                    })
                    .one_of("user", "user")
                    .many_of("toDos", "toDo"),
            ),
        ids,
    )
    .unwrap()
}

/// Renderer whose data comes from the fixture database and whose props create a project
/// relating the current user and the to-dos.
fn project_renderer(db: &Rc<Database>) -> BoundRenderer<ProjectProps, SsrHandle> {
    let users = db.clone();
    let todos = db.clone();
    let projects = db.clone();

    create_renderer::<ProjectProps>()
        .try_add_data("currentUser", move |_| users.model("user")?.create_default())
        .try_add_data("toDos", move |_| {
            let collection = todos.model("toDo")?;
            (0..3)
                .map(|_| collection.create_default())
                .collect::<Result<Vec<Record>, _>>()
        })
        .try_set_props(move |data| {
            let user: Record = data.field("currentUser")?;
            let to_dos: Vec<Record> = data.field("toDos")?;
            let project = projects
                .model("project")?
                .create_as(json!({ "user": user, "toDos": to_dos }))?;

            Ok::<_, BoxError>(ProjectProps { project })
        })
        .set_component(ProjectCard)
        .set_render_function(ssr::render)
        .build()
        .unwrap()
}

/// Tests rendering relations resolved by the fixture database.
///
/// Verifies that the user, project and every to-do appear in the rendered HTML.
///
/// Expected: all names rendered
#[tokio::test]
async fn renders_relations_from_data() -> Result<(), BoxError> {
    let db = Rc::new(project_database(&IdGenerator::new()));
    let render_project = project_renderer(&db);

    let rendered = render_project.render_default().await?;
    let project = &rendered.props().project;
    let html = rendered.render_utils();

    assert!(html.contains_text(&project.user.name));
    assert!(html.contains_text(&project.name));
    assert_eq!(project.to_dos.len(), 3);
    for todo in &project.to_dos {
        assert!(html.contains_text(&todo.name));
    }
    assert_eq!(rendered.field::<User>("currentUser")?, project.user);

    Ok(())
}

/// Tests overriding a data field with a record created by the test.
///
/// Verifies that the override flows into the related project and the HTML.
///
/// Expected: "User override" rendered as the project owner
#[tokio::test]
async fn overrides_data_with_created_record() -> Result<(), BoxError> {
    let db = Rc::new(project_database(&IdGenerator::new()));
    let render_project = project_renderer(&db);
    let user = db
        .model("user")?
        .create(json!({ "name": "User override" }))?;

    let rendered = render_project
        .render(RenderOverrides::new().with_data("currentUser", user))
        .await?;

    assert_eq!(rendered.props().project.user.name, "User override");
    assert!(rendered.render_utils().contains_text("User override"));
    assert_eq!(db.model("user")?.count(), 1);

    Ok(())
}

/// Tests primary keys across invocations.
///
/// Verifies that records created by separate invocations get distinct, increasing keys.
///
/// Expected: second project key greater than the first
#[tokio::test]
async fn invocations_create_distinct_records() -> Result<(), BoxError> {
    let db = Rc::new(project_database(&IdGenerator::new()));
    let render_project = project_renderer(&db);

    let first = render_project.render_default().await?;
    let second = render_project.render_default().await?;

    assert_eq!(first.props().project.id, 1);
    assert_eq!(second.props().project.id, 2);
    assert!(second.props().project.to_dos[0].pk > first.props().project.to_dos[2].pk);
    assert_eq!(db.model("toDo")?.count(), 6);

    Ok(())
}

/// Tests a custom render function adding a wrapper around the component.
///
/// Expected: wrapper and component content rendered
#[tokio::test]
async fn renders_with_custom_render_function() -> Result<(), BoxError> {
    let db = Rc::new(project_database(&IdGenerator::new()));
    let users = db.clone();
    let projects = db.clone();

    let render_project = create_renderer::<ProjectProps>()
        .try_add_data("currentUser", move |_| users.model("user")?.create_default())
        .try_set_props(move |data| {
            let user: Record = data.field("currentUser")?;
            let project = projects.model("project")?.create_as(json!({ "user": user }))?;

            Ok::<_, BoxError>(ProjectProps { project })
        })
        .set_component(ProjectCard)
        .set_render_function(|ui, options: &RenderOptions| {
            ssr::render(
                ui,
                &RenderOptions {
                    wrapper: Some(with_provider),
                    ..options.clone()
                },
            )
        })
        .build()?;

    let rendered = render_project.render_default().await?;

    assert!(rendered
        .render_utils()
        .contains_text("Inside a custom render function wrapper"));
    assert!(rendered.render_utils().contains_text("User 1"));
    assert!(rendered.props().project.to_dos.is_empty());

    Ok(())
}
