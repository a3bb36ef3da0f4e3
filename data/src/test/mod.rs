use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::{
    create_database_with, error::DataError, DatabaseDefinition, IdGenerator, ModelDefinition,
};

mod query;

/// Database with `user`, `toDo` and `project` models, where only `user` declares an `id`.
fn project_database(ids: &IdGenerator) -> crate::Database {
    let names = ids.clone();
    let todo_names = ids.clone();

    create_database_with(
        DatabaseDefinition::new()
            .model(
                "user",
                ModelDefinition::new()
                    .field("id", {
                        let ids = ids.clone();
                        move || ids.generate("user-id")
                    })
                    .field("name", move || format!("User {}", names.generate("user-name"))),
            )
            .model(
                "toDo",
                ModelDefinition::new()
                    .field("name", move || format!("Todo {}", todo_names.generate("toDo-name"))),
            )
            .model(
                "project",
                ModelDefinition::new()
                    .field("name", || "Project")
                    .field("date", || chrono::Utc::now().to_rfc3339())
                    .one_of("user", "user")
                    .many_of("toDos", "toDo"),
            ),
        ids,
    )
    .unwrap()
}
