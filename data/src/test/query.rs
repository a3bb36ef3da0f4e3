use super::*;
use pretty_assertions::assert_eq;

/// Tests finding records by primary key.
///
/// Expected: Some for created keys, None otherwise
#[test]
fn finds_by_primary_key() {
    let db = project_database(&IdGenerator::new());
    let users = db.model("user").unwrap();
    let user = users.create(json!({ "name": "Findable" })).unwrap();

    assert_eq!(users.find(&json!(1)), Some(user));
    assert_eq!(users.find(&json!(2)), None);
}

/// Tests listing and counting records.
///
/// Verifies that records are listed in creation order and collections are separate.
///
/// Expected: two users listed in order, no projects
#[test]
fn lists_records_in_creation_order() {
    let db = project_database(&IdGenerator::new());
    let users = db.model("user").unwrap();
    let first = users.create_default().unwrap();
    let second = users.create_default().unwrap();

    assert_eq!(users.all(), vec![first, second]);
    assert_eq!(users.count(), 2);
    assert_eq!(db.model("project").unwrap().count(), 0);
}
