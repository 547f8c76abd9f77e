use company_core::db::open_db_in_memory;
use company_core::{
    create_tables, Employee, EmployeeRepository, RepoError, ReviewRepository,
    SqliteEmployeeRepository, SqliteReviewRepository,
};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE departments (id INTEGER PRIMARY KEY, name TEXT);
         INSERT INTO departments (id, name) VALUES (1, 'Engineering'), (2, 'Sales');",
    )
    .unwrap();
    create_tables(&conn).unwrap();
    conn
}

fn employee_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_assigns_first_rowid_and_roundtrips() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    let alice = repo.create("Alice", 1).unwrap();
    assert_eq!(alice.id, Some(1));

    let loaded = repo.find_by_id(1).unwrap().unwrap();
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.department_id, 1);
    assert_eq!(loaded, alice);
}

#[test]
fn save_inserts_then_updates_same_row() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut bob = Employee::new("Bob", 1);
    repo.save(&mut bob).unwrap();
    let id = bob.id.unwrap();

    bob.name = "Robert".to_string();
    repo.save(&mut bob).unwrap();

    assert_eq!(bob.id, Some(id));
    assert_eq!(employee_count(&conn), 1);
    assert_eq!(repo.find_by_id(id).unwrap().unwrap().name, "Robert");
}

#[test]
fn update_replaces_fields_and_persists() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut carol = repo.create("Carol", 1).unwrap();
    repo.update(&mut carol, "Carol Smith", 2).unwrap();

    let loaded = repo.find_by_id(carol.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.name, "Carol Smith");
    assert_eq!(loaded.department_id, 2);
}

#[test]
fn find_by_id_returns_none_for_missing_row() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    assert!(repo.find_by_id(42).unwrap().is_none());
    assert!(!repo.exists(42).unwrap());
}

#[test]
fn fetches_yield_distinct_values() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);
    let dave = repo.create("Dave", 1).unwrap();

    let mut first = repo.find_by_id(dave.id.unwrap()).unwrap().unwrap();
    let second = repo.find_by_id(dave.id.unwrap()).unwrap().unwrap();
    first.name = "changed in memory".to_string();

    assert_eq!(second.name, "Dave");
}

#[test]
fn delete_clears_id_and_removes_row() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut erin = repo.create("Erin", 1).unwrap();
    let frank = repo.create("Frank", 2).unwrap();
    let erin_id = erin.id.unwrap();

    repo.delete(&mut erin).unwrap();
    assert_eq!(erin.id, None);
    assert!(repo.find_by_id(erin_id).unwrap().is_none());

    let remaining = repo.get_all().unwrap();
    assert_eq!(remaining, vec![frank]);

    repo.delete(&mut erin).unwrap();
    assert_eq!(employee_count(&conn), 1);
}

#[test]
fn save_after_delete_inserts_a_new_row() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut gina = repo.create("Gina", 1).unwrap();
    repo.create("Hank", 1).unwrap();
    let old_id = gina.id.unwrap();

    repo.delete(&mut gina).unwrap();
    repo.save(&mut gina).unwrap();

    assert_ne!(gina.id, Some(old_id));
    assert_eq!(employee_count(&conn), 2);
}

#[test]
fn get_all_returns_every_row() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);
    assert!(repo.get_all().unwrap().is_empty());

    repo.create("Ivy", 1).unwrap();
    repo.create("Jack", 2).unwrap();
    repo.create("Kim", 1).unwrap();

    let mut names: Vec<String> = repo
        .get_all()
        .unwrap()
        .into_iter()
        .map(|employee| employee.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Ivy", "Jack", "Kim"]);
}

#[test]
fn unknown_department_is_rejected_by_storage() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    let err = repo.create("Lee", 99).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    assert_eq!(employee_count(&conn), 0);
}

#[test]
fn saving_stale_id_returns_not_found() {
    let conn = setup();
    let repo = SqliteEmployeeRepository::new(&conn);

    let mut ghost = Employee::with_id(77, "Ghost", 1);
    let err = repo.save(&mut ghost).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "employee",
            id: 77
        }
    ));
}

#[test]
fn deleting_reviewed_employee_fails_and_keeps_id() {
    let conn = setup();
    let employees = SqliteEmployeeRepository::new(&conn);
    let reviews = SqliteReviewRepository::new(&conn);

    let mut mia = employees.create("Mia", 1).unwrap();
    reviews.create(2023, "Strong delivery", mia.id.unwrap()).unwrap();

    let err = employees.delete(&mut mia).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    assert!(mia.id.is_some());
    assert_eq!(employee_count(&conn), 1);
}
