//! Integration tests for schema comparison.
//!
//! These tests drive the comparator through the facade crate and check the
//! properties every comparison result must hold.

use pretty_assertions::assert_eq;
use schemashift::migrate::{Change, ChangeKind, DiffOptions, DiffResult, SchemaDiffer};
use schemashift::schema::{Column, ColumnType, Schema, Table, TableFilter};

fn id() -> Column {
    Column::new("id", ColumnType::Int64).primary_key().auto_increment()
}

fn name_unique() -> Column {
    Column::new("name", ColumnType::Varchar).with_size(64).unique()
}

fn schema(tables: Vec<Table>) -> Schema {
    let mut schema = Schema::new("shop").with_author("dba");
    for table in tables {
        schema.add_table(table);
    }
    schema
}

fn diff(from: &Schema, to: &Schema, options: DiffOptions) -> DiffResult {
    SchemaDiffer::new(options)
        .diff(from, to)
        .expect("comparison failed")
}

fn ids_and_kinds(result: &DiffResult) -> Vec<(&str, ChangeKind)> {
    result
        .change_sets
        .iter()
        .flat_map(|cs| cs.changes.iter().map(move |c| (cs.id.as_str(), c.kind())))
        .collect()
}

/// Check the invariants every result must satisfy.
fn assert_well_formed(result: &DiffResult) {
    let mut expected_major = 0u32;
    let mut last_major = 0u32;

    for change_set in &result.change_sets {
        assert!(!change_set.changes.is_empty(), "empty changeset {}", change_set.id);

        let major: u32 = change_set.major().parse().expect("numeric major");
        if major != last_major {
            expected_major += 1;
            assert_eq!(major, expected_major, "majors must be contiguous");
            last_major = major;
        }

        for change in &change_set.changes {
            if let Change::RenameTable { old_table, table } = change {
                assert!(result.to.get_table(&old_table.name).is_none());
                assert!(result.from.get_table(&table.name).is_none());
                assert!(old_table.same_columns(table));
            }
            if let Change::RenameColumn {
                table, old_column, ..
            } = change
            {
                let target = result.to.get_table(&table.name).expect("target table");
                assert!(target.get_column(&old_column.name).is_none());
            }
        }
    }
}

fn catalog() -> Vec<Schema> {
    let user = Table::new("user")
        .with_group("auth")
        .with_column(id())
        .with_column(name_unique())
        .with_column(Column::new("bio", ColumnType::Text).with_description("about"));
    let order = Table::new("order")
        .with_group("billing")
        .with_column(id())
        .with_column(Column::new("total", ColumnType::Decimal).with_size(10).with_scale(2));
    let audit = Table::new("audit").with_column(Column::new("msg", ColumnType::Text));

    let mut member = user.clone();
    member.name = "member".to_string();

    let mut retyped = order.clone();
    retyped.columns[1].scale = 4;

    let mut renamed_column = user.clone();
    renamed_column.columns[2].name = "about".to_string();

    vec![
        schema(vec![]),
        schema(vec![user.clone(), order.clone()]),
        schema(vec![member, order.clone(), audit.clone()]),
        schema(vec![renamed_column, retyped, audit]),
        schema(vec![order, user]),
    ]
}

#[test]
fn test_identical_schemas_are_idempotent() {
    for s in catalog() {
        let result = diff(&s, &s, DiffOptions::new().compare_comments(true));
        let names: Vec<_> = s.table_names().collect();
        assert!(result.is_empty(), "self-diff of {names:?} not empty");
    }
}

#[test]
fn test_every_result_is_well_formed() {
    let schemas = catalog();
    for from in &schemas {
        for to in &schemas {
            for compare_comments in [false, true] {
                let result = diff(from, to, DiffOptions::new().compare_comments(compare_comments));
                assert_well_formed(&result);
            }
        }
    }
}

#[test]
fn test_comparison_is_deterministic() {
    let schemas = catalog();
    let first = diff(&schemas[1], &schemas[3], DiffOptions::new());
    let second = diff(&schemas[1], &schemas[3], DiffOptions::new());
    assert_eq!(first, second);
}

/// A renamed table keeps its unique constraint under the new name.
#[test]
fn test_table_rename_with_unique_keys() {
    let from = schema(vec![Table::new("user").with_column(id()).with_column(name_unique())]);
    let to = schema(vec![Table::new("member").with_column(id()).with_column(name_unique())]);

    let result = diff(&from, &to, DiffOptions::new());
    assert_eq!(
        ids_and_kinds(&result),
        vec![
            ("1-1", ChangeKind::DropUniqueConstraint),
            ("1-2", ChangeKind::RenameTable),
            ("1-3", ChangeKind::CreateUniqueConstraint),
        ]
    );

    let changes: Vec<_> = result.changes().collect();
    assert!(matches!(changes[0], Change::DropUniqueConstraint { name, .. } if name == "user_uq"));
    assert!(matches!(changes[2], Change::CreateUniqueConstraint { name, .. } if name == "member_uq"));
}

/// Rename detection needs structurally equal columns; a table that was
/// renamed and gained a column at once is dropped and recreated.
#[test]
fn test_renamed_table_with_new_column_is_recreated() {
    let from = schema(vec![Table::new("user").with_column(id()).with_column(name_unique())]);
    let to = schema(vec![
        Table::new("member")
            .with_column(id())
            .with_column(name_unique())
            .with_column(Column::new("email", ColumnType::Varchar).with_size(128).unique()),
    ]);

    let result = diff(&from, &to, DiffOptions::new());
    assert_eq!(
        ids_and_kinds(&result),
        vec![("1", ChangeKind::DropTable), ("2", ChangeKind::CreateTable)]
    );
}

#[test]
fn test_self_referencing_table_rename() {
    let from = schema(vec![
        Table::new("category").with_column(id()).with_column(
            Column::new("parent_id", ColumnType::Int64)
                .with_reference(schemashift::schema::Reference::new("category", "id")),
        ),
    ]);
    let to = schema(vec![
        Table::new("tag").with_column(id()).with_column(
            Column::new("parent_id", ColumnType::Int64)
                .with_reference(schemashift::schema::Reference::new("tag", "id")),
        ),
    ]);

    let result = diff(&from, &to, DiffOptions::new());
    assert_eq!(ids_and_kinds(&result), vec![("1-1", ChangeKind::RenameTable)]);
}

#[test]
fn test_column_rename() {
    let login = Column::new("login_name", ColumnType::Varchar).with_size(40).not_null();
    let mut name = login.clone();
    name.name = "name".to_string();

    let from = schema(vec![Table::new("user").with_column(id()).with_column(login)]);
    let to = schema(vec![Table::new("user").with_column(id()).with_column(name)]);

    let result = diff(&from, &to, DiffOptions::new());
    assert_eq!(ids_and_kinds(&result), vec![("1-1", ChangeKind::RenameColumn)]);
    assert_eq!(result.count_of(ChangeKind::DropColumn), 0);
    assert_eq!(result.count_of(ChangeKind::AddColumn), 0);

    match result.changes().next() {
        Some(Change::RenameColumn {
            old_column, column, ..
        }) => {
            assert_eq!(old_column.name, "login_name");
            assert_eq!(column.name, "name");
        }
        other => panic!("Expected RenameColumn, got {other:?}"),
    }
}

#[test]
fn test_independent_column_changes() {
    let from = schema(vec![
        Table::new("user")
            .with_column(Column::new("age", ColumnType::Int32))
            .with_column(Column::new("bio", ColumnType::Text).with_description("about")),
    ]);
    let to = schema(vec![
        Table::new("user")
            .with_column(Column::new("age", ColumnType::Int64))
            .with_column(Column::new("bio", ColumnType::Text).with_description("profile text")),
    ]);

    let result = diff(&from, &to, DiffOptions::new().compare_comments(true));
    assert_eq!(
        ids_and_kinds(&result),
        vec![
            ("1-1", ChangeKind::ChangeColumnType),
            ("1-2", ChangeKind::SetColumnComment),
        ]
    );
}

#[test]
fn test_comment_only_change_ignored_without_comments() {
    let from = schema(vec![
        Table::new("user").with_column(Column::new("bio", ColumnType::Text).with_description("about")),
    ]);
    let to = schema(vec![
        Table::new("user").with_column(Column::new("bio", ColumnType::Text).with_description("profile")),
    ]);

    let result = diff(&from, &to, DiffOptions::new().compare_comments(false));
    assert!(result.is_empty());
}

#[test]
fn test_groups_filter_through_facade() {
    let schemas = catalog();
    let options = DiffOptions::new().table_filter(TableFilter::groups("billing"));
    let result = diff(&schemas[1], &schemas[3], options);

    // `audit` has no group, so the filter skips it like `user`.
    assert_eq!(ids_and_kinds(&result), vec![("1-1", ChangeKind::ChangeColumnType)]);
}

#[test]
fn test_custom_filter() {
    let schemas = catalog();
    let options = DiffOptions::new().table_filter(TableFilter::from_fn(|t| t.name.starts_with('a')));
    let result = diff(&schemas[1], &schemas[3], options);

    assert_eq!(ids_and_kinds(&result), vec![("1", ChangeKind::CreateTable)]);
    assert_eq!(result.changes().next().map(Change::table_name), Some("audit"));
}
