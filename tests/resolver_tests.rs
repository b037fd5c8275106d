mod common;

use changetree::changelog::IncludeKind;
use changetree::changelog::resolver::Resolver;
use changetree::changelog::source::LoadError;
use common::ChangelogFixture;

#[test]
fn test_resolves_nested_tree_in_document_order() {
    let fixture = ChangelogFixture::new();
    let root = fixture.write_changelog("update.xml", &["master.xml", "README.txt"]);
    fixture.write_changelog("master.xml", &["v1.sql", "v2.sql"]);
    fixture.write_file("v1.sql", "foo\n--changeset alice:1 add table\nbar\n");
    fixture.write_file(
        "v2.sql",
        "--changeset bob:2 add index\n--changeset carol:3 drop view\n",
    );

    let log = Resolver::new().resolve(&root).unwrap();

    assert_eq!(log.path, root);
    assert_eq!(log.includes.len(), 2);

    let sub = &log.includes[0];
    assert_eq!(sub.kind, IncludeKind::Changelog);
    assert_eq!(sub.path, fixture.path().join("master.xml"));
    assert!(sub.changesets.is_empty());

    let nested = sub.nested.as_ref().unwrap();
    assert_eq!(nested.includes.len(), 2);
    assert_eq!(nested.includes[0].kind, IncludeKind::Script);
    assert_eq!(nested.includes[0].changesets.len(), 1);
    assert_eq!(nested.includes[0].changesets[0].id, "1");
    assert_eq!(nested.includes[0].changesets[0].author, "alice");
    assert_eq!(nested.includes[0].changesets[0].options, "add table");
    assert_eq!(nested.includes[1].changesets.len(), 2);
    assert_eq!(nested.includes[1].changesets[0].id, "2");
    assert_eq!(nested.includes[1].changesets[1].id, "3");

    let leaf = &log.includes[1];
    assert_eq!(leaf.kind, IncludeKind::Unresolved);
    assert!(leaf.nested.is_none());
    assert!(leaf.changesets.is_empty());
}

#[test]
fn test_includes_resolve_relative_to_declaring_changelog() {
    let fixture = ChangelogFixture::new();
    let root = fixture.write_changelog("update.xml", &["releases/v2-master.xml", "base.sql"]);
    fixture.write_changelog("releases/v2-master.xml", &["v2.sql"]);
    fixture.write_file("base.sql", "--changeset alice:1 baseline\n");
    fixture.write_file("releases/v2.sql", "--changeset bob:2 add index\n");

    let log = Resolver::new().resolve(&root).unwrap();

    // Siblings share the root changelog's directory.
    assert_eq!(log.includes[1].path, fixture.path().join("base.sql"));

    // The nested changelog's script resolves against its own directory,
    // not the root's.
    let nested = log.includes[0].nested.as_ref().unwrap();
    assert_eq!(
        nested.includes[0].path,
        fixture.path().join("releases/v2.sql")
    );
    assert_eq!(nested.includes[0].changesets[0].id, "2");
}

#[test]
fn test_resolve_is_idempotent() {
    let fixture = ChangelogFixture::new();
    let root = fixture.write_changelog("update.xml", &["master.xml"]);
    fixture.write_changelog("master.xml", &["v1.sql"]);
    fixture.write_file("v1.sql", "--changeset alice:1 add table\n");

    let resolver = Resolver::new();
    let first = resolver.resolve(&root).unwrap();
    let second = resolver.resolve(&root).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_script_fails_resolution() {
    let fixture = ChangelogFixture::new();
    let root = fixture.write_changelog("update.xml", &["gone.sql"]);

    let err = Resolver::new().resolve(&root).unwrap_err();
    match err {
        LoadError::Read { path, .. } => assert_eq!(path, fixture.path().join("gone.sql")),
        other => panic!("expected Read error, got {other}"),
    }
}

#[test]
fn test_missing_nested_changelog_fails_resolution() {
    let fixture = ChangelogFixture::new();
    let root = fixture.write_changelog("update.xml", &["sub/master.xml"]);

    let err = Resolver::new().resolve(&root).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
}

#[test]
fn test_malformed_changelog_fails_resolution() {
    let fixture = ChangelogFixture::new();
    let root = fixture.write_file("update.xml", "<databaseChangeLog><include file=");

    let err = Resolver::new().resolve(&root).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn test_script_includes_are_flattened_in_document_order() {
    let fixture = ChangelogFixture::new();
    let root = fixture.write_changelog("update.xml", &["a.sql", "master.xml", "z.sql"]);
    fixture.write_changelog("master.xml", &["m.sql"]);
    fixture.write_file("a.sql", "--changeset alice:1 first\n");
    fixture.write_file("m.sql", "--changeset bob:2 nested\n");
    fixture.write_file("z.sql", "--changeset carol:3 last\n");

    let log = Resolver::new().resolve(&root).unwrap();
    let files: Vec<_> = log
        .script_includes()
        .iter()
        .map(|include| include.file.clone())
        .collect();

    assert_eq!(files, ["a.sql", "m.sql", "z.sql"]);
}
