//! End-to-end dialect composition over a realistic fragment tree
//!
//! Builds a three-level hierarchy (shared root, dialect family, leaf
//! dialect) with JavaCC-flavored fragment files and checks that the
//! composed declaration set layers overrides in root-to-leaf order.

use graft::composing::{compose, DialectComposer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CORE_FRAGMENT: &str = r#"// Core parser entry points shared by every dialect.

SqlNode SqlSelect() :
{
    final List<SqlNode> items = new ArrayList<SqlNode>();
}
{
    <SELECT> SelectItem(items) ( <COMMA> SelectItem(items) )*
    { return new SqlSelect(items); }
}

SqlNode SqlInsert() :
{
}
{
    <INSERT> { return insert(); }
}

<DEFAULT> TOKEN :
{
    < SELECT: "SELECT" >
  | < INSERT: "INSERT" >
}
"#;

const FAMILY_FRAGMENT: &str = r#"// ANSI family tightens the insert syntax.

SqlNode SqlInsert() :
{
    SqlNode target;
}
{
    <INSERT> <INTO> { return insertInto(target); }
}

<DEFAULT> TOKEN :
{
    < INTO: "INTO" >
}
"#;

const LEAF_FRAGMENT: &str = r#"// MySQL allows REPLACE as a statement of its own.

SqlNode SqlReplace() :
{
}
{
    <REPLACE> { return replace(); }
}

SqlNode SqlSelect() :
{
    final List<SqlNode> items = new ArrayList<SqlNode>();
    boolean straightJoin = false; // "}" in a comment must not end the block
}
{
    <SELECT> [ <STRAIGHT_JOIN> { straightJoin = true; } ]
    SelectItem(items)
    { return new SqlSelect(items, straightJoin); }
}
"#;

fn build_tree(root: &Path) {
    let family = root.join("ansi");
    let leaf = family.join("mysql");
    fs::create_dir_all(&leaf).unwrap();

    fs::write(root.join("core.jj"), CORE_FRAGMENT).unwrap();
    fs::write(family.join("inserts.jj"), FAMILY_FRAGMENT).unwrap();
    fs::write(leaf.join("overrides.jj"), LEAF_FRAGMENT).unwrap();
}

#[test]
fn composes_three_levels_in_override_order() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());

    let composition = compose(tmp.path(), &tmp.path().join("ansi/mysql")).unwrap();
    assert!(composition.failures.is_empty());

    let functions = &composition.declarations.functions;
    // First-seen order is preserved even for overridden names
    let names: Vec<&String> = functions.keys().collect();
    assert_eq!(names, vec!["SqlSelect", "SqlInsert", "SqlReplace"]);

    // Leaf override wins for SqlSelect, family override for SqlInsert
    assert!(functions.get("SqlSelect").unwrap().contains("STRAIGHT_JOIN"));
    assert!(functions.get("SqlInsert").unwrap().contains("<INTO>"));

    // Token assignments accumulate shallow-to-deep, never deduplicated
    let assignments = &composition.declarations.token_assignments;
    assert_eq!(assignments.len(), 2);
    assert!(assignments[0].contains("\"SELECT\""));
    assert!(assignments[1].contains("\"INTO\""));
}

#[test]
fn composing_the_family_skips_the_leaf() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());

    let composition = compose(tmp.path(), &tmp.path().join("ansi")).unwrap();
    let functions = &composition.declarations.functions;

    assert!(!functions.contains_key("SqlReplace"));
    assert!(functions.get("SqlSelect").unwrap().contains("<COMMA>"));
    assert!(functions.get("SqlInsert").unwrap().contains("<INTO>"));
}

#[test]
fn declaration_text_is_verbatim() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());

    let composition = compose(tmp.path(), tmp.path()).unwrap();
    let select = composition.declarations.functions.get("SqlSelect").unwrap();

    // Leading comment, head, and both blocks are copied exactly
    assert!(select.starts_with("// Core parser entry points"));
    assert!(select.contains("SqlNode SqlSelect() :\n"));
    assert!(select.ends_with("{ return new SqlSelect(items); }\n}"));
}

#[test]
fn composition_serializes_to_json() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path());

    let composition = compose(tmp.path(), &tmp.path().join("ansi/mysql")).unwrap();
    let json = serde_json::to_value(&composition.declarations).unwrap();

    let functions = json.get("functions").unwrap().as_object().unwrap();
    assert!(functions.contains_key("SqlReplace"));
    assert_eq!(
        json.get("token_assignments").unwrap().as_array().unwrap().len(),
        2
    );
}

#[test]
fn custom_extension_selects_different_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("core.grammar"), CORE_FRAGMENT).unwrap();
    fs::write(tmp.path().join("ignored.jj"), LEAF_FRAGMENT).unwrap();

    let composer = DialectComposer::with_extension("grammar");
    let composition = composer.compose(tmp.path(), tmp.path()).unwrap();

    assert!(composition.declarations.functions.contains_key("SqlSelect"));
    assert!(!composition.declarations.functions.contains_key("SqlReplace"));
}
