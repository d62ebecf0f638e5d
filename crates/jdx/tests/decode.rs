//! Integration tests for decoding data files into a model.

use jdx::{Analytics, ClassKey, GraphModel, ModelBuilder, PackageId};
use rstest::rstest;

#[test]
fn classes_attach_to_the_most_recent_package() {
    let model = GraphModel::parse("P com.acme\nP com.acme.util\nS Foo\nS Bar\n").unwrap();

    assert_eq!(model.packages(), ["com.acme", "com.acme.util"]);
    assert!(model.classes(PackageId(0)).unwrap().is_empty());
    assert_eq!(model.classes(PackageId(1)).unwrap(), ["Foo", "Bar"]);
    assert_eq!(model.package_label(PackageId(0)).unwrap(), "com.acme (0)");
}

#[test]
fn edge_from_an_empty_package_is_rejected() {
    // Package 0 declares no classes, so 0.0 does not exist.
    let err = GraphModel::parse("P com.acme\nP com.acme.util\nS Foo\nS Bar\nD 0.0>1.0\nC 0}1}\n")
        .unwrap_err();

    assert!(err.is_format_error());
    assert!(err.to_string().starts_with("line 5:"), "{err}");
}

#[test]
fn two_package_example() {
    let model = GraphModel::parse("P a\nS X\nP b\nS Y\nD 0.0>1.0\nC 0}1}\n").unwrap();
    let analytics = Analytics::compute(&model);

    assert_eq!(analytics.roots(), [PackageId(1)]);
    assert_eq!(model.cycles()[0].packages(), [PackageId(0), PackageId(1)]);
    assert_eq!(analytics.next_hops(PackageId(0)), vec![PackageId(1)]);
    assert_eq!(analytics.next_hops(PackageId(1)), vec![PackageId(0)]);
    assert_eq!(model.imports(ClassKey::new(0, 0)).unwrap(), [ClassKey::new(1, 0)]);
}

#[rstest]
#[case::unknown_tag("Pa\nXbogus\n", 2)]
#[case::class_before_package(";title\nSOrphan\n", 2)]
#[case::missing_arrow("Pa\nSX\nD0.0 0.0\n", 3)]
#[case::missing_dot("Pa\nSX\nD0>0.0\n", 3)]
#[case::non_numeric_edge("Pa\nSX\nD0.x>0.0\n", 3)]
#[case::non_numeric_cycle("Pa\nC0}a}\n", 2)]
#[case::empty_cycle("Pa\nC}\n", 2)]
#[case::cycle_to_undeclared_package("Pa\nC0}1}\n", 2)]
#[case::edge_to_undeclared_class("Pa\nSX\nD0.0>0.1\n", 3)]
fn malformed_input_fails_at_its_line(#[case] text: &str, #[case] line: usize) {
    let err = GraphModel::parse(text).unwrap_err();

    assert!(err.is_format_error(), "{err}");
    assert!(err.to_string().starts_with(&format!("line {line}:")), "{err}");
}

#[test]
fn blank_lines_and_trailing_newlines_are_skipped() {
    let model = GraphModel::parse("Pa\n\n   \nSX\n\n").unwrap();
    assert_eq!(model.class_count(), 1);
}

#[test]
fn edges_may_point_backwards_and_within_a_package() {
    let model = GraphModel::parse("Pa\nSX\nSY\nPb\nSZ\nD1.0>0.1\nD0.0>0.1\n").unwrap();
    let analytics = Analytics::compute(&model);

    assert!(analytics.roots().is_empty());
    assert_eq!(
        analytics.package_dependencies(PackageId(0)),
        vec![PackageId(0)]
    );
}

#[test]
fn repeated_package_in_a_cycle() {
    let model = GraphModel::parse("Pa\nPb\nPc\nC0}1}0}2}\n").unwrap();
    let analytics = Analytics::compute(&model);

    assert_eq!(
        analytics.next_hops(PackageId(0)),
        vec![PackageId(1), PackageId(2)]
    );
    assert_eq!(
        analytics.membership().next_hops_via(PackageId(0), 0),
        [PackageId(1), PackageId(2)]
    );
    assert_eq!(analytics.package_cycles(PackageId(0)), vec![0]);
}

#[tokio::test]
async fn non_utf8_class_name_is_a_format_error() {
    let input: &[u8] = b"Pa\nSX\nSCaf\xe9\n";
    let err = GraphModel::read(ModelBuilder::new(), input)
        .await
        .unwrap_err();

    assert!(err.is_format_error(), "{err}");
    assert!(err.to_string().starts_with("line 3:"), "{err}");
}

#[tokio::test]
async fn reading_from_a_file_matches_parsing_text() {
    let text = ";T\n;D\n;proj.data\nPa\nSX\nPb\nSY\nD0.0>1.0\nC0}1}\n";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("proj.data");
    tokio::fs::write(&path, text).await.unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let read = GraphModel::read(ModelBuilder::new(), file).await.unwrap();
    let parsed = GraphModel::parse(text).unwrap();

    assert_eq!(read.packages(), parsed.packages());
    assert_eq!(read.dependencies(), parsed.dependencies());
    assert_eq!(read.cycles(), parsed.cycles());
    assert_eq!(read.metadata(), parsed.metadata());
    assert_eq!(read.metadata().basename, "proj");
}
