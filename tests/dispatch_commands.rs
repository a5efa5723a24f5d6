use common::command::{TreePair, empty_trees, sample_trees};
use litediff::{Comparison, DiffMode, DiffResult, DispatchError, ErrorKind, dispatch};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

mod common;

#[rstest]
fn directories_are_reconciled(sample_trees: TreePair) -> Result<(), Box<dyn std::error::Error>> {
    let results = dispatch(
        &sample_trees.left(),
        &sample_trees.right(),
        DiffMode::Unified,
        true,
    )?;

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].file(), "a.txt");

    Ok(())
}

#[rstest]
fn files_are_compared_directly(sample_trees: TreePair) -> Result<(), Box<dyn std::error::Error>> {
    let left = sample_trees.left().join("a.txt");
    let right = sample_trees.right().join("a.txt");

    let results = dispatch(&left, &right, DiffMode::Unified, true)?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status(), "modified");
    assert_eq!(results[0].file(), "a.txt vs a.txt");
    assert_eq!(
        results[0].diff(),
        Some(
            format!(
                "--- {}\n+++ {}\n@@ -1,2 +1,2 @@\n foo\n-bar\n+baz\n",
                left.display(),
                right.display()
            )
            .as_str()
        )
    );

    Ok(())
}

#[rstest]
fn identical_files_have_an_empty_diff(empty_trees: TreePair) -> Result<(), Box<dyn std::error::Error>> {
    empty_trees.write_left("x.txt", "same\n");
    empty_trees.write_right("y.txt", "same\n");

    let results = dispatch(
        &empty_trees.left().join("x.txt"),
        &empty_trees.right().join("y.txt"),
        DiffMode::Html,
        false,
    )?;

    assert_eq!(results[0].file(), "x.txt vs y.txt");
    let table = results[0].diff().expect("table");
    assert!(!table.contains("diff_changed"));

    Ok(())
}

#[rstest]
fn file_and_directory_are_mismatched(sample_trees: TreePair) {
    let result = dispatch(
        &sample_trees.left().join("a.txt"),
        &sample_trees.right(),
        DiffMode::Unified,
        true,
    );

    let error = result.expect_err("mixed kinds must fail");
    assert!(matches!(error, DispatchError::MismatchedKinds { .. }));
    assert_eq!(error.kind(), ErrorKind::MismatchedKinds);
    assert_eq!(
        error.to_string(),
        "Mismatched types: Please provide two files or two directories to compare."
    );
}

#[rstest]
fn missing_path_is_named_in_the_error(sample_trees: TreePair) {
    let missing = sample_trees.dir.path().join("nope");

    let error = dispatch(&sample_trees.left(), &missing, DiffMode::Unified, false)
        .expect_err("missing path must fail");

    match error {
        DispatchError::NotFound(path) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn empty_path_is_invalid_input() {
    let error = dispatch(Path::new(""), Path::new(""), DiffMode::Unified, false)
        .expect_err("empty paths must fail");

    assert_eq!(error.kind(), ErrorKind::InvalidInput);
    assert!(error.is_client_error());
}

#[rstest]
fn unreadable_file_pair_becomes_an_error_result(empty_trees: TreePair) {
    let result = Comparison::default().diff_files(
        &empty_trees.left().join("gone.txt"),
        &empty_trees.right().join("also-gone.txt"),
        DiffMode::Unified,
    );

    match result {
        DiffResult::Errored { file, error } => {
            assert_eq!(file, "gone.txt vs also-gone.txt");
            assert!(error.starts_with("Could not compare file: "));
        }
        other => panic!("expected an error result, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn concurrent_dispatch_routes_like_the_sequential_one(
    sample_trees: TreePair,
) -> Result<(), Box<dyn std::error::Error>> {
    let comparison = Comparison::default();

    let concurrent = comparison
        .dispatch_concurrent(&sample_trees.left(), &sample_trees.right(), DiffMode::Html, true)
        .await?;
    let sequential =
        comparison.dispatch(&sample_trees.left(), &sample_trees.right(), DiffMode::Html, true)?;

    assert_eq!(concurrent, sequential);

    Ok(())
}
