use crate::common::file::{FileSpec, create_directory, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// A left and right directory under one temp dir.
pub struct TreePair {
    pub dir: TempDir,
}

impl TreePair {
    pub fn left(&self) -> std::path::PathBuf {
        self.dir.path().join("left")
    }

    pub fn right(&self) -> std::path::PathBuf {
        self.dir.path().join("right")
    }

    pub fn write_left(&self, file: &str, content: &str) {
        write_file(FileSpec::new(self.left().join(file), content.to_string()));
    }

    pub fn write_right(&self, file: &str, content: &str) {
        write_file(FileSpec::new(self.right().join(file), content.to_string()));
    }
}

#[fixture]
pub fn empty_trees() -> TreePair {
    let dir = TempDir::new().expect("Failed to create temp dir");
    create_directory(&dir.path().join("left"));
    create_directory(&dir.path().join("right"));

    TreePair { dir }
}

/// `a.txt` changed, `same.txt` unchanged, one unique file on each side.
#[fixture]
pub fn sample_trees(empty_trees: TreePair) -> TreePair {
    empty_trees.write_left("a.txt", "foo\nbar\n");
    empty_trees.write_right("a.txt", "foo\nbaz\n");
    empty_trees.write_left("same.txt", "unchanged\n");
    empty_trees.write_right("same.txt", "unchanged\n");
    empty_trees.write_left("only1.txt", "left only\n");
    empty_trees.write_right("only2.txt", "right only\n");

    empty_trees
}

pub fn run_litediff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("litediff").expect("Failed to find litediff binary");
    cmd.current_dir(dir).env_remove("LITEDIFF_LOG").args(args);
    cmd
}
