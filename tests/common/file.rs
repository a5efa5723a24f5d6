use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn create_directory(path: &Path) {
    std::fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", path, e));
}

/// Writes `files_count` files with generated names and lines under `dir`,
/// returning their root-relative names.
pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<String> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    let mut names = (0..files_count)
        .map(|i| {
            let file_name = format!("{}_{i}.txt", Word().fake::<String>());
            let file_content = (0..(3..8).fake::<usize>())
                .map(|_| Words(2..6).fake::<Vec<String>>().join(" ") + "\n")
                .collect::<String>();

            write_file(FileSpec::new(dir.join(&file_name), file_content));
            file_name
        })
        .collect::<Vec<_>>();

    names.sort();
    names
}
