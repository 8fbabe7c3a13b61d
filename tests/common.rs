use std::fs;
use std::path::{Path, PathBuf};

pub const FIXTURES: &str = "sample-data-files";

/// Copy a sample report into `root/rel`, creating directories on the way
pub fn place_fixture(root: &Path, fixture: &str, rel: &str) -> PathBuf {
    let dest = root.join(rel);
    fs::create_dir_all(dest.parent().expect("fixture destination has a parent"))
        .expect("Failed to create fixture directory");
    fs::copy(Path::new(FIXTURES).join(fixture), &dest).expect("Failed to copy fixture");
    dest
}

/// Write arbitrary bytes at `root/rel`
#[allow(dead_code)]
pub fn place_bytes(root: &Path, rel: &str, bytes: &[u8]) -> PathBuf {
    let dest = root.join(rel);
    fs::create_dir_all(dest.parent().expect("destination has a parent"))
        .expect("Failed to create directory");
    fs::write(&dest, bytes).expect("Failed to write file");
    dest
}
