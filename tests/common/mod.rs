#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x02\0\0\0";

/// Temp directory with a few content-typed fixtures, cleaned up on drop.
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let f = Self { dir };
        f.write("tiny.txt", "The quick brown fox jumps over the lazy dog.\n".repeat(5));
        f.write("sample.png", PNG_BYTES);
        f.write("empty.bin", b"");
        f.write(
            "misleading.txt.png",
            "This is actually a plain text file, not a PNG image.\n".repeat(5),
        );
        f
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Path as the string form passed on the command line.
    pub fn arg(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let p = self.path(name);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create fixture parent");
        }
        fs::write(&p, contents).expect("write fixture");
        p
    }

    pub fn mkdir(&self, name: &str) -> PathBuf {
        let p = self.path(name);
        fs::create_dir_all(&p).expect("create fixture dir");
        p
    }
}
