use super::{HasOrigin, Origin, Source};
use std::io::Read;

pub struct FileSource {
    pub path: std::path::PathBuf,
}

impl FileSource {
    pub fn new(p: std::path::PathBuf) -> Self {
        Self { path: p }
    }
}

impl HasOrigin for FileSource {
    fn origin(&self) -> Origin {
        Origin::File(self.path.clone())
    }
}

impl Source for FileSource {
    fn read_to_string(&mut self, buf: &mut String) -> std::io::Result<usize> {
        std::fs::File::open(&self.path)?.read_to_string(buf)
    }
}
