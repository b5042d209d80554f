pub mod file;
pub mod string;
pub use file::FileSource;
pub use string::StringSource;

#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Synthetic,
    Buffer(std::string::String),
    File(std::path::PathBuf),
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Synthetic => f.write_str("<synthetic>"),
            Origin::Buffer(name) => write!(f, "<buffer {}>", name),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub trait HasOrigin {
    fn origin(&self) -> Origin;
}

/// Anything the compiler can read program text from.
pub trait Source: HasOrigin {
    fn read_to_string(&mut self, buf: &mut String) -> std::io::Result<usize>;
}
