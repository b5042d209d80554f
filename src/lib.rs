extern crate im_rc;
extern crate thiserror;

extern crate nom;

pub mod cmd;
pub mod compiler;
pub mod repl;
pub mod vm;

#[cfg(test)]
#[macro_use]
extern crate matches;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub const WONDERSCRIPT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per user data directory, e.g. for the REPL history.
pub fn wonderscript_data_directory() -> std::path::PathBuf {
    match directories::ProjectDirs::from("org", "wonderscript", "wsc") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => std::env::temp_dir().join("wonderscript"),
    }
}
