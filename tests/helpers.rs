#![allow(dead_code)]

use wonderscript::compiler::backend::Target;
pub use wonderscript::compiler::Error;
pub use wonderscript::compiler::Result;
use wonderscript::compiler::Compiler;
pub use matches::assert_matches;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn compile(target: Target, code: &str) -> Result<String> {
    init_logging();
    Compiler::new(target).compile_str(code)
}

pub fn javascript(code: &str) -> String {
    compile(Target::JavaScript, code).unwrap()
}

pub fn ruby(code: &str) -> String {
    compile(Target::Ruby, code).unwrap()
}

/// Compiles `code` in order and returns the output of the last snippet.
pub fn compile_in_session(target: Target, code: &[&str]) -> Result<String> {
    init_logging();
    let mut compiler = Compiler::new(target);
    let mut output = String::new();

    for snippet in code {
        output = compiler.compile_str(snippet)?;
    }

    Ok(output)
}
