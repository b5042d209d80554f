use crate::compiler::backend::Target;
use crate::compiler::source::FileSource;
use crate::compiler::Compiler;
use anyhow::anyhow;
use clap::arg;
use std::io::{self, Write};
use std::path::PathBuf;

pub struct Command {
    input: PathBuf,
    target: Target,
}

impl Command {
    pub fn new(opts: &clap::ArgMatches) -> anyhow::Result<Self> {
        let path = opts
            .value_of("INPUT")
            .ok_or_else(|| anyhow!("No input file given"))?;

        Ok(Self {
            input: PathBuf::from(path),
            target: super::target(opts)?,
        })
    }

    pub fn options<'a>() -> clap::Command<'a> {
        clap::Command::new("compile")
            .alias("c")
            .about("compile the specified file and write the result to stdout")
            .arg(super::target_arg())
            .arg(arg!(<INPUT> "the file to compile"))
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let mut source = FileSource::new(self.input.clone());
        let mut compiler = Compiler::new(self.target);

        // compiler errors may hold interpreter values, which are not Send
        let output = compiler
            .compile_source(&mut source)
            .map_err(|e| anyhow!("{}: {}", self.input.display(), e))?;
        io::stdout().write_all(output.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_options() {
        let opts = Command::options()
            .try_get_matches_from(vec!["compile", "--target", "ruby", "core.ws"])
            .unwrap();
        let command = Command::new(&opts).unwrap();

        assert_eq!(command.input, PathBuf::from("core.ws"));
        assert_eq!(command.target, Target::Ruby);
    }

    #[test]
    fn input_is_required() {
        assert!(Command::options()
            .try_get_matches_from(vec!["compile"])
            .is_err());
    }
}
