use crate::compiler::backend::Target;
use crate::compiler::Compiler;
use crate::repl::Repl;

pub struct Command {
    target: Target,
}

impl Command {
    pub fn new(opts: &clap::ArgMatches) -> anyhow::Result<Self> {
        Ok(Self {
            target: super::target(opts)?,
        })
    }

    pub fn options<'a>() -> clap::Command<'a> {
        clap::Command::new("repl")
            .about("start the interactive compiler")
            .arg(super::target_arg())
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let mut repl = Repl::new(Compiler::new(self.target))?;
        repl.run_loop()
    }
}
