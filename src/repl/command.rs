use crate::compiler::frontend::expander::Expander;
use crate::compiler::frontend::Frontend;
use crate::compiler::Compiler;
use anyhow::anyhow;
use rustyline::completion::Pair;

const COMMANDS: &[(&str, &str)] = &[
    (":help", "Show help on the available commands"),
    (":target", "Show the target code is compiled to"),
    (":macros", "List the macros defined so far"),
    (":source name", "Show the compiled source of the macro `name`"),
    (":expand form", "Show the full macro expansion of `form`"),
];

/// REPL commands. Input starting with `:` is a command, everything else is code.
#[derive(Default)]
pub struct Commands;

impl Commands {
    pub fn new() -> Self {
        Self {}
    }

    /// Returns whether `input` was a command.
    pub fn dispatch(&self, input: &str, compiler: &mut Compiler) -> anyhow::Result<bool> {
        let input = input.trim();
        if !input.starts_with(':') {
            return Ok(false);
        }

        let (command, argument) = match input.find(char::is_whitespace) {
            Some(i) => (&input[..i], input[i..].trim()),
            None => (input, ""),
        };

        match (command, argument) {
            (":help", "") => self.handle_help(),
            (":target", "") => println!("{}", compiler.target()),
            (":macros", "") => self.handle_macros(compiler),
            (":source", name) if !name.is_empty() => self.handle_source(name, compiler)?,
            (":expand", form) if !form.is_empty() => {
                for expansion in self.expand(form, compiler)? {
                    println!("{}", expansion);
                }
            }
            _ => return Err(anyhow!("Invalid command. Type :help for help.")),
        }

        Ok(true)
    }

    fn handle_help(&self) {
        println!("Available commands: ");
        for (usage, description) in COMMANDS {
            self.display_help(usage, description);
        }
    }

    fn handle_macros(&self, compiler: &Compiler) {
        let mut names: Vec<_> = compiler.session().macros().names().collect();
        names.sort_unstable();

        if names.is_empty() {
            println!("No macros defined");
        } else {
            println!("{}", names.join(" "));
        }
    }

    fn handle_source(&self, name: &str, compiler: &Compiler) -> anyhow::Result<()> {
        match compiler.session().macros().get(name) {
            Some(mac) => {
                println!("{}", mac.source());
                Ok(())
            }
            None => Err(anyhow!("No macro named {}", name)),
        }
    }

    fn expand(&self, input: &str, compiler: &Compiler) -> anyhow::Result<Vec<String>> {
        let forms = Frontend::new()
            .read_str(input)
            .map_err(|e| anyhow!("{}", e))?;
        let expander = Expander::new(compiler.session().macros());

        forms
            .iter()
            .map(|form| -> anyhow::Result<String> {
                let expansion = expander.expand(form).map_err(|e| anyhow!("{}", e))?;
                Ok(expansion.to_string())
            })
            .collect()
    }

    #[inline]
    fn display_help(&self, usage: &str, description: &str) {
        println!("{:<25} {}", usage, description);
    }
}

/// Completes command names at the start of the line.
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let prefix = &line[..pos];
        if !prefix.starts_with(':') || prefix.contains(char::is_whitespace) {
            return (0, vec![]);
        }

        let matches = COMMANDS
            .iter()
            .filter_map(|(usage, _)| usage.split_whitespace().next())
            .filter(|command| command.starts_with(prefix))
            .map(|command| Pair {
                display: command.to_string(),
                replacement: command.to_string(),
            })
            .collect();

        (0, matches)
    }
}
