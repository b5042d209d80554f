pub mod command;
pub mod string_completer;
use crate::compiler::frontend::analyzer::SPECIAL_FORMS;
use crate::compiler::frontend::syntax::operator;
use crate::compiler::session::Session;
use crate::compiler::Compiler;
use crate::repl::command::CommandCompleter;
use crate::repl::command::Commands;
use crate::repl::string_completer::StringCompleter;
use crate::vm;
use crate::wonderscript_data_directory;
use crate::WONDERSCRIPT_VERSION;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::ValidationContext;
use rustyline::validate::ValidationResult;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use std::borrow::Cow;

/// Reads forms, compiles them and prints the target code.
///
/// The compiler lives as long as the REPL, so macros defined on one line can
/// be used on the next.
pub struct Repl {
    compiler: Compiler,
    commands: Commands,
    editor: Editor<ReplHelper>,
}

pub struct ReplHelper {
    words_completer: StringCompleter,
    command_completer: CommandCompleter,
    bracket_validator: rustyline::validate::MatchingBracketValidator,
    bracket_highlighter: rustyline::highlight::MatchingBracketHighlighter,
}

impl ReplHelper {
    pub fn new(session: &Session) -> Self {
        Self {
            words_completer: StringCompleter::from(known_words(session)),
            command_completer: CommandCompleter::new(),
            bracket_validator: rustyline::validate::MatchingBracketValidator::new(),
            bracket_highlighter: rustyline::highlight::MatchingBracketHighlighter::new(),
        }
    }
}

/// Special forms, operators, core functions and the macros defined so far.
fn known_words(session: &Session) -> Vec<String> {
    SPECIAL_FORMS
        .iter()
        .copied()
        .chain(operator::names())
        .chain(vm::core::names())
        .map(String::from)
        .chain(session.macros().names().map(String::from))
        .collect()
}

impl Helper for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context) -> Option<Self::Hint> {
        None
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.command_completer.complete(line, pos);

        if !matches.is_empty() {
            return Ok((start, matches));
        }

        self.words_completer.complete(line, pos, ctx)
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.bracket_highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.bracket_highlighter.highlight_char(line, pos)
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        self.bracket_validator.validate(ctx)
    }
}

impl Repl {
    pub fn new(compiler: Compiler) -> anyhow::Result<Self> {
        Self::create_directories()?;

        let editor = Editor::<ReplHelper>::with_config(Self::default_config());
        let commands = Commands::new();

        Ok(Self {
            compiler,
            editor,
            commands,
        })
    }

    // main read-compile-print loop
    pub fn run_loop(&mut self) -> anyhow::Result<()> {
        if let Err(e) = self.editor.load_history(&Self::history_path()) {
            log::debug!("could not load history: {}", e);
        }
        self.banner();

        loop {
            let helper = ReplHelper::new(self.compiler.session());
            self.editor.set_helper(Some(helper));

            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(input) => {
                    if let Err(e) = self.handle_input(&input) {
                        eprintln!("{}", e);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.editor.save_history(&Self::history_path())?;
        Ok(())
    }

    fn banner(&self) {
        println!("WonderScript - a lisp for the JavaScript and Ruby runtimes");
        println!("Version: {}", WONDERSCRIPT_VERSION);
        println!("Target: {}\n", self.compiler.target());
        println!("Type :help for help.");
    }

    fn handle_input(&mut self, input: &str) -> anyhow::Result<()> {
        if input.trim().is_empty() {
            return Ok(());
        }

        if !self.commands.dispatch(input, &mut self.compiler)? {
            self.compile(input)?
        }
        Ok(())
    }

    fn compile(&mut self, source: &str) -> anyhow::Result<()> {
        match self.compiler.compile_str(source) {
            Ok(code) if code.is_empty() => (),
            Ok(code) => print!("{}", code),
            Err(e) if e.is_incomplete_input() => eprintln!("Incomplete input: {}", source.trim()),
            Err(e) => eprintln!("{}", e),
        }
        Ok(())
    }

    #[inline]
    fn prompt(&self) -> String {
        format!("{}> ", self.compiler.target().file_extension())
    }

    fn default_config() -> rustyline::config::Config {
        let config_builder = rustyline::config::Config::builder();

        config_builder
            .auto_add_history(true)
            .history_ignore_dups(true)
            .history_ignore_space(false)
            .max_history_size(500)
            .completion_prompt_limit(100)
            .build()
    }

    fn history_path() -> std::path::PathBuf {
        Self::data_dir().join("history")
    }

    #[inline]
    fn create_directories() -> anyhow::Result<()> {
        std::fs::create_dir_all(Self::data_dir())?;

        if !Self::history_path().exists() {
            std::fs::File::create(Self::history_path())?;
        }

        Ok(())
    }

    #[inline]
    fn data_dir() -> std::path::PathBuf {
        wonderscript_data_directory().join("repl")
    }
}
