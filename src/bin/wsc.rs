use wonderscript::cmd;
use wonderscript::WONDERSCRIPT_VERSION;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = clap::Command::new("wsc")
        .version(WONDERSCRIPT_VERSION)
        .about("Compile WonderScript to JavaScript or Ruby")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::compile::Command::options())
        .subcommand(cmd::repl::Command::options())
        .get_matches();

    match opts.subcommand() {
        Some(("compile", sub_opts)) => cmd::compile::Command::new(sub_opts)?.run(),
        Some(("repl", sub_opts)) => cmd::repl::Command::new(sub_opts)?.run(),
        _ => Ok(()),
    }
}
