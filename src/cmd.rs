pub mod compile;
pub mod repl;

use crate::compiler::backend::Target;
use clap::Arg;

/// The `--target` option shared by all commands.
pub fn target_arg<'a>() -> Arg<'a> {
    Arg::new("target")
        .short('t')
        .long("target")
        .takes_value(true)
        .value_name("TARGET")
        .possible_values(["js", "javascript", "rb", "ruby"])
        .default_value("js")
        .help("the language to compile to")
}

pub fn target(opts: &clap::ArgMatches) -> anyhow::Result<Target> {
    let name = opts.value_of("target").unwrap_or("js");
    Ok(name.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> clap::ArgMatches {
        clap::Command::new("test")
            .arg(target_arg())
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn target_defaults_to_javascript() {
        assert_eq!(target(&parse(&["test"])).unwrap(), Target::JavaScript);
    }

    #[test]
    fn target_by_name() {
        assert_eq!(
            target(&parse(&["test", "--target", "ruby"])).unwrap(),
            Target::Ruby
        );
        assert_eq!(target(&parse(&["test", "-t", "rb"])).unwrap(), Target::Ruby);
    }

    #[test]
    fn unknown_targets_are_rejected() {
        let result = clap::Command::new("test")
            .arg(target_arg())
            .try_get_matches_from(vec!["test", "--target", "python"]);

        assert!(result.is_err());
    }
}
