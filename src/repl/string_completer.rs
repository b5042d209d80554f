use rustc_hash::FxHashSet;
use rustyline::completion::Completer;
use rustyline::completion::Pair;
use rustyline::Context;

/// Characters that end a symbol in source text.
const DELIMITERS: &[char] = &['(', ')', '[', ']', '{', '}', '\'', '"', '`', '~', '@', '^'];

/// Completes the symbol under the cursor from a fixed set of words.
pub struct StringCompleter {
    strings: FxHashSet<String>,
}

impl StringCompleter {
    pub fn from<I: Into<String>, T: IntoIterator<Item = I>>(input: T) -> Self {
        let mut strings = FxHashSet::default();

        for s in input {
            strings.insert(s.into());
        }

        Self { strings }
    }

    fn complete_string(&self, pos: usize, input: &str) -> rustyline::Result<(usize, Vec<Pair>)> {
        if input.is_empty() {
            return Ok((pos, vec![]));
        }

        let mut all_matches: Vec<Pair> = self
            .strings
            .iter()
            .filter(|known| known.starts_with(input))
            .map(|known| Pair {
                display: known.clone(),
                replacement: known.clone(),
            })
            .collect();

        all_matches.sort_by(|a, b| a.replacement.cmp(&b.replacement));
        Ok((pos - input.len(), all_matches))
    }
}

/// The part of the symbol left of `pos`.
fn word_before(line: &str, pos: usize) -> &str {
    let prefix = &line[..pos];
    let start = prefix
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace() || *c == ',' || DELIMITERS.contains(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    &prefix[start..]
}

impl Completer for StringCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.complete_string(pos, word_before(line, pos))
    }
}
