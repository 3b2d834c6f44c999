use crate::Grammar;

use super::GrammarError;

impl Grammar {
    /// Loads a grammar from restricted-BNF text. Each line reads
    /// `<Head> ::= body`, where the body is a sequence of single-quoted
    /// one-character terminals and bracketed non-terminal references, or the
    /// literal `''` for an epsilon production. The first head is the start
    /// symbol. Heads are registered before bodies are tokenized so forward
    /// references resolve.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, usize, &str)> = Vec::new();

        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let line_no = i + 1;
            let (head, body) = match line.split_once("::=") {
                Some((head, body)) => (head.trim(), body.trim()),
                None => {
                    return Err(GrammarError::MalformedGrammar(format!(
                        "line {}: missing \"::=\"",
                        line_no
                    )))
                }
            };
            if head.len() < 3 || !head.starts_with('<') || !head.ends_with('>') {
                return Err(GrammarError::MalformedGrammar(format!(
                    "line {}: production head must be enclosed in angular brackets <>",
                    line_no
                )));
            }
            let name = &head[1..head.len() - 1];
            let head_idx = match g.get_symbol_index(name) {
                Some(idx) => idx,
                None => g.add_non_terminal(name),
            };
            if g.start_symbol.is_none() {
                g.start_symbol = Some(head_idx);
            }
            raw_productions.push((line_no, head_idx, body));
        }

        for (line_no, head, body) in raw_productions {
            // an empty-quote pair alone denotes an epsilon production, stored
            // as an explicit empty body
            if body == "''" {
                g.add_production(head, Vec::new());
                continue;
            }

            let chars: Vec<char> = body.chars().collect();
            let mut symbols: Vec<usize> = Vec::new();
            let mut i = 0;
            while i < chars.len() {
                match chars[i] {
                    c if c.is_whitespace() => i += 1,
                    '\'' => {
                        match (chars.get(i + 1), chars.get(i + 2)) {
                            (Some(&c), Some(&'\'')) => {
                                let name = c.to_string();
                                let idx = match g.get_symbol_index(&name) {
                                    Some(idx) if g.symbols[idx].non_terminal().is_some() => {
                                        return Err(GrammarError::MalformedGrammar(format!(
                                            "line {}: symbol {} is already a non-terminal",
                                            line_no, name
                                        )))
                                    }
                                    Some(idx) => idx,
                                    None => g.add_terminal(name),
                                };
                                symbols.push(idx);
                                i += 3;
                            }
                            _ => {
                                return Err(GrammarError::MalformedGrammar(format!(
                                    "line {}: missing closing quote ' on terminal symbol",
                                    line_no
                                )))
                            }
                        }
                    }
                    '<' => {
                        let close = match chars[i + 1..].iter().position(|&c| c == '>') {
                            Some(offset) => i + 1 + offset,
                            None => {
                                return Err(GrammarError::MalformedGrammar(format!(
                                    "line {}: missing closing brackets > in rule body",
                                    line_no
                                )))
                            }
                        };
                        let name: String = chars[i + 1..close].iter().collect();
                        symbols.push(g.non_terminal_index(&name)?);
                        i = close + 1;
                    }
                    c => {
                        return Err(GrammarError::MalformedGrammar(format!(
                            "line {}: unexpected character {:?} in rule body",
                            line_no, c
                        )))
                    }
                }
            }
            g.add_production(head, symbols);
        }

        Ok(g)
    }

    /// Scans a raw body string and returns the bracketed non-terminal names
    /// it references, in order.
    pub fn non_terminals_in_body(body: &str) -> Result<Vec<&str>, GrammarError> {
        let mut names = Vec::new();
        let mut rest = body;
        while let Some(open) = rest.find('<') {
            let after = &rest[open + 1..];
            match after.find('>') {
                Some(close) => {
                    names.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                None => {
                    return Err(GrammarError::MalformedGrammar(format!(
                        "missing closing brackets > in rule {}",
                        body
                    )))
                }
            }
        }
        Ok(names)
    }
}
