use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::{Grammar, GrammarError, EPSILON};

/// LL(1) predictive parse table: maps (non-terminal, lookahead terminal) to
/// the unique production body to expand. Built once from a grammar and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    entries: HashMap<(usize, usize), Vec<usize>>,
}

impl ParseTable {
    /// Registers T[head, t] = body for every terminal t in FIRST(head, body).
    /// Two distinct bodies landing in one cell mean the grammar is not LL(1),
    /// which fails fast instead of keeping the last write.
    pub fn build(grammar: &Grammar) -> Result<Self, GrammarError> {
        let epsilon = grammar.symbol_table[EPSILON];
        let mut entries: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for nt in grammar.non_terminal_iter() {
            for body in &nt.productions {
                let firsts = grammar.first_of_production(&nt.name, body)?;
                for terminal in firsts {
                    if terminal == epsilon {
                        continue;
                    }
                    match entries.entry((nt.index, terminal)) {
                        Entry::Vacant(e) => {
                            e.insert(body.clone());
                        }
                        Entry::Occupied(e) => {
                            if e.get() != body {
                                return Err(GrammarError::NotLL1 {
                                    non_terminal: nt.name.clone(),
                                    terminal: grammar.get_symbol_name(terminal).to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }

        Ok(ParseTable { entries })
    }

    pub fn rule_to_apply(&self, non_terminal: usize, terminal: usize) -> Option<&[usize]> {
        self.entries
            .get(&(non_terminal, terminal))
            .map(|body| body.as_slice())
    }

    pub fn number_of_entries(&self) -> usize {
        self.entries.len()
    }
}
