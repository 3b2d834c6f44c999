use std::collections::HashSet;

use super::{grammar::Symbol, Grammar, GrammarError, END_MARK, EPSILON};

impl Grammar {
    /// FIRST set of a non-terminal, as symbol indices. Contains the epsilon
    /// marker iff the non-terminal has an epsilon production of its own.
    /// Recomputed from the grammar on every call.
    pub fn first_of(&self, non_terminal: &str) -> Result<HashSet<usize>, GrammarError> {
        Ok(self.first_of_index(self.non_terminal_index(non_terminal)?))
    }

    pub(crate) fn first_of_index(&self, non_terminal: usize) -> HashSet<usize> {
        let mut firsts = HashSet::new();
        let mut visited = HashSet::new();
        visited.insert(non_terminal);
        for body in self.productions_of(non_terminal) {
            match body.first() {
                None => {
                    firsts.insert(self.symbol_table[EPSILON]);
                }
                Some(&leading) => match &self.symbols[leading] {
                    Symbol::Terminal(_) => {
                        firsts.insert(leading);
                    }
                    Symbol::NonTerminal(_) => {
                        self.collect_first(leading, &mut firsts, &mut visited);
                    }
                },
            }
        }
        firsts
    }

    // Epsilon productions of transitively reached non-terminals do not
    // surface an epsilon marker; only the queried head's own epsilon
    // production does. The visited set stops left-recursive cycles.
    fn collect_first(
        &self,
        non_terminal: usize,
        firsts: &mut HashSet<usize>,
        visited: &mut HashSet<usize>,
    ) {
        if !visited.insert(non_terminal) {
            return;
        }
        for body in self.productions_of(non_terminal) {
            match body.first() {
                None => {}
                Some(&leading) => match &self.symbols[leading] {
                    Symbol::Terminal(_) => {
                        firsts.insert(leading);
                    }
                    Symbol::NonTerminal(_) => {
                        self.collect_first(leading, firsts, visited);
                    }
                },
            }
        }
    }

    /// FIRST set of one specific body of a non-terminal. A body beginning
    /// with a terminal yields that singleton; one beginning with a
    /// non-terminal yields that non-terminal's FIRST set; an empty body
    /// yields FOLLOW of the head, the epsilon-propagation rule used to place
    /// epsilon productions in the parse table.
    pub fn first_of_production(
        &self,
        non_terminal: &str,
        body: &[usize],
    ) -> Result<HashSet<usize>, GrammarError> {
        self.non_terminal_index(non_terminal)?;
        match body.first() {
            None => self.follow_set_of(non_terminal),
            Some(&leading) => match &self.symbols[leading] {
                Symbol::Terminal(_) => {
                    let mut firsts = HashSet::new();
                    firsts.insert(leading);
                    Ok(firsts)
                }
                Symbol::NonTerminal(_) => Ok(self.first_of_index(leading)),
            },
        }
    }

    /// FOLLOW set of a non-terminal, as symbol indices. Contains only
    /// terminals (the end marker included, the epsilon marker never).
    /// Recomputed from the grammar on every call.
    pub fn follow_set_of(&self, non_terminal: &str) -> Result<HashSet<usize>, GrammarError> {
        let idx = self.non_terminal_index(non_terminal)?;
        let mut follows = HashSet::new();
        let mut visited = HashSet::new();
        self.collect_follow(idx, &mut follows, &mut visited);
        Ok(follows)
    }

    // The visited set guards against mutual FOLLOW recursion through
    // distinct heads; on a cyclic grammar the result is the partial set
    // gathered before the cycle closes.
    fn collect_follow(
        &self,
        non_terminal: usize,
        follows: &mut HashSet<usize>,
        visited: &mut HashSet<usize>,
    ) {
        if !visited.insert(non_terminal) {
            return;
        }
        let epsilon = self.symbol_table[EPSILON];
        if self.start_symbol == Some(non_terminal) {
            follows.insert(self.symbol_table[END_MARK]);
        }
        for (head, body) in self.rules_with_non_terminal_in_body(non_terminal) {
            for position in 0..body.len() {
                if body[position] != non_terminal {
                    continue;
                }
                match body.get(position + 1) {
                    Some(&next) => match &self.symbols[next] {
                        Symbol::Terminal(_) => {
                            follows.insert(next);
                        }
                        Symbol::NonTerminal(_) => {
                            let firsts = self.first_of_index(next);
                            let derives_empty = firsts.contains(&epsilon);
                            follows.extend(firsts.into_iter().filter(|&s| s != epsilon));
                            if derives_empty {
                                self.collect_follow(head, follows, visited);
                            }
                        }
                    },
                    // the non-terminal ends the body: whatever follows the
                    // head follows it too (end marker when the head is the
                    // start symbol)
                    None => self.collect_follow(head, follows, visited),
                }
            }
        }
    }
}
