use std::collections::HashMap;

use super::{GrammarError, END_MARK, EPSILON};

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    /// Alternative bodies for this head, in source order. An empty body is an
    /// epsilon production.
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn mut_non_terminal(&mut self) -> Option<&mut NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }
}

/// A context-free grammar with interned symbols. Production bodies are
/// sequences of indices into `symbols`, so adjacency queries over a body are
/// plain index lookups. Index 0 is the reserved epsilon marker and the end
/// marker is always registered as a terminal.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    pub symbol_table: HashMap<String, usize>,
    pub start_symbol: Option<usize>,
}

impl Grammar {
    pub fn new() -> Self {
        let mut g = Self {
            symbols: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol: None,
        };

        g.add_non_terminal(EPSILON);
        g.add_terminal(END_MARK.to_string());

        g
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.symbols.iter().filter_map(|s| {
            if let Symbol::Terminal(name) = s {
                Some(name)
            } else {
                None
            }
        })
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        // skip(1): skip the reserved epsilon marker
        self.symbols.iter().filter_map(|s| s.non_terminal()).skip(1)
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    pub fn add_production(&mut self, left: usize, right: Vec<usize>) {
        self.symbols[left]
            .mut_non_terminal()
            .unwrap()
            .productions
            .push(right);
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        match &self.symbols[index] {
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
        }
    }

    /// Resolves a name to a declared non-terminal index. The epsilon marker
    /// does not count as a declared non-terminal.
    pub(crate) fn non_terminal_index(&self, name: &str) -> Result<usize, GrammarError> {
        match self.get_symbol_index(name) {
            Some(idx)
                if idx != self.symbol_table[EPSILON]
                    && self.symbols[idx].non_terminal().is_some() =>
            {
                Ok(idx)
            }
            _ => Err(GrammarError::UnknownSymbol(name.to_string())),
        }
    }

    pub(crate) fn productions_of(&self, non_terminal: usize) -> &[Vec<usize>] {
        self.symbols[non_terminal]
            .non_terminal()
            .map(|nt| nt.productions.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_terminal_symbol(&self, symbol: &str) -> bool {
        matches!(
            self.get_symbol_index(symbol).map(|idx| &self.symbols[idx]),
            Some(Symbol::Terminal(_))
        )
    }

    pub fn contains_non_terminal(&self, symbol: &str) -> bool {
        self.non_terminal_index(symbol).is_ok()
    }

    pub fn is_start_symbol(&self, non_terminal: &str) -> Result<bool, GrammarError> {
        let idx = self.non_terminal_index(non_terminal)?;
        Ok(self.start_symbol == Some(idx))
    }

    pub fn is_epsilon_production(&self, body: &[usize]) -> bool {
        body.is_empty()
    }

    pub fn has_epsilon_transition(&self, non_terminal: &str) -> Result<bool, GrammarError> {
        let idx = self.non_terminal_index(non_terminal)?;
        Ok(self.productions_of(idx).iter().any(|body| body.is_empty()))
    }

    pub fn number_of_productions(&self) -> usize {
        self.non_terminal_iter()
            .map(|nt| nt.productions.len())
            .sum()
    }

    /// The bodies registered for a head, in source order.
    pub fn productions_for(&self, non_terminal: &str) -> Result<&[Vec<usize>], GrammarError> {
        let idx = self.non_terminal_index(non_terminal)?;
        Ok(self.productions_of(idx))
    }

    /// All (head, body) pairs whose body references the given non-terminal.
    /// Self-referential heads are excluded so that FOLLOW computation over the
    /// result terminates.
    pub fn rules_with_non_terminal_in_body(
        &self,
        non_terminal: usize,
    ) -> Vec<(usize, &Vec<usize>)> {
        let mut rules = Vec::new();
        for nt in self.non_terminal_iter() {
            if nt.index == non_terminal {
                continue;
            }
            for body in &nt.productions {
                if body.contains(&non_terminal) {
                    rules.push((nt.index, body));
                }
            }
        }
        rules
    }

    pub fn production_to_vec_str(&self, production: &[usize]) -> Vec<&str> {
        if production.is_empty() {
            vec![EPSILON]
        } else {
            production
                .iter()
                .map(|idx| self.get_symbol_name(*idx))
                .collect()
        }
    }

    pub fn start_symbol_name(&self) -> Option<&str> {
        self.start_symbol.map(|idx| self.get_symbol_name(idx))
    }
}
