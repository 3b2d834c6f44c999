use super::{grammar::Symbol, Grammar, GrammarError, ParseTable, SyntaxError, END_MARK};

/// Table-driven LL(1) recognizer. The parse table is built eagerly at
/// construction; the symbol stack is local to each parse call and cleared on
/// every exit path, so one parser instance can be reused across inputs.
pub struct TableDrivenParser<'a> {
    grammar: &'a Grammar,
    table: ParseTable,
    start: usize,
    stack: Vec<usize>,
}

impl<'a> TableDrivenParser<'a> {
    pub fn new(grammar: &'a Grammar) -> Result<Self, GrammarError> {
        let start = grammar.start_symbol.ok_or_else(|| {
            GrammarError::MalformedGrammar("grammar has no productions".to_string())
        })?;
        let table = ParseTable::build(grammar)?;
        Ok(TableDrivenParser {
            grammar,
            table,
            start,
            stack: Vec::new(),
        })
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Accepts or rejects an input string. Whitespace is stripped before
    /// matching and the end marker is appended to the input.
    pub fn parse(&mut self, input: &str) -> Result<(), SyntaxError> {
        let result = self.run(input);
        self.stack.clear();
        result
    }

    fn run(&mut self, input: &str) -> Result<(), SyntaxError> {
        let end_mark = self.grammar.symbol_table[END_MARK];
        let end_char = END_MARK.chars().next().unwrap();

        let mut symbols: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
        symbols.push(end_char);

        self.stack.push(end_mark);
        self.stack.push(self.start);
        let mut position = 0;

        while let Some(&top) = self.stack.last() {
            let current = symbols[position];
            if top == end_mark && current == end_char {
                return Ok(());
            }
            let current_index = self.grammar.get_symbol_index(&current.to_string());
            match &self.grammar.symbols[top] {
                Symbol::Terminal(_) => {
                    if current_index == Some(top) {
                        self.stack.pop();
                        position += 1;
                    } else {
                        return Err(SyntaxError::UnrecognizedSymbol {
                            symbol: current,
                            position,
                        });
                    }
                }
                Symbol::NonTerminal(nt) => {
                    let body = current_index.and_then(|c| self.table.rule_to_apply(top, c));
                    match body {
                        Some(body) => {
                            // push the body reversed so its leftmost symbol
                            // ends up on top; an epsilon body pushes nothing
                            let body = body.to_vec();
                            self.stack.pop();
                            self.stack.extend(body.iter().rev());
                        }
                        None => {
                            return Err(SyntaxError::CannotExpand {
                                non_terminal: nt.name.clone(),
                                symbol: current,
                                position,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
