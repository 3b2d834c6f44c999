use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, GrammarError, ParseTable, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} ::= {}", self.left, right, width = left_width)
                } else {
                    format!("{:>width$}   | {}", "", right, width = left_width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        if self.rights.is_empty() {
            return String::new();
        }
        let left = format!("{} & \\rightarrow &", escape::tex(self.left));
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        (left + &right).replace(EPSILON, "\\epsilon")
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let mut productions = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let rights = non_terminal
                .productions
                .iter()
                .map(|production| self.production_to_vec_str(production))
                .collect();
            productions.push(ProductionOutput {
                left: non_terminal.name.as_str(),
                rights,
            });
        }
        ProductionOutputVec { productions }
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutput<'a> {
    name: &'a str,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {}",
            self.name,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }

    fn to_latex(&self) -> String {
        fn f(a: &[&str]) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        format!(
            "{} & {} & {}",
            escape::tex(self.name),
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c}\n".to_string()
            + "Symbol & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Grammar {
    /// FIRST and FOLLOW for every non-terminal, derived on demand. Set
    /// members are sorted for stable output.
    pub fn to_first_follow_output_vec(&self) -> Result<NonTerminalOutputVec, GrammarError> {
        let mut data = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let mut first: Vec<&str> = self
                .first_of(&non_terminal.name)?
                .iter()
                .map(|idx| self.get_symbol_name(*idx))
                .collect();
            let mut follow: Vec<&str> = self
                .follow_set_of(&non_terminal.name)?
                .iter()
                .map(|idx| self.get_symbol_name(*idx))
                .collect();
            first.sort();
            follow.sort();
            data.push(NonTerminalOutput {
                name: non_terminal.name.as_str(),
                first,
                follow,
            });
        }
        Ok(NonTerminalOutputVec { data })
    }
}

#[derive(Serialize)]
pub struct ParseTableRow<'a> {
    left: &'a str,
    cells: Vec<String>,
}

#[derive(Serialize)]
pub struct ParseTableOutput<'a> {
    terminals: Vec<&'a str>,
    rows: Vec<ParseTableRow<'a>>,
}

impl ParseTableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.terminals.iter().map(|&t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for row in &self.rows {
            let mut line: Vec<String> = vec![row.left.to_string()];
            line.extend(row.cells.iter().cloned());
            output.push(line);
        }

        let mut width = vec![0; self.terminals.len() + 1];
        for j in 0..width.len() {
            width[j] = output.iter().map(|line| line[j].len()).max().unwrap_or(0);
        }
        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(self.terminals.len()),
        )];
        header.extend(
            self.terminals
                .iter()
                .map(|&t| format!("\\text{{{}}}", escape::tex(t))),
        );
        let header = header.join(" & ");

        let output = self
            .rows
            .iter()
            .map(|row| {
                let mut line: Vec<String> = vec![escape::tex(row.left).to_string()];
                line.extend(
                    row.cells
                        .iter()
                        .map(|cell| escape::tex(cell.as_str()).replace(EPSILON, "\\epsilon")),
                );
                line.join(" & ")
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl ParseTable {
    pub fn to_output<'a>(&self, grammar: &'a Grammar) -> ParseTableOutput<'a> {
        let terminals: Vec<&str> = grammar.terminal_iter().map(|t| t.as_str()).collect();
        let mut rows = Vec::new();
        for non_terminal in grammar.non_terminal_iter() {
            let cells = terminals
                .iter()
                .map(|t| {
                    let terminal = grammar.get_symbol_index(t).unwrap();
                    match self.rule_to_apply(non_terminal.index, terminal) {
                        Some(body) => grammar.production_to_vec_str(body).join(" "),
                        None => String::new(),
                    }
                })
                .collect();
            rows.push(ParseTableRow {
                left: non_terminal.name.as_str(),
                cells,
            });
        }
        ParseTableOutput { terminals, rows }
    }
}
