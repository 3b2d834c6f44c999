extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

mod grammar;
pub use grammar::{
    Grammar, GrammarError, ParseTable, SyntaxError, TableDrivenParser, END_MARK, EPSILON,
};

#[wasm_bindgen]
pub fn first_follow_to_json(grammar: &str) -> String {
    let result = Grammar::parse(grammar).and_then(|g| {
        let sets = g.to_first_follow_output_vec()?;
        Ok(sets.to_json())
    });
    match result {
        Ok(json) => json,
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn parse_table_to_json(grammar: &str) -> String {
    let result = Grammar::parse(grammar).and_then(|g| {
        let table = ParseTable::build(&g)?;
        Ok(table.to_output(&g).to_json())
    });
    match result {
        Ok(json) => json,
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn parse_input_to_json(grammar: &str, input: &str) -> String {
    let g = match Grammar::parse(grammar) {
        Ok(g) => g,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    let mut parser = match TableDrivenParser::new(&g) {
        Ok(parser) => parser,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    match parser.parse(input) {
        Ok(()) => "{\"accepted\":true}".to_string(),
        Err(e) => format!("{{\"accepted\":false,\"error\":\"{}\"}}", e),
    }
}

#[cfg(test)]
const BOOLEAN_GRAMMAR: &str = "\
<S> ::= <A>
<A> ::= <D><B>
<A> ::= '~'<A>
<B> ::= <C><A>
<B> ::= ''
<C> ::= '|'
<C> ::= '^'
<D> ::= '('<A>')'
<D> ::= '0'
<D> ::= '1'";

#[cfg(test)]
fn set_names(g: &Grammar, set: &std::collections::HashSet<usize>) -> Vec<String> {
    let mut names: Vec<String> = set.iter().map(|&idx| g.get_symbol_name(idx).to_string()).collect();
    names.sort();
    names
}

#[cfg(test)]
mod parse_tests {
    use crate::{Grammar, GrammarError};

    #[test]
    fn reads_non_terminals_from_bracketed_heads() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert!(g.contains_non_terminal("S"));
        assert!(g.contains_non_terminal("D"));
        assert!(!g.contains_non_terminal("Z"));
    }

    #[test]
    fn registers_quoted_terminals() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert!(g.contains_terminal_symbol("~"));
        assert!(g.contains_terminal_symbol(")"));
        assert!(!g.contains_terminal_symbol("+"));
    }

    #[test]
    fn end_mark_is_always_a_terminal() {
        let g = Grammar::parse("<S> ::= 'a'").unwrap();
        assert!(g.contains_terminal_symbol("$"));
    }

    #[test]
    fn first_head_is_the_start_symbol() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert_eq!(g.start_symbol_name(), Some("S"));
        assert!(g.is_start_symbol("S").unwrap());
        assert!(!g.is_start_symbol("D").unwrap());
    }

    #[test]
    fn is_start_symbol_fails_on_undeclared_non_terminal() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert_eq!(
            g.is_start_symbol("Z"),
            Err(GrammarError::UnknownSymbol("Z".to_string()))
        );
    }

    #[test]
    fn empty_quote_pair_is_an_epsilon_production() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert!(g.has_epsilon_transition("B").unwrap());
        assert!(!g.has_epsilon_transition("D").unwrap());
        let bodies = g.productions_for("B").unwrap();
        assert!(g.is_epsilon_production(&bodies[1]));
    }

    #[test]
    fn counts_all_productions() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert_eq!(g.number_of_productions(), 10);
        assert_eq!(g.productions_for("D").unwrap().len(), 3);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let g = Grammar::parse("\n<S> ::= 'a'\n\n<S> ::= 'b'\n").unwrap();
        assert_eq!(g.number_of_productions(), 2);
    }

    #[test]
    fn rejects_unbracketed_head() {
        let err = Grammar::parse("S ::= 'a'").unwrap_err();
        assert!(matches!(err, GrammarError::MalformedGrammar(_)));
    }

    #[test]
    fn rejects_line_without_defines_operator() {
        let err = Grammar::parse("<S> = 'a'").unwrap_err();
        assert!(matches!(err, GrammarError::MalformedGrammar(_)));
    }

    #[test]
    fn rejects_missing_closing_bracket_in_body() {
        let err = Grammar::parse("<S> ::= <A\n<A> ::= 'a'").unwrap_err();
        assert!(matches!(err, GrammarError::MalformedGrammar(_)));
    }

    #[test]
    fn rejects_missing_closing_quote_on_terminal() {
        let err = Grammar::parse("<S> ::= 'a").unwrap_err();
        assert!(matches!(err, GrammarError::MalformedGrammar(_)));
    }

    #[test]
    fn rejects_body_reference_to_undeclared_non_terminal() {
        let err = Grammar::parse("<S> ::= <A>").unwrap_err();
        assert_eq!(err, GrammarError::UnknownSymbol("A".to_string()));
    }

    #[test]
    fn resolves_forward_references_between_heads() {
        let g = Grammar::parse("<S> ::= <A>\n<A> ::= 'a'").unwrap();
        assert!(g.contains_non_terminal("A"));
    }

    #[test]
    fn scans_non_terminals_out_of_a_raw_body() {
        let names = Grammar::non_terminals_in_body("'+'<B><C>").unwrap();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn scanning_a_raw_body_fails_on_missing_closing_bracket() {
        let err = Grammar::non_terminals_in_body("'+'<A><B><C").unwrap_err();
        assert!(matches!(err, GrammarError::MalformedGrammar(_)));
    }
}

#[cfg(test)]
mod first_follow_tests {
    use crate::{set_names, Grammar, GrammarError, EPSILON};

    #[test]
    fn first_of_terminal_leading_bodies() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let firsts = g.first_of("D").unwrap();
        assert_eq!(set_names(&g, &firsts), vec!["(", "0", "1"]);
    }

    #[test]
    fn first_of_non_terminal_leading_bodies() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let firsts = g.first_of("S").unwrap();
        assert_eq!(firsts.len(), 4);
        assert_eq!(set_names(&g, &firsts), vec!["(", "0", "1", "~"]);
    }

    #[test]
    fn first_contains_epsilon_marker_for_epsilon_productions() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let firsts = g.first_of("B").unwrap();
        assert!(set_names(&g, &firsts).contains(&EPSILON.to_string()));
    }

    #[test]
    fn first_of_fails_on_undeclared_non_terminal() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert_eq!(
            g.first_of("Z"),
            Err(GrammarError::UnknownSymbol("Z".to_string()))
        );
    }

    #[test]
    fn follow_of_body_ending_non_terminal() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let follows = g.follow_set_of("A").unwrap();
        assert_eq!(set_names(&g, &follows), vec!["$", ")"]);
    }

    #[test]
    fn follow_of_recursive_production_rules() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let follows = g.follow_set_of("B").unwrap();
        assert_eq!(set_names(&g, &follows), vec!["$", ")"]);
    }

    #[test]
    fn first_of_epsilon_body_equals_follow_of_head() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let first_of_epsilon = g.first_of_production("B", &[]).unwrap();
        let follows = g.follow_set_of("B").unwrap();
        assert_eq!(first_of_epsilon, follows);
    }

    #[test]
    fn first_of_production_starting_with_a_terminal_is_a_singleton() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let bodies = g.productions_for("A").unwrap().to_vec();
        let firsts = g.first_of_production("A", &bodies[1]).unwrap();
        assert_eq!(set_names(&g, &firsts), vec!["~"]);
    }

    #[test]
    fn finds_rules_with_non_terminal_in_body_excluding_self_reference() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        let a = g.get_symbol_index("A").unwrap();
        let rules = g.rules_with_non_terminal_in_body(a);
        // <A> ::= '~'<A> is self-referential and excluded
        assert_eq!(rules.len(), 3);
        let heads: Vec<&str> = rules.iter().map(|(head, _)| g.get_symbol_name(*head)).collect();
        assert!(heads.contains(&"S"));
        assert!(heads.contains(&"B"));
        assert!(heads.contains(&"D"));
    }

    #[test]
    fn follow_terminates_on_mutually_recursive_heads() {
        let g = Grammar::parse("<S> ::= <A>'a'\n<A> ::= <B>\n<B> ::= <A>").unwrap();
        let follows = g.follow_set_of("B").unwrap();
        assert_eq!(set_names(&g, &follows), vec!["a"]);
    }

    #[test]
    fn first_terminates_on_left_recursive_cycle() {
        let g = Grammar::parse("<S> ::= <A>'a'\n<A> ::= <B>\n<B> ::= <A>").unwrap();
        let firsts = g.first_of("A").unwrap();
        assert!(firsts.is_empty());
    }

    #[test]
    fn repeated_queries_re_derive_the_same_sets() {
        let g = Grammar::parse(crate::BOOLEAN_GRAMMAR).unwrap();
        assert_eq!(g.first_of("S").unwrap(), g.first_of("S").unwrap());
        assert_eq!(
            g.follow_set_of("B").unwrap(),
            g.follow_set_of("B").unwrap()
        );
    }
}
