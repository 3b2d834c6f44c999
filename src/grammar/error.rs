use thiserror::Error;

/// Errors raised while loading a grammar or deriving its LL(1) artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("malformed grammar: {0}")]
    MalformedGrammar(String),
    #[error("non-terminal symbol {0} is not in the grammar")]
    UnknownSymbol(String),
    #[error("grammar is not LL(1): conflicting productions for T[{non_terminal}, {terminal}]")]
    NotLL1 {
        non_terminal: String,
        terminal: String,
    },
}

/// Errors raised by the predictive parser. Each parse call is an independent
/// unit of failure; the grammar and table stay valid afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unrecognized symbol {symbol:?} at position {position}")]
    UnrecognizedSymbol { symbol: char, position: usize },
    #[error("unable to expand non-terminal {non_terminal} on symbol {symbol:?} at position {position}")]
    CannotExpand {
        non_terminal: String,
        symbol: char,
        position: usize,
    },
}
