//! Table-driven LL(1) predictive parser
//!
//! Expanding a nonterminal looks at the token under the cursor and takes the first
//! production, in declaration order, whose PREDICT set contains its type. The production is
//! then walked symbol by symbol: terminals must match the cursor (which advances), and
//! nonterminals are expanded against the same cursor, recursively or, in tail position, in
//! place. A choice is never undone.
//!
//! With pairwise-disjoint PREDICT sets this is a deterministic top-down parse. The parser
//! does not verify disjointness; see [`ParseSets::conflicts`].

use crate::pyll::error::{Location, ParseError};
use crate::pyll::grammar::python_subset::python_subset;
use crate::pyll::grammar::{Grammar, NonTerminalId, Symbol, Terminal};
use crate::pyll::lexing::tokens::{Token, EOF, MALFORMED_STRING};
use crate::pyll::sets::ParseSets;

/// Expansion depth allowed before a parse is aborted.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A parser for one grammar. Holds only shared references, so one instance can serve any
/// number of parses.
#[derive(Debug, Clone, Copy)]
pub struct PredictiveParser<'g> {
    grammar: &'g Grammar,
    sets: &'g ParseSets,
    max_depth: usize,
}

impl PredictiveParser<'static> {
    /// Parser for the shipped Python-subset grammar.
    pub fn python_subset() -> Self {
        PredictiveParser::new(python_subset(), super::python_subset_sets())
    }
}

impl<'g> PredictiveParser<'g> {
    pub fn new(grammar: &'g Grammar, sets: &'g ParseSets) -> Self {
        Self {
            grammar,
            sets,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Accept `tokens` or report the first failure.
    ///
    /// Success requires deriving the start symbol and then sitting exactly on the EOF token.
    pub fn parse(&self, tokens: &[Token]) -> Result<(), ParseError> {
        let mut state = ParseState::new(tokens);
        self.expand(self.grammar.start(), &mut state, 0)?;

        let current = state.current();
        if !current.is(EOF) {
            return Err(unexpected(
                current,
                ParseError::TrailingInput {
                    found: current.describe(),
                    location: current.location(),
                },
            ));
        }
        Ok(())
    }

    /// Expand `nonterminal` at the cursor.
    ///
    /// A nonterminal in last position of the chosen production is expanded in place by the
    /// same call, so right-recursive lists (`statements`, `more_args`, `arith_tail`) run in
    /// constant depth. Only symbols followed by more input count towards the depth limit.
    fn expand(
        &self,
        nonterminal: NonTerminalId,
        state: &mut ParseState<'_>,
        depth: usize,
    ) -> Result<(), ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                location: state.current().location(),
            });
        }

        let mut nonterminal = nonterminal;
        loop {
            let production = self.select(nonterminal, state.current())?;

            let Some((last, init)) = production.split_last() else {
                return Ok(());
            };
            for symbol in init {
                match *symbol {
                    Symbol::Terminal(terminal) => state.expect(terminal)?,
                    Symbol::NonTerminal(child) => self.expand(child, state, depth + 1)?,
                }
            }
            match *last {
                Symbol::Terminal(terminal) => return state.expect(terminal),
                Symbol::NonTerminal(tail) => nonterminal = tail,
            }
        }
    }

    /// The first production of `nonterminal` whose PREDICT set holds the type of `current`.
    fn select(
        &self,
        nonterminal: NonTerminalId,
        current: &Token,
    ) -> Result<&'g [Symbol], ParseError> {
        let Some(choice) = self
            .sets
            .predictions(nonterminal)
            .iter()
            .position(|predict| predict.contains(current.kind))
        else {
            return Err(unexpected(
                current,
                ParseError::NoProduction {
                    nonterminal: self.grammar.name(nonterminal).to_string(),
                    expected: self
                        .sets
                        .expected(nonterminal)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    found: current.describe(),
                    location: current.location(),
                },
            ));
        };

        let production = &self.grammar.productions(nonterminal)[choice];
        tracing::trace!(
            line = current.line,
            column = current.column,
            "<{}> -> {}",
            self.grammar.name(nonterminal),
            self.grammar.production_to_string(production)
        );
        Ok(production)
    }
}

/// The cursor shared by every expansion of one parse. Only moves forward.
struct ParseState<'t> {
    tokens: &'t [Token],
    cursor: usize,
    end: Token,
}

impl<'t> ParseState<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        let end_location = tokens
            .last()
            .map(Token::location)
            .unwrap_or(Location::new(1, 1));
        Self {
            tokens,
            cursor: 0,
            end: Token::new(EOF, end_location),
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.cursor).unwrap_or(&self.end)
    }

    fn expect(&mut self, terminal: Terminal) -> Result<(), ParseError> {
        let current = self.current();
        if current.is(terminal) {
            self.cursor += 1;
            return Ok(());
        }
        Err(unexpected(
            current,
            ParseError::Mismatch {
                expected: terminal.to_string(),
                found: current.describe(),
                location: current.location(),
            },
        ))
    }
}

/// A malformed string is a lexical failure no matter which syntax error it triggered.
fn unexpected(found: &Token, syntax: ParseError) -> ParseError {
    if found.is(MALFORMED_STRING) {
        ParseError::MalformedString {
            lexeme: found.text().to_string(),
            location: found.location(),
        }
    } else {
        syntax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pyll::grammar::GrammarTable;
    use crate::pyll::lexing::tokenize;
    use crate::pyll::lexing::tokens::IDENTIFIER;

    fn check(source: &str) -> Result<(), ParseError> {
        PredictiveParser::python_subset().parse(&tokenize(source).unwrap())
    }

    #[test]
    fn test_accepts_assignment() {
        assert_eq!(check("a = 10"), Ok(()));
    }

    #[test]
    fn test_accepts_empty_program() {
        assert_eq!(check(""), Ok(()));
        assert_eq!(check("# only a comment\n\n"), Ok(()));
    }

    #[test]
    fn test_accepts_nested_blocks() {
        let source = "\
def f(x, y):
    if x > y:
        return x
    elif x == y:
        pass
    else:
        while y > 0:
            y -= 1
    return y
";
        assert_eq!(check(source), Ok(()));
    }

    #[test]
    fn test_accepts_calls_lists_and_operators() {
        let source = "\
items = [1, -2, (3 + 4) * 5, f(a)[0]]
items.append(\"x\")
ok = not a and b or c != 2 ** -n
for i in range(0, 20, 2):
    print(i // 2, i % 2)
";
        assert_eq!(check(source), Ok(()));
    }

    #[test]
    fn test_wrong_terminal_is_a_mismatch() {
        assert_eq!(
            check("for i range(5):\n    pass\n"),
            Err(ParseError::Mismatch {
                expected: "in".into(),
                found: "range".into(),
                location: Location::new(1, 7),
            })
        );
    }

    #[test]
    fn test_missing_colon_stops_the_expression() {
        let err = check("while a > 1\n    pass\n").unwrap_err();
        assert!(matches!(err, ParseError::NoProduction { ref found, .. } if found == "INDENT"));
        assert_eq!(err.location(), Location::new(2, 5));
    }

    #[test]
    fn test_no_production_lists_expected_terminals() {
        let err = check("x = :").unwrap_err();
        let ParseError::NoProduction {
            nonterminal,
            expected,
            found,
            location,
        } = err
        else {
            panic!("expected NoProduction, got {err:?}");
        };
        assert_eq!(nonterminal, "expression");
        assert_eq!(found, "tk_dos_puntos");
        assert_eq!(location, Location::new(1, 5));
        for terminal in ["id", "tk_entero", "tk_cadena", "tk_par_izq", "not", "tk_resta"] {
            assert!(expected.iter().any(|e| e == terminal), "missing {terminal}");
        }
    }

    #[test]
    fn test_found_shows_type_and_lexeme() {
        let err = check("if 5 6:\n    pass\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::NoProduction { ref found, .. } if found == "tk_entero(6)"
        ));
        assert_eq!(err.location(), Location::new(1, 6));
        assert!(err.to_string().starts_with("<1,6> syntax error: found tk_entero(6) while parsing"));
    }

    #[test]
    fn test_malformed_string_is_lexical() {
        let err = check("x = \"abc").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedString {
                lexeme: "\"abc".into(),
                location: Location::new(1, 5),
            }
        );
        assert!(err.is_lexical());
    }

    #[test]
    fn test_trailing_input() {
        const ONE: GrammarTable = &[("s", &[&["id"]])];
        let grammar = Grammar::from_table("s", ONE).unwrap();
        let sets = ParseSets::compute(&grammar);
        let parser = PredictiveParser::new(&grammar, &sets);

        let err = parser.parse(&tokenize("a b").unwrap()).unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingInput {
                found: "id(b)".into(),
                location: Location::new(1, 3),
            }
        );
    }

    #[test]
    fn test_first_matching_alternative_wins() {
        // both alternatives predict `id`; the first one is taken and the second never tried
        const AMBIGUOUS: GrammarTable = &[("s", &[&["id", "id"], &["id"]])];
        let grammar = Grammar::from_table("s", AMBIGUOUS).unwrap();
        let sets = ParseSets::compute(&grammar);
        let parser = PredictiveParser::new(&grammar, &sets);

        assert_eq!(parser.parse(&tokenize("a b").unwrap()), Ok(()));
        assert!(matches!(
            parser.parse(&tokenize("a").unwrap()),
            Err(ParseError::Mismatch { ref expected, .. }) if expected == IDENTIFIER
        ));
    }

    #[test]
    fn test_depth_limit() {
        let source = format!("x = {}1{}", "(".repeat(200), ")".repeat(200));
        let err = PredictiveParser::python_subset()
            .with_max_depth(64)
            .parse(&tokenize(&source).unwrap())
            .unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 64, .. }));
        assert_eq!(check(&format!("x = {}1{}", "(".repeat(20), ")".repeat(20))), Ok(()));
    }

    #[test]
    fn test_statement_count_does_not_add_depth() {
        let program: String = (0..2000).map(|i| format!("x{i} = {i}\n")).collect();
        let parser = PredictiveParser::python_subset().with_max_depth(32);
        assert_eq!(parser.parse(&tokenize(&program).unwrap()), Ok(()));
    }

    #[test]
    fn test_list_length_does_not_add_depth() {
        let items: Vec<String> = (0..2000).map(|i| i.to_string()).collect();
        let source = format!("x = [{}]\nprint({})\n", items.join(", "), items.join(" + "));
        let parser = PredictiveParser::python_subset().with_max_depth(32);
        assert_eq!(parser.parse(&tokenize(&source).unwrap()), Ok(()));
    }

    #[test]
    fn test_block_nesting_counts_towards_depth() {
        let mut source = String::new();
        for level in 0..40 {
            source.push_str(&format!("{}if a:\n", "    ".repeat(level)));
        }
        source.push_str(&format!("{}pass\n", "    ".repeat(40)));
        let tokens = tokenize(&source).unwrap();

        assert_eq!(PredictiveParser::python_subset().parse(&tokens), Ok(()));
        assert!(matches!(
            PredictiveParser::python_subset().with_max_depth(32).parse(&tokens),
            Err(ParseError::NestingTooDeep { limit: 32, .. })
        ));
    }

    #[test]
    fn test_empty_token_slice_is_end_of_input() {
        assert_eq!(PredictiveParser::python_subset().parse(&[]), Ok(()));
    }
}
