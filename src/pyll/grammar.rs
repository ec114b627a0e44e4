//! Declarative grammar tables
//!
//! A grammar maps each nonterminal to an ordered list of productions. A production is a
//! sequence of symbol names and the empty sequence is the epsilon alternative. A name is a
//! terminal exactly when it is not a key of the table.
//!
//! Tables are written as static data ([`GrammarTable`]) and resolved once by
//! [`Grammar::from_table`]: every nonterminal gets a dense [`NonTerminalId`] and every
//! production symbol is classified up front, so later stages dispatch on ids instead of
//! looking names up.

pub mod python_subset;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::pyll::error::GrammarError;

/// A terminal symbol: the token type it matches.
pub type Terminal = &'static str;

/// Static grammar source: `(nonterminal, productions)` in declaration order.
pub type GrammarTable = &'static [(&'static str, &'static [&'static [&'static str]])];

/// Dense index of a nonterminal within its [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalId(usize);

impl NonTerminalId {
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminalId),
}

pub type Production = Vec<Symbol>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    name: &'static str,
    productions: Vec<Production>,
}

/// A resolved grammar. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: NonTerminalId,
    rules: Vec<Rule>,
    index: HashMap<&'static str, NonTerminalId>,
}

impl Grammar {
    pub fn from_table(start: &str, table: GrammarTable) -> Result<Self, GrammarError> {
        let mut index = HashMap::with_capacity(table.len());
        for (position, (name, productions)) in table.iter().enumerate() {
            if productions.is_empty() {
                return Err(GrammarError::NoProductions(name.to_string()));
            }
            if index.insert(*name, NonTerminalId(position)).is_some() {
                return Err(GrammarError::DuplicateNonTerminal(name.to_string()));
            }
        }

        let start = *index
            .get(start)
            .ok_or_else(|| GrammarError::UnknownStartSymbol(start.to_string()))?;

        let rules = table
            .iter()
            .map(|(name, productions)| Rule {
                name: *name,
                productions: productions
                    .iter()
                    .map(|production| {
                        production
                            .iter()
                            .map(|symbol| match index.get(symbol) {
                                Some(id) => Symbol::NonTerminal(*id),
                                None => Symbol::Terminal(*symbol),
                            })
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            start,
            rules,
            index,
        })
    }

    pub fn start(&self) -> NonTerminalId {
        self.start
    }

    /// Number of nonterminals.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Nonterminals in declaration order.
    pub fn nonterminals(&self) -> impl Iterator<Item = NonTerminalId> {
        (0..self.rules.len()).map(NonTerminalId)
    }

    pub fn lookup(&self, name: &str) -> Option<NonTerminalId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, nonterminal: NonTerminalId) -> &'static str {
        self.rules[nonterminal.0].name
    }

    pub fn productions(&self, nonterminal: NonTerminalId) -> &[Production] {
        &self.rules[nonterminal.0].productions
    }

    pub fn symbol_name(&self, symbol: Symbol) -> &'static str {
        match symbol {
            Symbol::Terminal(terminal) => terminal,
            Symbol::NonTerminal(id) => self.name(id),
        }
    }

    /// Every terminal used by some production.
    pub fn terminals(&self) -> BTreeSet<Terminal> {
        self.rules
            .iter()
            .flat_map(|rule| rule.productions.iter().flatten())
            .filter_map(|symbol| match symbol {
                Symbol::Terminal(terminal) => Some(*terminal),
                Symbol::NonTerminal(_) => None,
            })
            .collect()
    }

    /// Render one production, `ε` for the empty one.
    pub fn production_to_string(&self, production: &[Symbol]) -> String {
        if production.is_empty() {
            return "ε".to_string();
        }
        production
            .iter()
            .map(|symbol| match symbol {
                Symbol::Terminal(terminal) => terminal.to_string(),
                Symbol::NonTerminal(id) => format!("<{}>", self.name(*id)),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// BNF-like listing, one nonterminal per paragraph.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nonterminal in self.nonterminals() {
            let name = self.name(nonterminal);
            for (idx, production) in self.productions(nonterminal).iter().enumerate() {
                let lead = if idx == 0 {
                    format!("<{}> ::=", name)
                } else {
                    format!("{:width$} |", "", width = name.len() + 5)
                };
                writeln!(f, "{} {}", lead, self.production_to_string(production))?;
            }
        }
        Ok(())
    }
}
