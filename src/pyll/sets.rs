//! FIRST, FOLLOW and PREDICT set computation
//!
//! All three are monotonic fixpoints over finite sets: each pass only adds terminals (or the
//! nullable flag), so iteration stops once a full pass changes nothing.
//!
//! The sequence rule shared by every computation scans symbols left to right. A terminal
//! contributes itself and stops the scan. A nonterminal contributes its FIRST terminals and
//! the scan continues past it only when it is nullable. A sequence scanned to its end
//! (including the empty sequence) is nullable.

use std::collections::BTreeSet;

use crate::pyll::grammar::{Grammar, NonTerminalId, Symbol, Terminal};
use crate::pyll::lexing::tokens::EOF;

/// The end-of-stream marker seeded into FOLLOW of the start symbol.
pub const END_MARKER: Terminal = EOF;

/// FIRST set of a nonterminal or sequence: its leading terminals plus the epsilon marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    pub terminals: BTreeSet<Terminal>,
    pub nullable: bool,
}

/// Two productions of the same nonterminal whose PREDICT sets overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub nonterminal: NonTerminalId,
    pub first: usize,
    pub second: usize,
    pub terminals: BTreeSet<Terminal>,
}

/// Precomputed FIRST, FOLLOW and PREDICT sets of one grammar. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSets {
    first: Vec<FirstSet>,
    follow: Vec<BTreeSet<Terminal>>,
    predict: Vec<Vec<BTreeSet<Terminal>>>,
}

impl ParseSets {
    pub fn compute(grammar: &Grammar) -> Self {
        let first = compute_first(grammar);
        let follow = compute_follow(grammar, &first);
        let predict = compute_predict(grammar, &first, &follow);
        Self {
            first,
            follow,
            predict,
        }
    }

    pub fn first(&self, nonterminal: NonTerminalId) -> &FirstSet {
        &self.first[nonterminal.index()]
    }

    pub fn follow(&self, nonterminal: NonTerminalId) -> &BTreeSet<Terminal> {
        &self.follow[nonterminal.index()]
    }

    pub fn predict(&self, nonterminal: NonTerminalId, production: usize) -> &BTreeSet<Terminal> {
        &self.predict[nonterminal.index()][production]
    }

    /// PREDICT sets of every production of `nonterminal`, in declaration order.
    pub fn predictions(&self, nonterminal: NonTerminalId) -> &[BTreeSet<Terminal>] {
        &self.predict[nonterminal.index()]
    }

    /// Every terminal that licenses some production of `nonterminal`.
    pub fn expected(&self, nonterminal: NonTerminalId) -> BTreeSet<Terminal> {
        self.predictions(nonterminal)
            .iter()
            .flatten()
            .copied()
            .collect()
    }

    /// FIRST of an arbitrary symbol sequence.
    pub fn first_of(&self, symbols: &[Symbol]) -> FirstSet {
        first_of_sequence(&self.first, symbols)
    }

    /// Pairwise PREDICT overlaps. Empty for an LL(1) grammar.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for (nt, predictions) in self.predict.iter().enumerate() {
            for (i, left) in predictions.iter().enumerate() {
                for (j, right) in predictions.iter().enumerate().skip(i + 1) {
                    let shared: BTreeSet<Terminal> = left.intersection(right).copied().collect();
                    if !shared.is_empty() {
                        conflicts.push(Conflict {
                            nonterminal: NonTerminalId::from_index(nt),
                            first: i,
                            second: j,
                            terminals: shared,
                        });
                    }
                }
            }
        }
        conflicts
    }
}

fn first_of_sequence(first: &[FirstSet], symbols: &[Symbol]) -> FirstSet {
    let mut out = FirstSet::default();
    for symbol in symbols {
        match symbol {
            Symbol::Terminal(terminal) => {
                out.terminals.insert(*terminal);
                return out;
            }
            Symbol::NonTerminal(id) => {
                let set = &first[id.index()];
                out.terminals.extend(set.terminals.iter().copied());
                if !set.nullable {
                    return out;
                }
            }
        }
    }
    out.nullable = true;
    out
}

fn compute_first(grammar: &Grammar) -> Vec<FirstSet> {
    let mut first = vec![FirstSet::default(); grammar.len()];
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for nt in grammar.nonterminals() {
            for production in grammar.productions(nt) {
                let seq = first_of_sequence(&first, production);
                let entry = &mut first[nt.index()];
                let before = entry.terminals.len();
                entry.terminals.extend(seq.terminals);
                if entry.terminals.len() != before || (seq.nullable && !entry.nullable) {
                    entry.nullable |= seq.nullable;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    tracing::debug!(passes, "FIRST sets converged");
    first
}

fn compute_follow(grammar: &Grammar, first: &[FirstSet]) -> Vec<BTreeSet<Terminal>> {
    let mut follow = vec![BTreeSet::new(); grammar.len()];
    follow[grammar.start().index()].insert(END_MARKER);
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for owner in grammar.nonterminals() {
            for production in grammar.productions(owner) {
                for (position, symbol) in production.iter().enumerate() {
                    let Symbol::NonTerminal(target) = symbol else {
                        continue;
                    };
                    let suffix = first_of_sequence(first, &production[position + 1..]);
                    let mut additions = suffix.terminals;
                    if suffix.nullable {
                        additions.extend(follow[owner.index()].iter().copied());
                    }
                    let entry = &mut follow[target.index()];
                    let before = entry.len();
                    entry.extend(additions);
                    changed |= entry.len() != before;
                }
            }
        }
        if !changed {
            break;
        }
    }
    tracing::debug!(passes, "FOLLOW sets converged");
    follow
}

fn compute_predict(
    grammar: &Grammar,
    first: &[FirstSet],
    follow: &[BTreeSet<Terminal>],
) -> Vec<Vec<BTreeSet<Terminal>>> {
    grammar
        .nonterminals()
        .map(|nt| {
            grammar
                .productions(nt)
                .iter()
                .map(|production| {
                    let seq = first_of_sequence(first, production);
                    let mut set = seq.terminals;
                    if seq.nullable {
                        set.extend(follow[nt.index()].iter().copied());
                    }
                    set
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pyll::grammar::GrammarTable;

    const EXPR: GrammarTable = &[
        ("E", &[&["T", "E'"]]),
        ("E'", &[&["+", "T", "E'"], &[]]),
        ("T", &[&["F", "T'"]]),
        ("T'", &[&["*", "F", "T'"], &[]]),
        ("F", &[&["(", "E", ")"], &["id"]]),
    ];

    fn set(items: &[Terminal]) -> BTreeSet<Terminal> {
        items.iter().copied().collect()
    }

    fn expr() -> (Grammar, ParseSets) {
        let grammar = Grammar::from_table("E", EXPR).unwrap();
        let sets = ParseSets::compute(&grammar);
        (grammar, sets)
    }

    #[test]
    fn test_first_sets() {
        let (g, sets) = expr();
        let e = g.lookup("E").unwrap();
        let e_tail = g.lookup("E'").unwrap();
        let t_tail = g.lookup("T'").unwrap();

        assert_eq!(sets.first(e).terminals, set(&["(", "id"]));
        assert!(!sets.first(e).nullable);
        assert_eq!(sets.first(e_tail).terminals, set(&["+"]));
        assert!(sets.first(e_tail).nullable);
        assert_eq!(sets.first(t_tail).terminals, set(&["*"]));
        assert!(sets.first(t_tail).nullable);
    }

    #[test]
    fn test_follow_sets() {
        let (g, sets) = expr();
        let follow = |name| sets.follow(g.lookup(name).unwrap()).clone();

        assert_eq!(follow("E"), set(&[")", END_MARKER]));
        assert_eq!(follow("E'"), set(&[")", END_MARKER]));
        assert_eq!(follow("T"), set(&["+", ")", END_MARKER]));
        assert_eq!(follow("T'"), set(&["+", ")", END_MARKER]));
        assert_eq!(follow("F"), set(&["+", "*", ")", END_MARKER]));
    }

    #[test]
    fn test_predict_sets() {
        let (g, sets) = expr();
        let e_tail = g.lookup("E'").unwrap();
        let f = g.lookup("F").unwrap();

        assert_eq!(sets.predict(e_tail, 0), &set(&["+"]));
        assert_eq!(sets.predict(e_tail, 1), &set(&[")", END_MARKER]));
        assert_eq!(sets.predict(f, 0), &set(&["("]));
        assert_eq!(sets.predict(f, 1), &set(&["id"]));
        assert_eq!(sets.expected(e_tail), set(&["+", ")", END_MARKER]));
        assert!(sets.conflicts().is_empty());
    }

    #[test]
    fn test_nullable_chain() {
        const CHAIN: GrammarTable = &[
            ("S", &[&["A", "B", "c"]]),
            ("A", &[&["a"], &[]]),
            ("B", &[&["b"], &[]]),
        ];
        let g = Grammar::from_table("S", CHAIN).unwrap();
        let sets = ParseSets::compute(&g);
        let s = g.lookup("S").unwrap();
        let a = g.lookup("A").unwrap();

        assert_eq!(sets.first(s).terminals, set(&["a", "b", "c"]));
        assert!(!sets.first(s).nullable);
        assert_eq!(sets.follow(a), &set(&["b", "c"]));
        assert_eq!(sets.predict(a, 1), &set(&["b", "c"]));
    }

    #[test]
    fn test_left_recursion_terminates() {
        const LEFT: GrammarTable = &[("L", &[&["L", "x"], &["y"]])];
        let g = Grammar::from_table("L", LEFT).unwrap();
        let sets = ParseSets::compute(&g);
        let l = g.lookup("L").unwrap();

        assert_eq!(sets.first(l).terminals, set(&["y"]));
        assert_eq!(sets.follow(l), &set(&["x", END_MARKER]));
        let conflicts = sets.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].terminals, set(&["y"]));
    }

    #[test]
    fn test_conflict_between_shared_prefixes() {
        const SHARED: GrammarTable = &[("S", &[&["a", "b"], &["a", "c"], &["d"]])];
        let g = Grammar::from_table("S", SHARED).unwrap();
        let conflicts = ParseSets::compute(&g).conflicts();
        assert_eq!(
            conflicts,
            vec![Conflict {
                nonterminal: g.lookup("S").unwrap(),
                first: 0,
                second: 1,
                terminals: set(&["a"]),
            }]
        );
    }

    #[test]
    fn test_first_of_sequence() {
        let (g, sets) = expr();
        let seq = [
            Symbol::NonTerminal(g.lookup("T'").unwrap()),
            Symbol::NonTerminal(g.lookup("E'").unwrap()),
        ];
        let first = sets.first_of(&seq);
        assert_eq!(first.terminals, set(&["*", "+"]));
        assert!(first.nullable);
        assert!(sets.first_of(&[]).nullable);
    }

    #[test]
    fn test_recomputation_is_identical() {
        let (g, sets) = expr();
        assert_eq!(ParseSets::compute(&g), sets);
    }
}
