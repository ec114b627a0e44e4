//! The shipped grammar: an LL(1) subset of Python
//!
//! Terminal names are the lexer's token types. There is no NEWLINE terminal, so statements
//! follow each other directly and a block is `INDENT statement+ DEDENT`. That is why every
//! expression continuation (`(`, `.`, `[`, binary operators) must stay out of the set of
//! tokens that can start a statement, and why `return` always takes a value.
//!
//! ```text
//! if c > 50:
//!     print("big")
//! elif c == 50:
//!     total += c
//! else:
//!     items = [c, -1, f(c) ** 2]
//! ```

use once_cell::sync::Lazy;

use super::{Grammar, GrammarTable};

pub const START: &str = "program";

pub const PYTHON_SUBSET: GrammarTable = &[
    ("program", &[&["statements"]]),
    ("statements", &[&["statement", "statements"], &[]]),
    (
        "statement",
        &[
            &["id_stmt"],
            &["if_stmt"],
            &["while_stmt"],
            &["for_stmt"],
            &["def_stmt"],
            &["return_stmt"],
            &["print_stmt"],
            &["pass"],
            &["break"],
            &["continue"],
        ],
    ),
    // assignment, augmented assignment, or a bare call/attribute chain
    ("id_stmt", &[&["id", "trailers", "assign_tail"]]),
    ("assign_tail", &[&["assign_op", "expression"], &[]]),
    (
        "assign_op",
        &[
            &["tk_asign"],
            &["tk_suma_asig"],
            &["tk_resta_asig"],
            &["tk_mult_asig"],
            &["tk_div_asig"],
            &["tk_mod_asig"],
        ],
    ),
    (
        "if_stmt",
        &[&[
            "if",
            "expression",
            "tk_dos_puntos",
            "suite",
            "elif_clauses",
            "else_clause",
        ]],
    ),
    (
        "elif_clauses",
        &[
            &["elif", "expression", "tk_dos_puntos", "suite", "elif_clauses"],
            &[],
        ],
    ),
    ("else_clause", &[&["else", "tk_dos_puntos", "suite"], &[]]),
    (
        "while_stmt",
        &[&["while", "expression", "tk_dos_puntos", "suite"]],
    ),
    (
        "for_stmt",
        &[&[
            "for",
            "id",
            "in",
            "range",
            "tk_par_izq",
            "expression",
            "more_args",
            "tk_par_der",
            "tk_dos_puntos",
            "suite",
        ]],
    ),
    (
        "def_stmt",
        &[&[
            "def",
            "id",
            "tk_par_izq",
            "params",
            "tk_par_der",
            "tk_dos_puntos",
            "suite",
        ]],
    ),
    ("params", &[&["id", "more_params"], &[]]),
    ("more_params", &[&["tk_coma", "id", "more_params"], &[]]),
    ("return_stmt", &[&["return", "expression"]]),
    (
        "print_stmt",
        &[&["print", "tk_par_izq", "arguments", "tk_par_der"]],
    ),
    ("suite", &[&["INDENT", "statement", "statements", "DEDENT"]]),
    // call, attribute and subscript chains
    ("trailers", &[&["trailer", "trailers"], &[]]),
    (
        "trailer",
        &[
            &["tk_par_izq", "arguments", "tk_par_der"],
            &["tk_punto", "id"],
            &["tk_cor_izq", "expression", "tk_cor_der"],
        ],
    ),
    ("arguments", &[&["expression", "more_args"], &[]]),
    ("more_args", &[&["tk_coma", "expression", "more_args"], &[]]),
    // expressions, loosest binding first
    ("expression", &[&["conjunction", "disjunction_tail"]]),
    (
        "disjunction_tail",
        &[&["or", "conjunction", "disjunction_tail"], &[]],
    ),
    ("conjunction", &[&["negation", "conjunction_tail"]]),
    (
        "conjunction_tail",
        &[&["and", "negation", "conjunction_tail"], &[]],
    ),
    ("negation", &[&["not", "negation"], &["comparison"]]),
    ("comparison", &[&["arith", "comparison_tail"]]),
    ("comparison_tail", &[&["comp_op", "arith"], &[]]),
    (
        "comp_op",
        &[
            &["tk_igual"],
            &["tk_dif"],
            &["tk_menor"],
            &["tk_mayor"],
            &["tk_menor_igual"],
            &["tk_mayor_igual"],
        ],
    ),
    ("arith", &[&["term", "arith_tail"]]),
    (
        "arith_tail",
        &[
            &["tk_suma", "term", "arith_tail"],
            &["tk_resta", "term", "arith_tail"],
            &[],
        ],
    ),
    ("term", &[&["factor", "term_tail"]]),
    (
        "term_tail",
        &[
            &["tk_mult", "factor", "term_tail"],
            &["tk_div", "factor", "term_tail"],
            &["tk_div_entera", "factor", "term_tail"],
            &["tk_mod", "factor", "term_tail"],
            &[],
        ],
    ),
    (
        "factor",
        &[&["tk_resta", "factor"], &["tk_suma", "factor"], &["power"]],
    ),
    ("power", &[&["primary", "power_tail"]]),
    ("power_tail", &[&["tk_pot", "factor"], &[]]),
    ("primary", &[&["atom", "trailers"]]),
    (
        "atom",
        &[
            &["id"],
            &["tk_entero"],
            &["tk_cadena"],
            &["True"],
            &["False"],
            &["None"],
            &["tk_par_izq", "expression", "tk_par_der"],
            &["tk_cor_izq", "arguments", "tk_cor_der"],
        ],
    ),
];

static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    Grammar::from_table(START, PYTHON_SUBSET).expect("shipped grammar table is well-formed")
});

/// The shipped grammar, resolved once and shared read-only.
pub fn python_subset() -> &'static Grammar {
    &GRAMMAR
}
