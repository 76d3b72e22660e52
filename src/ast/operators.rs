use std::fmt;

/// Comparison operators usable in a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Equality
    /// Strict equality (`===`)
    StrictEq,
    /// Loose equality (`==`), substring containment for strings
    LooseEq,
    /// Strict difference (`!==`)
    StrictDiff,
    /// Loose difference (`!=`)
    LooseDiff,

    // Ordering
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Lte,

    // Text
    /// Case-insensitive substring (`:`)
    Contains,
    /// Negated case-insensitive substring (`!:`)
    NotContains,
    /// Case-insensitive regular expression (`::`)
    Like,
    /// Negated case-insensitive regular expression (`!::`)
    NotLike,
}

/// How an operator folds over the elements of an array candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// Every element must satisfy the comparison.
    Universal,
    /// At least one element must satisfy the comparison.
    Existential,
}

impl Operation {
    /// Every operator, longest symbols first.
    pub const ALL: [Operation; 12] = [
        Operation::StrictEq,
        Operation::StrictDiff,
        Operation::NotLike,
        Operation::LooseEq,
        Operation::LooseDiff,
        Operation::Gte,
        Operation::Lte,
        Operation::NotContains,
        Operation::Like,
        Operation::Gt,
        Operation::Lt,
        Operation::Contains,
    ];

    /// Looks up an operator by its exact symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::StrictEq => "===",
            Operation::LooseEq => "==",
            Operation::StrictDiff => "!==",
            Operation::LooseDiff => "!=",
            Operation::Gt => ">",
            Operation::Gte => ">=",
            Operation::Lt => "<",
            Operation::Lte => "<=",
            Operation::Contains => ":",
            Operation::NotContains => "!:",
            Operation::Like => "::",
            Operation::NotLike => "!::",
        }
    }

    /// Array fold direction.
    ///
    /// The strict operators and the negated text operators demand every
    /// element; everything else is satisfied by a single element.
    pub fn fold(self) -> Fold {
        match self {
            Operation::StrictEq
            | Operation::StrictDiff
            | Operation::NotContains
            | Operation::NotLike => Fold::Universal,
            Operation::LooseEq
            | Operation::LooseDiff
            | Operation::Gt
            | Operation::Gte
            | Operation::Lt
            | Operation::Lte
            | Operation::Contains
            | Operation::Like => Fold::Existential,
        }
    }

    /// Characters that may appear in an operator symbol.
    pub fn is_symbol_char(ch: char) -> bool {
        matches!(ch, '=' | '!' | '<' | '>' | ':')
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
