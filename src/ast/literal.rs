use std::{borrow::Cow, fmt};

/// Typed constant on the right-hand side of a filter clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `true` or `false`
    Bool(bool),

    /// `null`
    Null,

    /// Base-10 signed integer
    ///
    /// # Example
    /// ```text
    /// (age > 18){}
    /// ```
    Int(i64),

    /// Anything `f64` accepts that is not an integer
    ///
    /// # Example
    /// ```text
    /// (price <= 9.99){}
    /// ```
    Float(f64),

    /// Everything else, verbatim. A quoted token keeps its quotes here;
    /// [`Literal::text`] removes them.
    ///
    /// # Example
    /// ```text
    /// (name == "Leonid"){}
    /// ```
    String(String),
}

impl Literal {
    /// Types a raw token.
    ///
    /// The keywords are matched case-sensitively, then an `i64` parse is
    /// attempted, then an `f64` parse. Whatever is left is a string.
    ///
    /// ```
    /// use jsonq::Literal;
    ///
    /// assert_eq!(Literal::typed("null"), Literal::Null);
    /// assert_eq!(Literal::typed("-12"), Literal::Int(-12));
    /// assert_eq!(Literal::typed("2.5"), Literal::Float(2.5));
    /// assert_eq!(Literal::typed("True"), Literal::String("True".into()));
    /// assert_eq!(Literal::typed("\"7\""), Literal::String("\"7\"".into()));
    /// ```
    pub fn typed(token: &str) -> Self {
        match token {
            "true" => return Literal::Bool(true),
            "false" => return Literal::Bool(false),
            "null" => return Literal::Null,
            _ => {}
        }
        if let Ok(n) = token.parse::<i64>() {
            return Literal::Int(n);
        }
        if let Ok(n) = token.parse::<f64>() {
            return Literal::Float(n);
        }
        Literal::String(token.to_string())
    }

    /// Numeric view, integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(n) => Some(*n as f64),
            Literal::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Content of the literal with one layer of surrounding double quotes
    /// removed and `\x` escapes inside them resolved.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Literal::String(raw) => unquote(raw),
            other => Cow::Owned(other.to_string()),
        }
    }
}

/// Removes one layer of surrounding double quotes, resolving `\x` escapes
/// inside them. Unquoted input is returned as is.
pub(crate) fn unquote(raw: &str) -> Cow<'_, str> {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Cow::Borrowed(raw);
    };

    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    result.push(escaped);
                }
            }
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Null => f.write_str("null"),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", n),
            Literal::String(s) => f.write_str(s),
        }
    }
}
