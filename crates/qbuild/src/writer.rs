//! Token accumulation and expression interpolation.
//!
//! [`SqlWriter`] is the unit of truth for what SQL text has been produced so
//! far and which values are bound where. Statements and predicates are thin
//! state machines over one of these.

use crate::arg::{Arg, Param};
use crate::dialect::Dialect;

/// One entry of the accumulated token stream.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    /// Raw SQL text, emitted verbatim.
    Sql(String),
    /// Placeholder marker for the next bound argument in order.
    Marker,
}

/// Ordered SQL tokens plus the bound arguments aligned with their markers.
///
/// Invariant: the number of `Marker` tokens equals `args.len()`, and their
/// relative left-to-right order matches exactly. The only marker-emitting
/// operation is [`SqlWriter::write_arg`], which appends both sides.
#[derive(Clone, Debug, Default)]
pub(crate) struct SqlWriter {
    tokens: Vec<Token>,
    args: Vec<Param>,
}

impl SqlWriter {
    /// Append one raw fragment verbatim. No validation.
    pub fn write_sql(&mut self, fragment: impl Into<String>) {
        self.tokens.push(Token::Sql(fragment.into()));
    }

    /// Append one placeholder marker bound to `param`.
    pub fn write_arg(&mut self, param: Param) {
        self.tokens.push(Token::Marker);
        self.args.push(param);
    }

    /// Splice another writer's tokens and arguments onto the end,
    /// preserving relative order.
    pub fn append(&mut self, mut other: SqlWriter) {
        self.tokens.append(&mut other.tokens);
        self.args.append(&mut other.args);
    }

    /// Write one argument the way the interpolator classifies it.
    pub fn write_value(&mut self, arg: Arg) {
        match arg {
            Arg::Value(param) => self.write_arg(param),
            Arg::Literal(literal) => self.write_sql(literal.as_str()),
            Arg::Statement(statement) => {
                self.write_sql("(");
                self.append(statement.into_writer());
                self.write_sql(")");
            }
        }
    }

    /// Interpolate `expr`, substituting each `?` marker with the next
    /// argument in order.
    ///
    /// Literal spans between markers are appended whitespace-trimmed; spans
    /// that trim to nothing are skipped. Markers and arguments are matched
    /// strictly by position; a mismatched count in either direction panics.
    /// There is no escape syntax for a literal `?` — inline one through a
    /// [`crate::Literal`] argument instead.
    pub fn write_expr<A>(&mut self, expr: &str, args: A)
    where
        A: IntoIterator<Item = Arg>,
    {
        let mut args = args.into_iter();
        let mut rest = expr;
        while !rest.is_empty() {
            let Some(at) = rest.find('?') else {
                let tail = rest.trim();
                if !tail.is_empty() {
                    self.write_sql(tail);
                }
                break;
            };
            let head = rest[..at].trim();
            if !head.is_empty() {
                self.write_sql(head);
            }
            let Some(arg) = args.next() else {
                panic!("expression {expr:?} has more placeholders than arguments");
            };
            self.write_value(arg);
            rest = &rest[at + 1..];
        }
        if args.next().is_some() {
            panic!("expression {expr:?} has more arguments than placeholders");
        }
    }

    /// The bound arguments, in marker order.
    pub fn args(&self) -> &[Param] {
        &self.args
    }

    /// Join tokens with single spaces, spelling each marker per `dialect`.
    ///
    /// Pure: callable any number of times, always the same result.
    pub fn render(&self, dialect: Dialect) -> String {
        let mut cap = self.tokens.len();
        for token in &self.tokens {
            cap += match token {
                Token::Sql(s) => s.len(),
                Token::Marker => 4,
            };
        }

        let mut out = String::with_capacity(cap);
        let mut n = 0usize;
        for token in &self.tokens {
            if !out.is_empty() {
                out.push(' ');
            }
            match token {
                Token::Sql(s) => out.push_str(s),
                Token::Marker => {
                    n += 1;
                    dialect.write_placeholder(&mut out, n);
                }
            }
        }
        out
    }

    #[cfg(test)]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
