//! Argument values consumed by placeholder markers.
//!
//! Every `?` marker in an interpolated expression consumes one [`Arg`]. The
//! three kinds differ in what they contribute to the token stream: a bound
//! [`Param`] emits a marker and binds a value, a [`Literal`] inlines raw SQL
//! text and binds nothing, and a nested [`Statement`] splices its whole
//! token/argument stream in place, parenthesized.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tokio_postgres::types::ToSql;

use crate::statement::Statement;

/// A clone-friendly bound parameter.
///
/// Wrapping the value in an `Arc` keeps builders cheap to clone: fanning
/// several statements out from one shared base copies the argument list
/// without copying the values themselves.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any driver-bindable value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the inner value as the trait object drivers accept.
    pub fn as_dyn(&self) -> &(dyn ToSql + Sync) {
        // Arc<dyn ToSql + Send + Sync> -> &(dyn ToSql + Sync)
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Raw SQL text inlined verbatim, bypassing parameter binding.
///
/// The only sanctioned way to put caller-trusted raw SQL (`now()`, `NULL`,
/// a cast, ...) inside an otherwise parameterized expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal(Cow<'static, str>);

/// The SQL `NULL` literal.
pub const NULL: Literal = Literal(Cow::Borrowed("NULL"));

impl Literal {
    /// Wrap pre-formatted SQL text.
    pub fn new(text: impl Into<String>) -> Self {
        Literal(Cow::Owned(text.into()))
    }

    /// Wrap a static SQL fragment without allocating.
    pub const fn from_static(text: &'static str) -> Self {
        Literal(Cow::Borrowed(text))
    }

    /// Quote `name` as a SQL identifier, doubling embedded quotes.
    pub fn quoted(name: &str) -> Self {
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push('"');
        for ch in name.chars() {
            if ch == '"' {
                quoted.push('"');
            }
            quoted.push(ch);
        }
        quoted.push('"');
        Literal(Cow::Owned(quoted))
    }

    /// The wrapped SQL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One positional argument, consumed by one `?` marker.
#[derive(Clone, Debug)]
pub enum Arg {
    /// Bound parameter: one placeholder marker, one bound argument.
    Value(Param),
    /// Pre-formatted SQL inlined as raw text; binds nothing.
    Literal(Literal),
    /// An already-built statement spliced in place, wrapped in parentheses.
    Statement(Statement),
}

/// Bind `value` as a parameter.
pub fn bind<T: ToSql + Send + Sync + 'static>(value: T) -> Arg {
    Arg::Value(Param::new(value))
}

/// Inline `text` verbatim instead of binding it.
pub fn lit(text: impl Into<String>) -> Arg {
    Arg::Literal(Literal::new(text))
}

/// Splice `statement` in place as a parenthesized sub-statement.
pub fn nested(statement: Statement) -> Arg {
    Arg::Statement(statement)
}

impl From<Param> for Arg {
    fn from(param: Param) -> Self {
        Arg::Value(param)
    }
}

impl From<Literal> for Arg {
    fn from(literal: Literal) -> Self {
        Arg::Literal(literal)
    }
}

impl From<Statement> for Arg {
    fn from(statement: Statement) -> Self {
        Arg::Statement(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_debug_shows_value() {
        assert_eq!(format!("{:?}", Param::new(42i32)), "42");
        assert_eq!(format!("{:?}", Param::new("alice")), "\"alice\"");
    }

    #[test]
    fn test_null_literal() {
        assert_eq!(NULL.as_str(), "NULL");
        assert_eq!(NULL.to_string(), "NULL");
    }

    #[test]
    fn test_quoted_identifier() {
        assert_eq!(Literal::quoted("users").as_str(), "\"users\"");
        assert_eq!(Literal::quoted("we\"ird").as_str(), "\"we\"\"ird\"");
    }
}
