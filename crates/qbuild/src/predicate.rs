//! Boolean predicate composition.

use std::fmt;

use crate::arg::Arg;
use crate::dialect::Dialect;
use crate::writer::SqlWriter;

/// A boolean expression built from `AND`/`OR` clauses.
///
/// Predicates are values: every method consumes the receiver and returns the
/// extended predicate, so a shared base can be cloned and extended along
/// independent chains. An empty predicate contributes nothing when embedded
/// in a statement or in another predicate — predicates are routinely built
/// conditionally, and composing an empty one must never leak a dangling
/// conjunction or `WHERE`.
#[derive(Clone, Debug, Default)]
pub struct Predicate {
    writer: SqlWriter,
    count: usize,
}

/// Start a predicate with one interpolated clause.
pub fn and<A>(expr: &str, args: A) -> Predicate
where
    A: IntoIterator<Item = Arg>,
{
    Predicate::new().and(expr, args)
}

/// Start a predicate with one interpolated clause.
///
/// Identical to [`and`] on an empty predicate; reads better when the chain
/// continues with `or`.
pub fn or<A>(expr: &str, args: A) -> Predicate
where
    A: IntoIterator<Item = Arg>,
{
    Predicate::new().or(expr, args)
}

impl Predicate {
    /// Create an empty predicate.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no clause has been added yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append an interpolated clause, joined with `AND` after the first.
    pub fn and<A>(mut self, expr: &str, args: A) -> Self
    where
        A: IntoIterator<Item = Arg>,
    {
        self.clause("AND");
        self.writer.write_expr(expr, args);
        self
    }

    /// Append an interpolated clause, joined with `OR` after the first.
    pub fn or<A>(mut self, expr: &str, args: A) -> Self
    where
        A: IntoIterator<Item = Arg>,
    {
        self.clause("OR");
        self.writer.write_expr(expr, args);
        self
    }

    /// Append `other` parenthesized, joined with `AND` after the first
    /// clause. No-op if `other` is empty.
    pub fn and_group(self, other: Predicate) -> Self {
        self.group("AND", other)
    }

    /// Append `other` parenthesized, joined with `OR` after the first
    /// clause. No-op if `other` is empty.
    pub fn or_group(self, other: Predicate) -> Self {
        self.group("OR", other)
    }

    fn clause(&mut self, conjunction: &'static str) {
        if self.count > 0 {
            self.writer.write_sql(conjunction);
        }
        self.count += 1;
    }

    fn group(mut self, conjunction: &'static str, other: Predicate) -> Self {
        if other.is_empty() {
            return self;
        }
        self.clause(conjunction);
        self.writer.write_sql("(");
        self.writer.append(other.writer);
        self.writer.write_sql(")");
        self
    }

    /// Render with generic `?` markers. Debugging and test surface; a
    /// predicate is normally consumed by a statement clause instead.
    pub fn to_sql(&self) -> String {
        self.writer.render(Dialect::Generic)
    }

    pub(crate) fn into_writer(self) -> SqlWriter {
        self.writer
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::bind;

    #[test]
    fn test_single_clause_has_no_conjunction() {
        let p = and("x = 1", []);
        assert_eq!(p.to_sql(), "x = 1");
        assert!(!p.is_empty());
    }

    #[test]
    fn test_and_chaining() {
        let p = and("x = 1", []).and("y = ?", [bind(2i32)]);
        assert_eq!(p.to_sql(), "x = 1 AND y = ?");
    }

    #[test]
    fn test_or_opens_without_keyword() {
        let p = or("x = ?", [bind(1i32)]).or("y = ?", [bind(2i32)]);
        assert_eq!(p.to_sql(), "x = ? OR y = ?");
    }

    #[test]
    fn test_nested_group_is_parenthesized() {
        let p = and("x = ?", [bind(1i32)])
            .and_group(and("y = ?", [bind(2i32)]).or("z = ?", [bind(3i32)]));
        assert_eq!(p.to_sql(), "x = ? AND ( y = ? OR z = ? )");
    }

    #[test]
    fn test_empty_group_is_a_no_op() {
        let base = and("x = 1", []);
        let extended = base.clone().and_group(Predicate::new()).or_group(Predicate::new());
        assert_eq!(extended.to_sql(), base.to_sql());
        assert_eq!(extended.count, base.count);
    }

    #[test]
    fn test_group_opening_a_predicate() {
        let p = Predicate::new().and_group(and("a = 1", []).and("b = 2", []));
        assert_eq!(p.to_sql(), "( a = 1 AND b = 2 )");
    }

    #[test]
    fn test_empty_predicate() {
        let p = Predicate::new();
        assert!(p.is_empty());
        assert_eq!(p.to_sql(), "");
    }
}
