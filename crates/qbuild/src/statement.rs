//! Statement assembly: the clause-sequencing state machine.
//!
//! Each clause method looks at the kind of the immediately preceding clause
//! to decide between emitting its leading keyword and a continuation
//! separator, so fluent repeated calls accumulate naturally
//! (`.select(..).select(..)` extends one column list, `.where_(..)` twice
//! conjoins with `AND`).

use std::fmt;
use std::sync::OnceLock;

use tokio_postgres::types::ToSql;

use crate::arg::Arg;
use crate::dialect::Dialect;
use crate::predicate::Predicate;
use crate::writer::SqlWriter;

/// Category of the most recently appended clause.
///
/// Compared by exact equality, never by string. `None` is the state of a
/// statement with no clauses yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Clause {
    #[default]
    None,
    With,
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
    InsertInto,
    Values,
    DefaultValues,
    Update,
    Set,
    DeleteFrom,
    Using,
    Returning,
    Combining,
}

/// A SQL statement under construction.
///
/// Every clause method consumes the receiver and returns the extended
/// statement; clone a base statement to fan out independent variants (the
/// token and argument buffers are copied, so chains never observe each
/// other). The rendered text is computed once on first access and cached.
#[derive(Clone, Debug, Default)]
pub struct Statement {
    writer: SqlWriter,
    last: Clause,
    dialect: Dialect,
    rendered: OnceLock<String>,
}

/// Start a statement with a `SELECT` column list.
pub fn select(columns: &[&str]) -> Statement {
    Statement::new().select(columns)
}

/// Start a statement with one interpolated `SELECT` expression.
pub fn select_expr<A>(expr: &str, args: A) -> Statement
where
    A: IntoIterator<Item = Arg>,
{
    Statement::new().select_expr(expr, args)
}

/// Start a statement with a CTE.
pub fn with(name: &str, statement: Statement) -> Statement {
    Statement::new().with(name, statement)
}

/// Start an `INSERT INTO` statement.
pub fn insert_into(table: &str, columns: &[&str]) -> Statement {
    Statement::new().insert_into(table, columns)
}

/// Start an `UPDATE` statement.
pub fn update(table: &str) -> Statement {
    Statement::new().update(table)
}

/// Start a `DELETE FROM` statement.
pub fn delete_from(table: &str) -> Statement {
    Statement::new().delete_from(table)
}

/// Start an empty statement rendered under `dialect`.
pub fn dialect(dialect: Dialect) -> Statement {
    Statement::new().dialect(dialect)
}

/// Concatenate whole statements, `;`-separated and `;`-terminated.
///
/// Arguments concatenate across the parts in textual order. The combined
/// statement starts with the default dialect; attach one with
/// [`Statement::dialect`].
pub fn multiple<I>(statements: I) -> Statement
where
    I: IntoIterator<Item = Statement>,
{
    let mut writer = SqlWriter::default();
    for statement in statements {
        writer.append(statement.into_writer());
        writer.write_sql(";");
    }
    Statement {
        writer,
        ..Statement::default()
    }
}

impl Statement {
    /// Create an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a clause: emit its keyword, or `continuation` when the
    /// immediately preceding clause has the same kind.
    fn begin(&mut self, kind: Clause, keyword: &'static str, continuation: Option<&'static str>) {
        self.rendered = OnceLock::new();
        match continuation {
            Some(separator) if self.last == kind => self.writer.write_sql(separator),
            _ => self.writer.write_sql(keyword),
        }
        self.last = kind;
    }

    fn write_columns(&mut self, columns: &[&str]) {
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                self.writer.write_sql(",");
            }
            self.writer.write_sql(*column);
        }
    }

    // ==================== WITH ====================

    /// Append `WITH name AS ( … )`; consecutive calls accumulate more CTEs
    /// under the same `WITH`.
    ///
    /// The sub-statement is spliced at token level: its markers stay markers
    /// and its arguments join the outer sequence at the splice point. Its
    /// own dialect tag is ignored; the outer statement's governs the render.
    pub fn with(mut self, name: &str, statement: Statement) -> Self {
        self.begin(Clause::With, "WITH", Some(","));
        self.writer.write_sql(name);
        self.writer.write_sql("AS");
        self.writer.write_sql("(");
        self.writer.append(statement.into_writer());
        self.writer.write_sql(")");
        self
    }

    // ==================== SELECT / FROM / JOIN ====================

    /// Append `SELECT` columns; repeated calls continue the column list.
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.begin(Clause::Select, "SELECT", Some(","));
        self.write_columns(columns);
        self
    }

    /// Append one interpolated `SELECT` expression.
    pub fn select_expr<A>(mut self, expr: &str, args: A) -> Self
    where
        A: IntoIterator<Item = Arg>,
    {
        self.begin(Clause::Select, "SELECT", Some(","));
        self.writer.write_expr(expr, args);
        self
    }

    /// Append a `FROM` clause; repeated calls continue comma-separated.
    pub fn from(mut self, expr: &str) -> Self {
        self.begin(Clause::From, "FROM", Some(","));
        self.writer.write_sql(expr);
        self
    }

    /// Append `JOIN table`.
    pub fn join(self, table: &str) -> Self {
        self.join_kind("JOIN", table)
    }

    /// Append `INNER JOIN table`.
    pub fn inner_join(self, table: &str) -> Self {
        self.join_kind("INNER JOIN", table)
    }

    /// Append `LEFT JOIN table`.
    pub fn left_join(self, table: &str) -> Self {
        self.join_kind("LEFT JOIN", table)
    }

    /// Append `RIGHT JOIN table`.
    pub fn right_join(self, table: &str) -> Self {
        self.join_kind("RIGHT JOIN", table)
    }

    /// Append `FULL JOIN table`.
    pub fn full_join(self, table: &str) -> Self {
        self.join_kind("FULL JOIN", table)
    }

    /// Append `CROSS JOIN table`.
    pub fn cross_join(self, table: &str) -> Self {
        self.join_kind("CROSS JOIN", table)
    }

    /// Append `NATURAL JOIN table`.
    pub fn natural_join(self, table: &str) -> Self {
        self.join_kind("NATURAL JOIN", table)
    }

    /// Append `NATURAL LEFT JOIN table`.
    pub fn natural_left_join(self, table: &str) -> Self {
        self.join_kind("NATURAL LEFT JOIN", table)
    }

    /// Append `NATURAL RIGHT JOIN table`.
    pub fn natural_right_join(self, table: &str) -> Self {
        self.join_kind("NATURAL RIGHT JOIN", table)
    }

    /// Append `NATURAL FULL JOIN table`.
    pub fn natural_full_join(self, table: &str) -> Self {
        self.join_kind("NATURAL FULL JOIN", table)
    }

    fn join_kind(mut self, keyword: &'static str, table: &str) -> Self {
        self.begin(Clause::Join, keyword, None);
        self.writer.write_sql(table);
        self
    }

    /// Append `JOIN table ON expr`.
    pub fn join_on<A>(self, table: &str, expr: &str, args: A) -> Self
    where
        A: IntoIterator<Item = Arg>,
    {
        self.join(table).on(expr, args)
    }

    /// Append an interpolated `ON` condition to the current join.
    pub fn on<A>(mut self, expr: &str, args: A) -> Self
    where
        A: IntoIterator<Item = Arg>,
    {
        self.rendered = OnceLock::new();
        self.writer.write_sql("ON");
        self.writer.write_expr(expr, args);
        self
    }

    /// Append `USING ( columns )` to the current join.
    pub fn using(mut self, columns: &[&str]) -> Self {
        self.begin(Clause::Using, "USING", None);
        self.writer.write_sql("(");
        self.write_columns(columns);
        self.writer.write_sql(")");
        self
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Append a `WHERE` clause. Empty predicates are a complete no-op.
    ///
    /// A second `where_` call continues with `AND`, so statements can be
    /// filtered incrementally across calls — distinct from conjunction
    /// *within* one predicate.
    pub fn where_(mut self, predicate: Predicate) -> Self {
        if predicate.is_empty() {
            return self;
        }
        self.begin(Clause::Where, "WHERE", Some("AND"));
        self.writer.append(predicate.into_writer());
        self
    }

    /// Append `GROUP BY` columns; repeated calls continue comma-separated.
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.begin(Clause::GroupBy, "GROUP BY", Some(","));
        self.write_columns(columns);
        self
    }

    /// Append a `HAVING` clause. Empty predicates are a complete no-op.
    pub fn having(mut self, predicate: Predicate) -> Self {
        if predicate.is_empty() {
            return self;
        }
        self.begin(Clause::Having, "HAVING", Some("AND"));
        self.writer.append(predicate.into_writer());
        self
    }

    // ==================== ORDER BY / LIMIT / OFFSET ====================

    /// Append `ORDER BY` expressions; repeated calls continue
    /// comma-separated.
    pub fn order_by(mut self, exprs: &[&str]) -> Self {
        self.begin(Clause::OrderBy, "ORDER BY", Some(","));
        self.write_columns(exprs);
        self
    }

    /// Append `LIMIT n` as inline decimal text.
    ///
    /// LIMIT/OFFSET are not bindable in every dialect/driver combination,
    /// and binding them would shift marker numbering, so the value is always
    /// inlined.
    pub fn limit(mut self, n: u64) -> Self {
        self.begin(Clause::Limit, "LIMIT", None);
        self.writer.write_sql(n.to_string());
        self
    }

    /// Append `OFFSET n` as inline decimal text.
    pub fn offset(mut self, n: u64) -> Self {
        self.begin(Clause::Offset, "OFFSET", None);
        self.writer.write_sql(n.to_string());
        self
    }

    // ==================== INSERT / VALUES ====================

    /// Append `INSERT INTO table ( columns )`.
    pub fn insert_into(mut self, table: &str, columns: &[&str]) -> Self {
        self.begin(Clause::InsertInto, "INSERT INTO", None);
        self.writer.write_sql(table);
        if !columns.is_empty() {
            self.writer.write_sql("(");
            self.write_columns(columns);
            self.writer.write_sql(")");
        }
        self
    }

    /// Append one `VALUES` tuple. Each element is classified exactly like an
    /// interpolated argument: bound, literal, or nested statement.
    pub fn values<A>(self, tuple: A) -> Self
    where
        A: IntoIterator<Item = Arg>,
    {
        self.value_tuples([tuple])
    }

    /// Append several `VALUES` tuples; tuples continue comma-separated
    /// across calls.
    pub fn value_tuples<T, A>(mut self, tuples: T) -> Self
    where
        T: IntoIterator<Item = A>,
        A: IntoIterator<Item = Arg>,
    {
        for tuple in tuples {
            self.begin(Clause::Values, "VALUES", Some(","));
            self.writer.write_sql("(");
            for (i, arg) in tuple.into_iter().enumerate() {
                if i > 0 {
                    self.writer.write_sql(",");
                }
                self.writer.write_value(arg);
            }
            self.writer.write_sql(")");
        }
        self
    }

    /// Append `DEFAULT VALUES`.
    pub fn default_values(mut self) -> Self {
        self.begin(Clause::DefaultValues, "DEFAULT VALUES", None);
        self
    }

    // ==================== UPDATE / DELETE / RETURNING ====================

    /// Append `UPDATE table`.
    pub fn update(mut self, table: &str) -> Self {
        self.begin(Clause::Update, "UPDATE", None);
        self.writer.write_sql(table);
        self
    }

    /// Append one interpolated `SET` assignment; repeated calls continue
    /// comma-separated.
    pub fn set<A>(mut self, expr: &str, args: A) -> Self
    where
        A: IntoIterator<Item = Arg>,
    {
        self.begin(Clause::Set, "SET", Some(","));
        self.writer.write_expr(expr, args);
        self
    }

    /// Append `DELETE FROM table`.
    pub fn delete_from(mut self, table: &str) -> Self {
        self.begin(Clause::DeleteFrom, "DELETE FROM", None);
        self.writer.write_sql(table);
        self
    }

    /// Append `RETURNING` columns; repeated calls continue comma-separated.
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.begin(Clause::Returning, "RETURNING", Some(","));
        self.write_columns(columns);
        self
    }

    // ==================== Combining ====================

    /// Append `UNION`.
    pub fn union(self) -> Self {
        self.combining("UNION")
    }

    /// Append `UNION ALL`.
    pub fn union_all(self) -> Self {
        self.combining("UNION ALL")
    }

    /// Append `INTERSECT`.
    pub fn intersect(self) -> Self {
        self.combining("INTERSECT")
    }

    /// Append `EXCEPT`.
    pub fn except(self) -> Self {
        self.combining("EXCEPT")
    }

    fn combining(mut self, keyword: &'static str) -> Self {
        self.begin(Clause::Combining, keyword, None);
        self
    }

    // ==================== Dialect / composition ====================

    /// Attach the render dialect. Commutes with every clause call; only the
    /// final render changes, never the accumulated tokens or arguments.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.rendered = OnceLock::new();
        self.dialect = dialect;
        self
    }

    /// Apply `f` inline, keeping the fluent chain for conditional clauses.
    pub fn map(self, f: impl FnOnce(Statement) -> Statement) -> Statement {
        f(self)
    }

    // ==================== Render ====================

    /// The rendered SQL text, computed on first call and cached.
    pub fn sql(&self) -> &str {
        self.rendered
            .get_or_init(|| {
                let text = self.writer.render(self.dialect);
                #[cfg(feature = "tracing")]
                tracing::debug!(sql = %text, args = self.writer.args().len(), "rendered statement");
                text
            })
            .as_str()
    }

    /// The bound arguments, in marker order, as driver-ready references.
    ///
    /// The returned vector is freshly allocated; dialect rendering never
    /// reorders it.
    pub fn args(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.writer.args().iter().map(|p| p.as_dyn()).collect()
    }

    /// The `(text, arguments)` pair handed to a database driver.
    pub fn build(&self) -> (&str, Vec<&(dyn ToSql + Sync)>) {
        (self.sql(), self.args())
    }

    pub(crate) fn into_writer(self) -> SqlWriter {
        self.writer
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}
