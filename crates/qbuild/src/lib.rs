//! # qbuild
//!
//! A fluent, copy-on-write SQL statement builder.
//!
//! `qbuild` assembles SQL text and a positionally-aligned list of bind
//! arguments through method chaining, then hands the `(text, arguments)`
//! pair to a database driver. It executes nothing itself.
//!
//! ## Features
//!
//! - **Values, not buffers**: every builder call consumes the receiver and
//!   returns a new statement; clone a base statement to fan out independent
//!   variants that never observe each other
//! - **Parameters stay parameters**: `?` markers in expressions bind
//!   arguments positionally; raw SQL only gets inlined through an explicit
//!   [`Literal`]
//! - **Clause-aware chaining**: repeated calls of the same clause continue
//!   it (`,` for column lists, `AND` for `WHERE`) instead of repeating the
//!   keyword
//! - **Dialects at render time**: generic `?` markers are rewritten to
//!   `$n`, `:n`, or `@pn` when the statement is first rendered, and the
//!   result is cached
//!
//! ## Usage
//!
//! ```ignore
//! use qbuild::{and, bind, select, Dialect};
//!
//! let q = select(&["id", "name"])
//!     .from("members")
//!     .where_(and("status = ?", [bind("active")]).and("age >= ?", [bind(18i32)]))
//!     .order_by(&["created_at DESC"])
//!     .limit(20)
//!     .dialect(Dialect::Postgres);
//!
//! let (sql, args) = q.build();
//! // sql  = "SELECT id , name FROM members WHERE status = $1 AND age >= $2
//! //         ORDER BY created_at DESC LIMIT 20"
//! // args = [&"active", &18]
//! client.query(sql, &args).await?;
//! ```

pub mod arg;
pub mod dialect;
pub mod error;
pub mod predicate;
pub mod statement;

pub(crate) mod writer;

pub use arg::{bind, lit, nested, Arg, Literal, Param, NULL};
pub use dialect::Dialect;
pub use error::{BuildError, BuildResult};
pub use predicate::{and, or, Predicate};
pub use statement::{
    delete_from, dialect, insert_into, multiple, select, select_expr, update, with, Statement,
};
