//! Bind-parameter dialects.
//!
//! A [`Dialect`] only changes how placeholder markers are spelled in the
//! rendered text; it never reorders the bound arguments.

use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;

/// Bind-parameter text convention, applied at final render.
///
/// Attach one to a statement at any point in its construction; it commutes
/// with every clause call and only affects the rendered text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// Keep the generic `?` markers untouched.
    #[default]
    Generic,
    /// `$1, $2, ...`
    Postgres,
    /// `:1, :2, ...`
    Oracle,
    /// `@p1, @p2, ...`
    SqlServer,
}

impl Dialect {
    /// Spell the `n`-th placeholder (1-based, counted in textual order).
    pub(crate) fn write_placeholder(self, out: &mut String, n: usize) {
        match self {
            Dialect::Generic => out.push('?'),
            Dialect::Postgres => {
                out.push('$');
                out.push_str(&n.to_string());
            }
            Dialect::Oracle => {
                out.push(':');
                out.push_str(&n.to_string());
            }
            Dialect::SqlServer => {
                out.push_str("@p");
                out.push_str(&n.to_string());
            }
        }
    }

    /// The canonical configuration name of this dialect.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::Postgres => "postgres",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
        }
    }
}

impl FromStr for Dialect {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "default" => Ok(Dialect::Generic),
            "postgres" | "postgresql" | "pq" => Ok(Dialect::Postgres),
            "oracle" => Ok(Dialect::Oracle),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            _ => Err(BuildError::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_spelling() {
        let mut out = String::new();
        Dialect::Generic.write_placeholder(&mut out, 1);
        Dialect::Postgres.write_placeholder(&mut out, 2);
        Dialect::Oracle.write_placeholder(&mut out, 3);
        Dialect::SqlServer.write_placeholder(&mut out, 12);
        assert_eq!(out, "?$2:3@p12");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("pq".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("MSSQL".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("default".parse::<Dialect>().unwrap(), Dialect::Generic);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "sybase".parse::<Dialect>().unwrap_err();
        assert_eq!(err.to_string(), "unknown dialect: sybase");
    }

    #[test]
    fn test_display_round_trip() {
        for dialect in [
            Dialect::Generic,
            Dialect::Postgres,
            Dialect::Oracle,
            Dialect::SqlServer,
        ] {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }
}
