//! Structured WHERE-clause construction for filter composition.
//!
//! Filters compose dynamically (namespace sets, tag overlap, search, severity
//! scoping), so the number of SQL placeholders varies per request. The
//! builder keeps each clause fragment paired with its parameters, making
//! placeholder-index drift impossible by construction: fragments and values
//! are appended together and rendered together.

use rusqlite::ToSql;

use crate::types::ServiceKey;

/// Render `n` positional placeholders: `?, ?, ?`.
pub(crate) fn placeholders(n: usize) -> String {
    let mut out = String::with_capacity(n.saturating_mul(3));
    for i in 0..n {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('?');
    }
    out
}

/// Accumulates WHERE-clause fragments and their bound parameters in lockstep.
///
/// Fragments added to one builder are combined with `AND`; [`Self::any`]
/// merges a sub-builder's fragments as a parenthesized `OR` group.
pub(crate) struct QueryBuilder {
    clauses: Vec<String>,
    params: Vec<Box<dyn ToSql>>,
}

impl QueryBuilder {
    /// Create an empty builder (matches everything).
    pub(crate) fn new() -> Self {
        Self {
            clauses: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Returns `true` if no clause has been added.
    pub(crate) fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Add a clause fragment with its parameters.
    ///
    /// The fragment must contain exactly as many `?` placeholders as there
    /// are parameters; clause and values travel together so indexes cannot
    /// drift.
    pub(crate) fn clause(&mut self, sql: impl Into<String>, params: Vec<Box<dyn ToSql>>) {
        self.clauses.push(sql.into());
        self.params.extend(params);
    }

    /// Add a `column IN (...)` clause over string values.
    ///
    /// An empty value set yields a clause that matches nothing, keeping the
    /// composed predicate deterministic.
    pub(crate) fn in_list<I, S>(&mut self, column: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Box<dyn ToSql>> = values
            .into_iter()
            .map(|v| Box::new(v.into()) as Box<dyn ToSql>)
            .collect();
        if values.is_empty() {
            self.clauses.push("1 = 0".to_string());
            return;
        }
        let sql = format!("{column} IN ({})", placeholders(values.len()));
        self.clause(sql, values);
    }

    /// Add a row-value membership clause over service keys:
    /// `(ns_col, name_col) IN (VALUES (?, ?), ...)`.
    ///
    /// An empty key set yields a clause that matches nothing.
    pub(crate) fn key_list(&mut self, ns_col: &str, name_col: &str, keys: &[ServiceKey]) {
        if keys.is_empty() {
            self.clauses.push("1 = 0".to_string());
            return;
        }
        let rows: Vec<String> = keys.iter().map(|_| "(?, ?)".to_string()).collect();
        let sql = format!("({ns_col}, {name_col}) IN (VALUES {})", rows.join(", "));
        let params: Vec<Box<dyn ToSql>> = keys
            .iter()
            .flat_map(|k| {
                [
                    Box::new(k.namespace.clone()) as Box<dyn ToSql>,
                    Box::new(k.name.clone()) as Box<dyn ToSql>,
                ]
            })
            .collect();
        self.clause(sql, params);
    }

    /// Merge another builder's clauses as a single parenthesized `OR` group.
    ///
    /// An empty sub-builder is a no-op.
    pub(crate) fn any(&mut self, branches: QueryBuilder) {
        if branches.clauses.is_empty() {
            return;
        }
        self.clauses
            .push(format!("({})", branches.clauses.join(" OR ")));
        self.params.extend(branches.params);
    }

    /// Render the composed predicate as a ` WHERE ...` suffix.
    ///
    /// Returns an empty string when no clause was added.
    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Iterate bound parameters in clause order, for
    /// `rusqlite::params_from_iter`.
    pub(crate) fn params(&self) -> impl Iterator<Item = &dyn ToSql> {
        self.params.iter().map(AsRef::as_ref)
    }

    /// Number of bound parameters.
    #[cfg(test)]
    pub(crate) fn param_count(&self) -> usize {
        self.params.len()
    }
}
