//! SQL text for record store operations.
//!
//! Identifiers come only from the static schema (callers validate columns
//! first), so they are safe to interpolate; every value is bound as a
//! parameter.

use crate::error::{JournalError, Result};
use crate::storage::schema::{validate_columns, TableSchema};
use crate::storage::types::{Predicate, Row, Value};

/// SQL text plus positional parameters.
#[derive(Debug)]
pub struct Statement<'a> {
    pub sql: String,
    pub params: Vec<&'a Value>,
}

fn where_clause<'a>(table: &TableSchema, predicate: &'a Predicate) -> Result<(String, Vec<&'a Value>)> {
    match predicate {
        Predicate::All => Ok((String::new(), Vec::new())),
        Predicate::Eq { column, value } => {
            validate_columns(table, [column.as_str()])?;
            Ok((format!(" WHERE {} = ?", column), vec![value]))
        }
    }
}

pub fn insert<'a>(table: &TableSchema, row: &'a Row) -> Result<Statement<'a>> {
    validate_columns(table, row.columns())?;

    if row.is_empty() {
        return Ok(Statement {
            sql: format!("INSERT INTO \"{}\" DEFAULT VALUES", table.name),
            params: Vec::new(),
        });
    }

    let columns: Vec<&str> = row.columns().collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    Ok(Statement {
        sql: format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            table.name,
            columns.join(", "),
            placeholders
        ),
        params: row.iter().map(|(_, value)| value).collect(),
    })
}

pub fn select<'a>(table: &TableSchema, predicate: &'a Predicate) -> Result<Statement<'a>> {
    let (filter, params) = where_clause(table, predicate)?;
    let columns: Vec<&str> = table.columns.iter().map(|column| column.name).collect();
    Ok(Statement {
        sql: format!(
            "SELECT {} FROM \"{}\"{} ORDER BY _id",
            columns.join(", "),
            table.name,
            filter
        ),
        params,
    })
}

pub fn update<'a>(
    table: &TableSchema,
    row: &'a Row,
    predicate: &'a Predicate,
) -> Result<Statement<'a>> {
    validate_columns(table, row.columns())?;
    if row.is_empty() {
        return Err(JournalError::Schema(format!(
            "Update on \"{}\" requires at least one column",
            table.name
        )));
    }

    let assignments: Vec<String> = row.columns().map(|column| format!("{} = ?", column)).collect();
    let (filter, filter_params) = where_clause(table, predicate)?;
    let mut params: Vec<&Value> = row.iter().map(|(_, value)| value).collect();
    params.extend(filter_params);

    Ok(Statement {
        sql: format!(
            "UPDATE \"{}\" SET {}{}",
            table.name,
            assignments.join(", "),
            filter
        ),
        params,
    })
}

pub fn delete<'a>(table: &TableSchema, predicate: &'a Predicate) -> Result<Statement<'a>> {
    let (filter, params) = where_clause(table, predicate)?;
    Ok(Statement {
        sql: format!("DELETE FROM \"{}\"{}", table.name, filter),
        params,
    })
}
