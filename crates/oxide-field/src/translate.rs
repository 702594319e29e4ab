//! Reference translation of predicate structure into a WHERE fragment.
//!
//! This is a consumer of [`Predicate::describe`](crate::Predicate::describe)
//! only; it never evaluates anything. Fields map to their bare column name
//! and every bound value becomes a `?` parameter.

use crate::operator::Operator;
use crate::predicate::Expression;
use crate::value::SqlValue;

/// Builds the SQL WHERE clause and parameters for an expression.
///
/// # Example
///
/// ```
/// use oxide_field::{translate, FieldIdentifier, FieldMetadata, Predicate, SqlValue};
///
/// struct User { id: i64, deleted: bool }
///
/// let id = FieldMetadata::required(FieldIdentifier::new("users", "id").unwrap(), |u: &User| u.id);
/// let deleted = FieldMetadata::required(
///     FieldIdentifier::new("users", "deleted").unwrap(),
///     |u: &User| u.deleted,
/// );
///
/// let filter: Predicate<User> = id.greater_than(18).and(deleted.equal(true).not());
/// let (sql, params) = translate::to_where_clause(&filter.describe());
/// assert_eq!(sql, "(id > ?) AND (NOT (deleted = ?))");
/// assert_eq!(params, vec![SqlValue::Int(18), SqlValue::Bool(true)]);
/// ```
#[must_use]
pub fn to_where_clause(expr: &Expression) -> (String, Vec<SqlValue>) {
    match expr {
        Expression::Condition {
            field,
            operator: operator @ (Operator::IsNull | Operator::IsNotNull),
            ..
        } => (format!("{} {operator}", field.column()), vec![]),
        Expression::Condition {
            field,
            operator,
            value,
        } => (
            format!("{} {operator} {}", field.column(), SqlValue::placeholder()),
            vec![value.clone().unwrap_or(SqlValue::Null)],
        ),
        Expression::Logical {
            operator: Operator::Not,
            operands,
        } => {
            let (inner_sql, params) = join(operands, " AND ", "TRUE");
            (format!("NOT ({inner_sql})"), params)
        }
        Expression::Logical {
            operator: Operator::Or,
            operands,
        } => join(operands, " OR ", "FALSE"),
        Expression::Logical { operands, .. } => join(operands, " AND ", "TRUE"),
    }
}

fn join(operands: &[Expression], separator: &str, empty: &str) -> (String, Vec<SqlValue>) {
    match operands {
        [] => (empty.to_string(), vec![]),
        [single] => to_where_clause(single),
        _ => {
            let mut params = Vec::new();
            let parts: Vec<String> = operands
                .iter()
                .map(|operand| {
                    let (sql, operand_params) = to_where_clause(operand);
                    params.extend(operand_params);
                    format!("({sql})")
                })
                .collect();
            (parts.join(separator), params)
        }
    }
}
