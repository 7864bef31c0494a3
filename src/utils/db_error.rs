//! Classification of database errors.

/// Returns `true` if `e` is a unique constraint violation.
///
/// Both `fullurl` and `shortenurl` are unique; either one counts.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
