//! The append-only transaction store.
//!
//! Transactions are only ever inserted and read back; there are no updates or
//! deletes.

use rusqlite::{Connection, Row};
use time::Date;

use crate::Error;

use super::core::{Transaction, TransactionDate};

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id TEXT,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date TEXT
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_id ON \"transaction\"(user_id)",
        (),
    )?;

    Ok(())
}

/// Append `transactions` to the store in a single database transaction.
///
/// Each transaction is stored under its own `user_id` unless `user_id` is
/// given, in which case that owner is used for every row.
///
/// # Errors
/// Returns [Error::SqlError] if any insert fails, in which case nothing is stored.
pub fn append_transactions(
    transactions: &[Transaction],
    user_id: Option<&str>,
    connection: &Connection,
) -> Result<usize, Error> {
    let db_transaction = connection.unchecked_transaction()?;

    {
        let mut stmt = db_transaction.prepare(
            "INSERT INTO \"transaction\" (user_id, name, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for transaction in transactions {
            stmt.execute((
                user_id.or(transaction.user_id.as_deref()),
                &transaction.name,
                transaction.amount,
                &transaction.category,
                transaction.date.date(),
            ))?;
        }
    }

    db_transaction.commit()?;
    tracing::debug!("appended {} transactions", transactions.len());

    Ok(transactions.len())
}

/// Get stored transactions in the order they were appended.
///
/// When `user_id` is given only that user's transactions are returned.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails.
pub fn get_transactions(
    user_id: Option<&str>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut stmt = connection.prepare(
        "SELECT user_id, name, amount, category, date
         FROM \"transaction\"
         WHERE ?1 IS NULL OR user_id = ?1
         ORDER BY id ASC",
    )?;

    stmt.query_map([user_id], map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let date: Option<Date> = row.get(4)?;

    Ok(Transaction {
        user_id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date: date.map_or(TransactionDate::Unknown, TransactionDate::Known),
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{Transaction, TransactionDate},
    };

    use super::{append_transactions, get_transactions};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn appended_transactions_round_trip_in_order() {
        let conn = get_test_connection();
        let transactions = vec![
            Transaction::build(12.5, date!(2024 - 01 - 02), "Lunch").category("Food and Drink"),
            Transaction::build(-900.0, TransactionDate::Unknown, "Salary"),
        ];

        let count = append_transactions(&transactions, None, &conn).unwrap();
        let got = get_transactions(None, &conn).unwrap();

        assert_eq!(count, 2);
        assert_eq!(got, transactions);
    }

    #[test]
    fn appending_again_keeps_earlier_rows() {
        let conn = get_test_connection();
        let first = Transaction::build(1.0, date!(2024 - 01 - 01), "first");
        let second = Transaction::build(2.0, date!(2024 - 01 - 01), "second");

        append_transactions(std::slice::from_ref(&first), None, &conn).unwrap();
        append_transactions(std::slice::from_ref(&second), None, &conn).unwrap();

        assert_eq!(get_transactions(None, &conn).unwrap(), vec![first, second]);
    }

    #[test]
    fn filters_by_user() {
        let conn = get_test_connection();
        let day = date!(2024 - 01 - 01);
        append_transactions(
            &[Transaction::build(1.0, day, "mine")],
            Some("me@example.com"),
            &conn,
        )
        .unwrap();
        append_transactions(
            &[Transaction::build(2.0, day, "theirs").user_id(Some("them@example.com"))],
            None,
            &conn,
        )
        .unwrap();

        let mine = get_transactions(Some("me@example.com"), &conn).unwrap();
        let everyone = get_transactions(None, &conn).unwrap();

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "mine");
        assert_eq!(mine[0].user_id.as_deref(), Some("me@example.com"));
        assert_eq!(everyone.len(), 2);
    }

    #[test]
    fn appending_nothing_is_fine() {
        let conn = get_test_connection();

        assert_eq!(append_transactions(&[], None, &conn).unwrap(), 0);
        assert!(get_transactions(None, &conn).unwrap().is_empty());
    }
}
