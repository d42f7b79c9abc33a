use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use thiserror::Error;

use crate::models::{
    Category, Expense, ExpenseInput, OtpState, Profile, ProfileUpdate, User, DEFAULT_CATEGORIES,
    FALLBACK_CATEGORY,
};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("connection pool: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("migration: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub fn init_db(path: &Path) -> std::result::Result<DbPool, InitError> {
    let manager = SqliteConnectionManager::file(path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    let pool = Pool::new(manager)?;
    {
        let conn = pool.get()?;
        run_migrations(&conn)?;
        ensure_default_categories(&conn)?;
    }
    Ok(pool)
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            reg_date TEXT NOT NULL,
            otp TEXT,
            otp_created_at TEXT,
            monthly_income_cents INTEGER NOT NULL DEFAULT 0,
            currency TEXT NOT NULL DEFAULT 'INR',
            bio TEXT,
            phone_number TEXT,
            monthly_budget_cents INTEGER NOT NULL DEFAULT 0,
            savings_goal_cents INTEGER NOT NULL DEFAULT 0,
            profile_image TEXT
        );

        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            is_custom INTEGER NOT NULL DEFAULT 0,
            created_by INTEGER,
            FOREIGN KEY(created_by) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            category_id INTEGER,
            title TEXT NOT NULL,
            amount_cents INTEGER NOT NULL CHECK(amount_cents >= 0),
            expense_date TEXT NOT NULL,
            payment_mode TEXT NOT NULL
                CHECK(payment_mode IN ('CASH', 'CARD', 'UPI', 'BANK_TRANSFER', 'WALLET', 'OTHER')),
            note TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, expense_date);
        ",
    )
}

/// Makes sure the built-in categories exist. Safe to run on every start.
pub fn ensure_default_categories(conn: &Connection) -> Result<()> {
    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO categories (name, is_custom) VALUES (?1, 0)")?;
    for name in DEFAULT_CATEGORIES {
        stmt.execute(params![name])?;
    }
    Ok(())
}

pub fn email_exists(conn: &Connection, email: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
        params![email],
        |row| row.get::<_, i64>(0),
    )
    .map(|value| value == 1)
}

pub fn insert_user(
    conn: &Connection,
    full_name: &str,
    email: &str,
    password_hash: &str,
    reg_date: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (full_name, email, password_hash, reg_date) VALUES (?1, ?2, ?3, ?4)",
        params![full_name, email, password_hash, reg_date],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn user_by_id(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, full_name, email, reg_date FROM users WHERE id = ?1",
        params![user_id],
        |row| {
            Ok(User {
                id: row.get(0)?,
                full_name: row.get(1)?,
                email: row.get(2)?,
                reg_date: row.get(3)?,
            })
        },
    )
    .optional()
}

/// Returns `(user, password_hash)` for the account registered under `email`.
pub fn user_credentials(conn: &Connection, email: &str) -> Result<Option<(User, String)>> {
    conn.query_row(
        "SELECT id, full_name, email, reg_date, password_hash FROM users WHERE email = ?1",
        params![email],
        |row| {
            Ok((
                User {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    email: row.get(2)?,
                    reg_date: row.get(3)?,
                },
                row.get(4)?,
            ))
        },
    )
    .optional()
}

pub fn delete_user(conn: &Connection, user_id: i64) -> Result<bool> {
    let removed = conn.execute("DELETE FROM users WHERE id = ?1", params![user_id])?;
    Ok(removed > 0)
}

pub fn profile_by_id(conn: &Connection, user_id: i64) -> Result<Option<Profile>> {
    conn.query_row(
        "
        SELECT id, full_name, email, bio, currency, monthly_income_cents, phone_number,
               monthly_budget_cents, savings_goal_cents, profile_image
        FROM users
        WHERE id = ?1
        ",
        params![user_id],
        |row| {
            Ok(Profile {
                id: row.get(0)?,
                full_name: row.get(1)?,
                email: row.get(2)?,
                bio: row.get(3)?,
                currency: row.get(4)?,
                monthly_income_cents: row.get(5)?,
                phone_number: row.get(6)?,
                monthly_budget_cents: row.get(7)?,
                savings_goal_cents: row.get(8)?,
                profile_image: row.get(9)?,
            })
        },
    )
    .optional()
}

pub fn update_profile(conn: &Connection, user_id: i64, update: &ProfileUpdate) -> Result<()> {
    conn.execute(
        "
        UPDATE users
        SET full_name = COALESCE(?2, full_name),
            email = COALESCE(?3, email),
            bio = COALESCE(?4, bio),
            currency = COALESCE(?5, currency),
            monthly_income_cents = COALESCE(?6, monthly_income_cents),
            phone_number = COALESCE(?7, phone_number),
            monthly_budget_cents = COALESCE(?8, monthly_budget_cents),
            savings_goal_cents = COALESCE(?9, savings_goal_cents)
        WHERE id = ?1
        ",
        params![
            user_id,
            update.full_name,
            update.email,
            update.bio,
            update.currency,
            update.monthly_income_cents,
            update.phone_number,
            update.monthly_budget_cents,
            update.savings_goal_cents
        ],
    )?;
    Ok(())
}

pub fn set_profile_image(conn: &Connection, user_id: i64, file_name: &str) -> Result<()> {
    conn.execute(
        "UPDATE users SET profile_image = ?2 WHERE id = ?1",
        params![user_id, file_name],
    )?;
    Ok(())
}

pub fn store_otp(conn: &Connection, user_id: i64, otp: &str, created_at: DateTime<Utc>) -> Result<()> {
    conn.execute(
        "UPDATE users SET otp = ?2, otp_created_at = ?3 WHERE id = ?1",
        params![user_id, otp, created_at],
    )?;
    Ok(())
}

pub fn otp_state(conn: &Connection, email: &str) -> Result<Option<OtpState>> {
    conn.query_row(
        "SELECT id, otp, otp_created_at FROM users WHERE email = ?1",
        params![email],
        |row| {
            Ok(OtpState {
                user_id: row.get(0)?,
                otp: row.get(1)?,
                otp_created_at: row.get(2)?,
            })
        },
    )
    .optional()
}

/// Sets a new password hash and invalidates any pending reset code.
pub fn reset_password(conn: &Connection, user_id: i64, password_hash: &str) -> Result<()> {
    conn.execute(
        "
        UPDATE users
        SET password_hash = ?2, otp = NULL, otp_created_at = NULL
        WHERE id = ?1
        ",
        params![user_id, password_hash],
    )?;
    Ok(())
}

fn category_from_row(row: &Row<'_>) -> Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        is_custom: row.get(2)?,
        created_by: row.get(3)?,
    })
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "
        SELECT id, name, is_custom, created_by
        FROM categories
        ORDER BY is_custom, name
        ",
    )?;
    let rows = stmt.query_map([], category_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn category_by_id(conn: &Connection, category_id: i64) -> Result<Option<Category>> {
    conn.query_row(
        "SELECT id, name, is_custom, created_by FROM categories WHERE id = ?1",
        params![category_id],
        category_from_row,
    )
    .optional()
}

pub fn category_by_name(conn: &Connection, name: &str) -> Result<Option<Category>> {
    conn.query_row(
        "SELECT id, name, is_custom, created_by FROM categories WHERE name = ?1",
        params![name],
        category_from_row,
    )
    .optional()
}

/// Looks a category up by name, creating it as a custom category owned by
/// `user_id` when it does not exist yet.
pub fn get_or_create_category(conn: &Connection, name: &str, user_id: i64) -> Result<Category> {
    conn.execute(
        "INSERT OR IGNORE INTO categories (name, is_custom, created_by) VALUES (?1, 1, ?2)",
        params![name, user_id],
    )?;
    conn.query_row(
        "SELECT id, name, is_custom, created_by FROM categories WHERE name = ?1",
        params![name],
        category_from_row,
    )
}

/// Category an expense should point at. A named category is created on
/// demand; without a name the fallback category is used if it exists.
pub fn resolve_category(
    conn: &Connection,
    name: Option<&str>,
    user_id: i64,
) -> Result<Option<Category>> {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => get_or_create_category(conn, name, user_id).map(Some),
        None => category_by_name(conn, FALLBACK_CATEGORY),
    }
}

const EXPENSE_COLUMNS: &str = "
    e.id, e.user_id, e.category_id, c.name, e.title, e.amount_cents,
    e.expense_date, e.payment_mode, e.note, e.created_at
";

fn expense_from_row(row: &Row<'_>) -> Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        category_name: row.get(3)?,
        title: row.get(4)?,
        amount_cents: row.get(5)?,
        expense_date: row.get(6)?,
        payment_mode: row.get(7)?,
        note: row.get(8)?,
        created_at: row.get(9)?,
    })
}

pub fn list_expenses(conn: &Connection, user_id: i64) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "
        SELECT {EXPENSE_COLUMNS}
        FROM expenses e
        LEFT JOIN categories c ON e.category_id = c.id
        WHERE e.user_id = ?1
        ORDER BY e.expense_date, e.id
        "
    ))?;
    let rows = stmt.query_map(params![user_id], expense_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn expense_by_id(conn: &Connection, expense_id: i64) -> Result<Option<Expense>> {
    conn.query_row(
        &format!(
            "
            SELECT {EXPENSE_COLUMNS}
            FROM expenses e
            LEFT JOIN categories c ON e.category_id = c.id
            WHERE e.id = ?1
            "
        ),
        params![expense_id],
        expense_from_row,
    )
    .optional()
}

pub fn insert_expense(
    conn: &Connection,
    user_id: i64,
    input: &ExpenseInput,
    created_at: DateTime<Utc>,
) -> Result<Expense> {
    let category = resolve_category(conn, input.category.as_deref(), user_id)?;
    conn.execute(
        "
        INSERT INTO expenses
            (user_id, category_id, title, amount_cents, expense_date, payment_mode, note, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ",
        params![
            user_id,
            category.as_ref().map(|c| c.id),
            input.title,
            input.amount_cents,
            input.expense_date,
            input.payment_mode,
            input.note,
            created_at
        ],
    )?;
    Ok(Expense {
        id: conn.last_insert_rowid(),
        user_id,
        category_id: category.as_ref().map(|c| c.id),
        category_name: category.map(|c| c.name),
        title: input.title.clone(),
        amount_cents: input.amount_cents,
        expense_date: input.expense_date,
        payment_mode: input.payment_mode,
        note: input.note.clone(),
        created_at,
    })
}

/// Creates an expense, or overwrites every field of `expense_id` when given.
/// Returns `None` when `expense_id` does not name an expense owned by `user_id`.
pub fn upsert_expense(
    conn: &Connection,
    user_id: i64,
    expense_id: Option<i64>,
    input: &ExpenseInput,
    now: DateTime<Utc>,
) -> Result<Option<Expense>> {
    let Some(expense_id) = expense_id else {
        return insert_expense(conn, user_id, input, now).map(Some);
    };

    let owned = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM expenses WHERE id = ?1 AND user_id = ?2)",
        params![expense_id, user_id],
        |row| row.get::<_, i64>(0),
    )? == 1;
    if !owned {
        return Ok(None);
    }

    let category = resolve_category(conn, input.category.as_deref(), user_id)?;
    conn.execute(
        "
        UPDATE expenses
        SET category_id = ?3, title = ?4, amount_cents = ?5, expense_date = ?6,
            payment_mode = ?7, note = ?8
        WHERE id = ?1 AND user_id = ?2
        ",
        params![
            expense_id,
            user_id,
            category.map(|c| c.id),
            input.title,
            input.amount_cents,
            input.expense_date,
            input.payment_mode,
            input.note
        ],
    )?;
    expense_by_id(conn, expense_id)
}

pub fn delete_expense(conn: &Connection, expense_id: i64) -> Result<bool> {
    let removed = conn.execute("DELETE FROM expenses WHERE id = ?1", params![expense_id])?;
    Ok(removed > 0)
}
