//! SQL schema for the Candidate Hub SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS candidates (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name        TEXT NOT NULL,
    last_name         TEXT NOT NULL,
    email             TEXT NOT NULL,
    phone_number      TEXT,
    best_call_time    TEXT,            -- RFC 3339 UTC or NULL
    linked_in_profile TEXT,
    git_hub_profile   TEXT,
    comment           TEXT,
    first_name_key    TEXT NOT NULL,   -- case-folded first_name
    email_key         TEXT NOT NULL    -- case-folded email
);

-- (first name, email) is unique ignoring case.
CREATE UNIQUE INDEX IF NOT EXISTS candidates_name_email_idx
    ON candidates (first_name_key, email_key);

PRAGMA user_version = 1;
";
