//! SQL query builders.
//!
//! Generates the Postgres statements an external persistence layer runs to
//! back [`crate::storage::TestLogStore`].

/// Get the list of columns for the test_logs table.
///
/// Returns tuples of (column_name, parameter_placeholder).
pub fn get_test_log_columns() -> Vec<(&'static str, &'static str)> {
    vec![
        // Submission key
        ("key_timestamp", "$1"),
        ("filename", "$2"),
        // Device identity
        ("model", "$3"),
        ("serial_number", "$4"),
        // Report
        ("report", "$5"),
        ("status", "$6"),
        ("received_at", "$7"),
        ("content_hash", "$8"),
        ("scan_detections", "$9"),
    ]
}

/// Build the table definition. The primary key on the submission key is
/// what makes concurrent inserts first-writer-wins.
pub fn build_test_log_table() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS testlog.test_logs (
        key_timestamp BIGINT NOT NULL,
        filename      TEXT NOT NULL,
        model         TEXT NOT NULL,
        serial_number TEXT NOT NULL,
        report        JSONB NOT NULL,
        status        TEXT NOT NULL,
        received_at   TIMESTAMPTZ NOT NULL,
        content_hash  TEXT NOT NULL,
        scan_detections INTEGER NOT NULL DEFAULT 0,
        seq           BIGSERIAL,
        PRIMARY KEY (key_timestamp, filename)
    );
    CREATE INDEX IF NOT EXISTS test_logs_model_received_idx
        ON testlog.test_logs (model, received_at DESC, seq DESC)
    "#
}

/// Build INSERT query for test_logs.
///
/// Zero affected rows means the submission key already existed (`Conflict`).
pub fn build_test_log_insert() -> String {
    let columns = get_test_log_columns();
    let col_names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<&str> = columns.iter().map(|(_, ph)| *ph).collect();

    format!(
        "INSERT INTO testlog.test_logs ({}) VALUES ({}) ON CONFLICT (key_timestamp, filename) DO NOTHING",
        col_names.join(", "),
        placeholders.join(", ")
    )
}

/// Build the scoped listing query. `$1` is the principal's authorized
/// model array. Rows received in the same instant come back newest insert
/// first, the same order [`crate::storage::MemoryStore`] uses.
pub fn build_allowed_list_query() -> String {
    let columns = get_test_log_columns();
    let col_names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();

    format!(
        "SELECT {} FROM testlog.test_logs WHERE model = ANY($1) ORDER BY received_at DESC, seq DESC",
        col_names.join(", ")
    )
}
