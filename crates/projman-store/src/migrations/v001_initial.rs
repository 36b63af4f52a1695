//! v001 -- Initial schema creation.
//!
//! Creates the seven tables in dependency order: `users`, `files`,
//! `projects`, `project_nodes`, then the three association tables.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    username   TEXT UNIQUE NOT NULL,
    password   TEXT NOT NULL,
    role       INTEGER NOT NULL CHECK (role IN (0, 1, 2)),  -- 0 admin, 1 manager, 2 normal
    created_at TEXT NOT NULL                                -- ISO-8601 / RFC-3339
);

-- ----------------------------------------------------------------
-- Files
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS files (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name           TEXT NOT NULL,
    file_path           TEXT NOT NULL,
    file_extension      TEXT NOT NULL,
    file_size           INTEGER NOT NULL,
    uploader_id         INTEGER NOT NULL,
    upload_time         TEXT NOT NULL,
    file_type           INTEGER NOT NULL,                   -- 0 document, 1 other
    status              INTEGER NOT NULL DEFAULT 0,         -- 0 normal, 1 deleted, 2 archived
    project_id          INTEGER,                            -- nullable direct project link
    is_process_document INTEGER NOT NULL DEFAULT 0,         -- boolean 0/1

    FOREIGN KEY (uploader_id) REFERENCES users (id) ON DELETE CASCADE,
    FOREIGN KEY (project_id) REFERENCES projects (id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_files_status ON files(status);
CREATE INDEX IF NOT EXISTS idx_files_project ON files(project_id);

-- ----------------------------------------------------------------
-- Projects
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS projects (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    name                    TEXT NOT NULL,
    description             TEXT,
    manager_id              INTEGER NOT NULL,
    create_time             TEXT NOT NULL,
    estimated_complete_time TEXT,
    is_completed            INTEGER NOT NULL DEFAULT 0,

    FOREIGN KEY (manager_id) REFERENCES users (id) ON DELETE CASCADE
);

-- ----------------------------------------------------------------
-- Project nodes (work breakdown, optionally nested)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS project_nodes (
    id                        INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id                INTEGER NOT NULL,
    name                      TEXT NOT NULL,
    description               TEXT,
    parent_id                 INTEGER,                      -- NULL = top-level
    create_time               TEXT NOT NULL,
    estimated_completion_time TEXT,
    is_completed              INTEGER NOT NULL DEFAULT 0,

    FOREIGN KEY (project_id) REFERENCES projects (id) ON DELETE CASCADE,
    FOREIGN KEY (parent_id) REFERENCES project_nodes (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_project_nodes_project ON project_nodes(project_id);

-- ----------------------------------------------------------------
-- Project membership
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS project_user (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    user_id    INTEGER NOT NULL,

    FOREIGN KEY (project_id) REFERENCES projects (id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE,
    UNIQUE (project_id, user_id)
);

-- ----------------------------------------------------------------
-- Project-level file attachments
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS project_file (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    file_id    INTEGER NOT NULL,

    FOREIGN KEY (project_id) REFERENCES projects (id) ON DELETE CASCADE,
    FOREIGN KEY (file_id) REFERENCES files (id) ON DELETE CASCADE,
    UNIQUE (project_id, file_id)
);

-- ----------------------------------------------------------------
-- Node-level file attachments.  No unique pair constraint: the only
-- writer replaces the full set for a node.
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS node_file (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    node_id INTEGER NOT NULL,
    file_id INTEGER NOT NULL,

    FOREIGN KEY (node_id) REFERENCES project_nodes (id) ON DELETE CASCADE,
    FOREIGN KEY (file_id) REFERENCES files (id) ON DELETE CASCADE
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
