// mctwatch - db/mod.rs
//
// Operator/device store backed by SQLite. Holds the two fixed queries the
// application issues: the operator lookup at login and the briefcase
// exclusion list. The schema mirrors the fleet system's OPERADORES and
// MCTS tables so a synced extract drops in unchanged.

use crate::core::model::Operator;
use crate::util::constants;
use crate::util::error::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const FIND_OPERATOR_SQL: &str = "select op_mat, op_nm, to_id_op, op_senha \
     from operadores where op_mat = ?1 and to_id_op = ?2";

const BRIEFCASE_IDS_SQL: &str = "select mct_id_mct from mcts \
     where mct_maleta = 'T' order by mct_nom_mct";

/// An operator row including the stored password.
///
/// Only the login check sees this; the password is compared and discarded,
/// and the bare `Operator` is what enters app state.
#[derive(Debug)]
pub struct StoredOperator {
    pub operator: Operator,
    pub password: String,
}

/// Outcome of a login credential check.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials matched; the operator enters the session.
    Granted(Operator),

    /// Unknown matricula, disallowed role, or wrong password. The three
    /// cases are indistinguishable so the login form confirms nothing
    /// about which matriculas exist.
    Denied,
}

/// Compare the typed password against the stored operator row, if any.
pub fn check_credentials(stored: Option<StoredOperator>, password: &str) -> LoginOutcome {
    match stored {
        Some(s) if s.password == password => LoginOutcome::Granted(s.operator),
        _ => LoginOutcome::Denied,
    }
}

/// Handle to the operator/device store.
pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    /// Open (creating if absent) the store at `path` and ensure the schema
    /// exists. Parent directories are created as needed.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DbError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path).map_err(|e| DbError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;

        tracing::info!(path = %path.display(), "Operator/device store opened");
        Ok(db)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::Open {
            path: ":memory:".into(),
            source: e,
        })?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DbError> {
        let conn = self.conn.lock().expect("poisoned sqlite lock");
        conn.execute_batch(
            r#"
            create table if not exists operadores (
              op_mat text primary key,
              op_nm text not null,
              to_id_op text not null,
              op_senha text not null
            );

            create table if not exists mcts (
              mct_id_mct text primary key,
              mct_nom_mct text not null,
              mct_maleta text not null default 'F'
            );
            "#,
        )
        .map_err(|e| DbError::Migrate { source: e })
    }

    /// Fetch the operator with the given matricula, restricted to the role
    /// allowed to log in. Returns `None` when no such row exists; the caller
    /// treats that the same as a wrong password.
    pub fn find_operator(&self, matricula: &str) -> Result<Option<StoredOperator>, DbError> {
        let conn = self.conn.lock().expect("poisoned sqlite lock");
        conn.query_row(
            FIND_OPERATOR_SQL,
            params![matricula, constants::OPERATOR_ROLE_ALLOWED],
            |r| {
                Ok(StoredOperator {
                    operator: Operator {
                        matricula: r.get(0)?,
                        name: r.get(1)?,
                        role: r.get(2)?,
                    },
                    password: r.get(3)?,
                })
            },
        )
        .optional()
        .map_err(|e| DbError::Query {
            statement: "find_operator",
            source: e,
        })
    }

    /// List the device ids flagged as briefcases, ordered by device name
    /// (the fleet system's own ordering for this list).
    pub fn briefcase_ids(&self) -> Result<Vec<String>, DbError> {
        let conn = self.conn.lock().expect("poisoned sqlite lock");
        let mut stmt = conn.prepare(BRIEFCASE_IDS_SQL).map_err(|e| DbError::Query {
            statement: "briefcase_ids",
            source: e,
        })?;
        let rows = stmt
            .query_map([], |r| r.get::<_, String>(0))
            .map_err(|e| DbError::Query {
                statement: "briefcase_ids",
                source: e,
            })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| DbError::Query {
                statement: "briefcase_ids",
                source: e,
            })?);
        }
        Ok(out)
    }

    /// Insert or replace an operator row. Used when provisioning a local
    /// extract, and by tests.
    pub fn upsert_operator(
        &self,
        matricula: &str,
        name: &str,
        role: &str,
        password: &str,
    ) -> Result<(), DbError> {
        let conn = self.conn.lock().expect("poisoned sqlite lock");
        conn.execute(
            "insert into operadores (op_mat, op_nm, to_id_op, op_senha) values (?1, ?2, ?3, ?4) \
             on conflict(op_mat) do update set op_nm = excluded.op_nm, \
               to_id_op = excluded.to_id_op, op_senha = excluded.op_senha",
            params![matricula, name, role, password],
        )
        .map_err(|e| DbError::Query {
            statement: "upsert_operator",
            source: e,
        })?;
        Ok(())
    }

    /// Insert or replace a device row. `briefcase` maps to the fleet
    /// system's 'T'/'F' flag column.
    pub fn upsert_mct(&self, id: &str, name: &str, briefcase: bool) -> Result<(), DbError> {
        let conn = self.conn.lock().expect("poisoned sqlite lock");
        conn.execute(
            "insert into mcts (mct_id_mct, mct_nom_mct, mct_maleta) values (?1, ?2, ?3) \
             on conflict(mct_id_mct) do update set mct_nom_mct = excluded.mct_nom_mct, \
               mct_maleta = excluded.mct_maleta",
            params![id, name, if briefcase { "T" } else { "F" }],
        )
        .map_err(|e| DbError::Query {
            statement: "upsert_mct",
            source: e,
        })?;
        Ok(())
    }
}
