use contracts::domain::a001_client::Client;
use contracts::domain::a002_license::License;
use contracts::domain::common::AggregateRoot;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Schema bootstrap, applied on every start
fn schema() -> Vec<(String, String)> {
    let client = Client::full_name();
    let license = License::full_name();
    vec![
        (
            client.clone(),
            format!(
                r#"
        CREATE TABLE IF NOT EXISTS {client} (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            document TEXT NOT NULL DEFAULT '',
            email TEXT,
            phone TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#
            ),
        ),
        (
            format!("{client}_code_uidx"),
            format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {client}_code_uidx ON {client} (code) WHERE is_deleted = 0;"
            ),
        ),
        (
            license.clone(),
            format!(
                r#"
        CREATE TABLE IF NOT EXISTS {license} (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            comment TEXT,
            client_id TEXT NOT NULL,
            estado TEXT NOT NULL,
            data_expiracao TEXT,
            conta_pago TEXT NOT NULL DEFAULT 'Pendente',
            valor_pago REAL,
            valor_total REAL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#
            ),
        ),
        (
            format!("{license}_code_uidx"),
            format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {license}_code_uidx ON {license} (code) WHERE is_deleted = 0;"
            ),
        ),
        (
            format!("{license}_client_idx"),
            format!("CREATE INDEX IF NOT EXISTS {license}_client_idx ON {license} (client_id);"),
        ),
    ]
}

/// Build a sqlite URL, fixing separators and drive letters on Windows
pub fn build_sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };

    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;

    apply_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub async fn apply_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let objects = schema();
    for (name, sql) in &objects {
        tracing::debug!("Ensuring schema object {}", name);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.clone()))
            .await?;
    }
    tracing::info!("Database schema ready ({} objects)", objects.len());
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
