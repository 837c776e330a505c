use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Schema bootstrap, every statement is idempotent
const SCHEMA: &[(&str, &str)] = &[
    (
        "sys_users",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password_hash TEXT NOT NULL,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            rut TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    ),
    (
        "sys_refresh_tokens",
        r#"
        CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id INTEGER NOT NULL REFERENCES sys_users(id),
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        "#,
    ),
    (
        "sys_settings",
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a001_laboratory",
        r#"
        CREATE TABLE IF NOT EXISTS a001_laboratory (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE,
            direccion TEXT,
            telefono TEXT
        );
        "#,
    ),
    (
        "a002_product",
        r#"
        CREATE TABLE IF NOT EXISTS a002_product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            laboratorio_id INTEGER NOT NULL REFERENCES a001_laboratory(id),
            nombre TEXT NOT NULL,
            descripcion TEXT NOT NULL DEFAULT '',
            cantidad_mg INTEGER NOT NULL,
            cantidad_capsulas INTEGER NOT NULL DEFAULT 0,
            es_bioequivalente INTEGER NOT NULL DEFAULT 0,
            codigo_serie TEXT NOT NULL UNIQUE,
            precio_venta INTEGER NOT NULL DEFAULT 0,
            activo INTEGER NOT NULL DEFAULT 1
        );
        "#,
    ),
    (
        "a003_batch",
        r#"
        CREATE TABLE IF NOT EXISTS a003_batch (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            producto_id INTEGER NOT NULL REFERENCES a002_product(id),
            codigo_lote TEXT NOT NULL,
            fecha_creacion TEXT NOT NULL,
            fecha_vencimiento TEXT NOT NULL,
            cantidad INTEGER NOT NULL,
            defectuoso INTEGER NOT NULL DEFAULT 0,
            activo INTEGER NOT NULL DEFAULT 1,
            UNIQUE (producto_id, codigo_lote)
        );
        "#,
    ),
    (
        "a004_sale",
        r#"
        CREATE TABLE IF NOT EXISTS a004_sale (
            id TEXT PRIMARY KEY NOT NULL,
            usuario_id INTEGER NOT NULL REFERENCES sys_users(id),
            fecha TEXT NOT NULL,
            total INTEGER NOT NULL DEFAULT 0,
            metodo_pago TEXT NOT NULL DEFAULT 'EFECTIVO',
            anulada INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a004_sale_line",
        r#"
        CREATE TABLE IF NOT EXISTS a004_sale_line (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            venta_id TEXT NOT NULL REFERENCES a004_sale(id) ON DELETE CASCADE,
            producto_id INTEGER NOT NULL REFERENCES a002_product(id),
            lote_id INTEGER NOT NULL REFERENCES a003_batch(id),
            cantidad INTEGER NOT NULL,
            precio_unitario INTEGER NOT NULL,
            subtotal INTEGER NOT NULL
        );
        "#,
    ),
    (
        "idx_a003_batch_expiry",
        "CREATE INDEX IF NOT EXISTS idx_a003_batch_expiry ON a003_batch (producto_id, fecha_vencimiento);",
    ),
    (
        "idx_a004_sale_fecha",
        "CREATE INDEX IF NOT EXISTS idx_a004_sale_fecha ON a004_sale (fecha);",
    ),
];

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/pharmacy.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Connecting to {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for (name, sql) in SCHEMA {
        tracing::debug!("Ensuring schema object {}", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await
        .map_err(|e| anyhow::anyhow!("failed to create {}: {}", name, e))?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Shared database for service tests: one SQLite file per test process,
/// created on first use. Hold the returned guard for the whole test.
#[cfg(test)]
pub mod testing {
    use tokio::sync::{Mutex, MutexGuard, OnceCell};

    static LOCK: Mutex<()> = Mutex::const_new(());
    static READY: OnceCell<()> = OnceCell::const_new();

    pub async fn test_database() -> MutexGuard<'static, ()> {
        let guard = LOCK.lock().await;
        READY
            .get_or_init(|| async {
                let path = std::env::temp_dir()
                    .join(format!("pharmacy-test-{}.db", std::process::id()));
                let _ = std::fs::remove_file(&path);
                super::initialize_database(path.to_str())
                    .await
                    .expect("test database");
            })
            .await;
        guard
    }
}
