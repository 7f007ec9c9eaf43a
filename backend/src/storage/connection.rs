use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:expenses.db";

// Categories inserted on first start so a fresh install is usable immediately
const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Alimentação", "#FF5733"),
    ("Transporte", "#33FF57"),
    ("Moradia", "#3357FF"),
    ("Saúde", "#FF33A8"),
    ("Educação", "#33A8FF"),
    ("Lazer", "#A833FF"),
    ("Vestuário", "#FFD700"),
    ("Outros", "#808080"),
];

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema and seed data
        Self::setup_schema(&pool).await?;
        Self::seed_default_categories(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database, honoring the `DATABASE_URL`
    /// environment variable when set
    pub async fn init() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string());
        Self::new(&url).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create categories table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                color TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create expenses table. category_id is a weak reference: deleting a
        // category does not cascade to its expenses.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category_id INTEGER,
                FOREIGN KEY (category_id) REFERENCES categories (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for date-range filtering
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_date
            ON expenses(date);
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for category grouping
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_category_id
            ON expenses(category_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert the default categories if the table is empty
    async fn seed_default_categories(pool: &SqlitePool) -> Result<()> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM categories")
            .fetch_one(pool)
            .await?;
        let count: i64 = row.get("count");

        if count > 0 {
            return Ok(());
        }

        for (name, color) in DEFAULT_CATEGORIES {
            sqlx::query("INSERT INTO categories (name, color) VALUES (?, ?)")
                .bind(name)
                .bind(color)
                .execute(pool)
                .await?;
        }

        info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
        Ok(())
    }
}
