use crate::config::DatabaseConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Character, Favorite, FavoriteRecord, FavoriteTarget, Planet, User, Vehicle};
use crate::repository::CatalogRepository;
use crate::seed::SeedCatalog;
use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{types::ToSql, Row, Transaction};
use tracing::{error, info};

const FAVORITE_COLUMNS: &str = "id, user_id, character_id, planet_id, vehicle_id";

/// Schema, applied in order at startup. Every statement is idempotent.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "users table",
        r#"
            CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                email VARCHAR(120) UNIQUE NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE
            )
        "#,
    ),
    (
        "characters table",
        r#"
            CREATE TABLE IF NOT EXISTS characters (
                id SERIAL PRIMARY KEY,
                name VARCHAR(250) NOT NULL,
                gender VARCHAR(50),
                birth_year VARCHAR(50),
                eye_color VARCHAR(50),
                hair_color VARCHAR(50)
            )
        "#,
    ),
    (
        "planets table",
        r#"
            CREATE TABLE IF NOT EXISTS planets (
                id SERIAL PRIMARY KEY,
                name VARCHAR(250) NOT NULL,
                climate VARCHAR(250),
                terrain VARCHAR(250),
                population BIGINT
            )
        "#,
    ),
    (
        "vehicles table",
        r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                id SERIAL PRIMARY KEY,
                name VARCHAR(250) NOT NULL,
                model VARCHAR(250),
                manufacturer VARCHAR(250)
            )
        "#,
    ),
    (
        "favorites table",
        r#"
            CREATE TABLE IF NOT EXISTS favorites (
                id SERIAL PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                character_id INTEGER REFERENCES characters(id),
                planet_id INTEGER REFERENCES planets(id),
                vehicle_id INTEGER REFERENCES vehicles(id),
                CONSTRAINT favorites_single_target
                    CHECK (num_nonnulls(character_id, planet_id, vehicle_id) = 1)
            )
        "#,
    ),
    (
        "favorites user index",
        "CREATE INDEX IF NOT EXISTS idx_favorites_user_id ON favorites(user_id)",
    ),
];

/// PostgreSQL-backed catalog. Wraps a deadpool connection pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Builds the pool and checks that a connection can be established.
    pub async fn new(config: DatabaseConfig) -> Result<Self, ApiError> {
        info!(
            "Creating PostgreSQL connection pool (max {} connections)",
            config.max_connections
        );

        let pool = Self::create_pool(config)?;

        let db = Database { pool };
        db.health_check().await?;

        Ok(db)
    }

    fn create_pool(config: DatabaseConfig) -> Result<Pool, ApiError> {
        let mut pg_config = Config::new();

        // sslmode and credentials come from the URL itself
        pg_config.url = Some(config.url);

        pg_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_config = PoolConfig::new(config.max_connections as usize);
        pool_config.timeouts.wait = Some(config.connection_timeout);
        pool_config.timeouts.create = Some(config.connection_timeout);
        pool_config.timeouts.recycle = Some(config.connection_timeout);
        pg_config.pool = Some(pool_config);

        let tls_connector = TlsConnector::builder().build().map_err(|e| {
            error!("Failed to create TLS connector: {}", e);
            ApiError::Database(format!("TLS connector creation failed: {}", e))
        })?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config.create_pool(Some(Runtime::Tokio1), tls).map_err(|e| {
            error!("Failed to create connection pool: {}", e);
            ApiError::Database(format!("Connection pool creation failed: {}", e))
        })
    }

    async fn get_connection(&self) -> Result<Object, ApiError> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Creates the catalog tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), ApiError> {
        info!("Running database migrations");

        let client = self.get_connection().await?;

        for (name, statement) in MIGRATIONS {
            client.execute(*statement, &[]).await.map_err(|e| {
                error!("Failed to apply migration '{}': {}", name, e);
                ApiError::Database(format!("Migration '{}' failed: {}", name, e))
            })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }
}

type SqlParam = Box<dyn ToSql + Sync + Send>;

fn param<T: ToSql + Sync + Send + 'static>(value: T) -> SqlParam {
    Box::new(value)
}

/// Insert statement and parameter rows for one seeded table.
struct SeedTable {
    table: &'static str,
    insert: &'static str,
    rows: Vec<Vec<SqlParam>>,
}

/// Tables in foreign-key order with their starter rows.
fn seed_plan(catalog: &SeedCatalog) -> Vec<SeedTable> {
    vec![
        SeedTable {
            table: "users",
            insert: "INSERT INTO users (id, email, is_active) VALUES ($1, $2, $3)",
            rows: catalog
                .users
                .iter()
                .map(|u| vec![param(u.id), param(u.email.clone()), param(u.is_active)])
                .collect(),
        },
        SeedTable {
            table: "characters",
            insert: "INSERT INTO characters (id, name, gender, birth_year, eye_color, hair_color) VALUES ($1, $2, $3, $4, $5, $6)",
            rows: catalog
                .characters
                .iter()
                .map(|c| {
                    vec![
                        param(c.id),
                        param(c.name.clone()),
                        param(c.gender.clone()),
                        param(c.birth_year.clone()),
                        param(c.eye_color.clone()),
                        param(c.hair_color.clone()),
                    ]
                })
                .collect(),
        },
        SeedTable {
            table: "planets",
            insert: "INSERT INTO planets (id, name, climate, terrain, population) VALUES ($1, $2, $3, $4, $5)",
            rows: catalog
                .planets
                .iter()
                .map(|p| {
                    vec![
                        param(p.id),
                        param(p.name.clone()),
                        param(p.climate.clone()),
                        param(p.terrain.clone()),
                        param(p.population),
                    ]
                })
                .collect(),
        },
        SeedTable {
            table: "vehicles",
            insert: "INSERT INTO vehicles (id, name, model, manufacturer) VALUES ($1, $2, $3, $4)",
            rows: catalog
                .vehicles
                .iter()
                .map(|v| {
                    vec![
                        param(v.id),
                        param(v.name.clone()),
                        param(v.model.clone()),
                        param(v.manufacturer.clone()),
                    ]
                })
                .collect(),
        },
    ]
}

async fn is_empty(tx: &Transaction<'_>, table: &str) -> Result<bool, ApiError> {
    let row = tx
        .query_one(&format!("SELECT COUNT(*) FROM {}", table), &[])
        .await?;
    let count: i64 = row.get(0);

    if count > 0 {
        info!("{} table already contains {} rows, skipping seed", table, count);
    }
    Ok(count == 0)
}

/// Moves the SERIAL sequence past explicitly inserted ids.
async fn sync_sequence(tx: &Transaction<'_>, table: &str) -> Result<(), ApiError> {
    let query = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
    );
    tx.query_one(&query, &[]).await?;
    Ok(())
}

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get(0),
        email: row.get(1),
        is_active: row.get(2),
    }
}

fn character_from_row(row: &Row) -> Character {
    Character {
        id: row.get(0),
        name: row.get(1),
        gender: row.get(2),
        birth_year: row.get(3),
        eye_color: row.get(4),
        hair_color: row.get(5),
    }
}

fn planet_from_row(row: &Row) -> Planet {
    Planet {
        id: row.get(0),
        name: row.get(1),
        climate: row.get(2),
        terrain: row.get(3),
        population: row.get(4),
    }
}

fn vehicle_from_row(row: &Row) -> Vehicle {
    Vehicle {
        id: row.get(0),
        name: row.get(1),
        model: row.get(2),
        manufacturer: row.get(3),
    }
}

fn favorite_from_row(row: &Row) -> Result<Favorite, ApiError> {
    let record = FavoriteRecord {
        id: row.get(0),
        user_id: row.get(1),
        character_id: row.get(2),
        planet_id: row.get(3),
        vehicle_id: row.get(4),
    };

    Favorite::try_from(record).map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))
}

/// Column holding the target id for a favorite of this kind.
fn target_column(target: FavoriteTarget) -> &'static str {
    match target {
        FavoriteTarget::Character(_) => "character_id",
        FavoriteTarget::Planet(_) => "planet_id",
        FavoriteTarget::Vehicle(_) => "vehicle_id",
    }
}

#[async_trait]
impl CatalogRepository for Database {
    async fn health_check(&self) -> ApiResult<()> {
        let client = self.get_connection().await?;

        client.execute("SELECT 1", &[]).await.map_err(|e| {
            error!("Database health check failed: {}", e);
            ApiError::Database(format!("Health check failed: {}", e))
        })?;

        Ok(())
    }

    async fn seed(&self, catalog: &SeedCatalog) -> ApiResult<()> {
        info!("Seeding catalog data");

        let mut conn = self.get_connection().await?;
        let client: &mut tokio_postgres::Client = &mut conn;

        // One transaction per table so a failed seed never leaves a table half filled
        for table in seed_plan(catalog) {
            let tx = client.transaction().await?;

            if is_empty(&tx, table.table).await? {
                for row in &table.rows {
                    let params: Vec<&(dyn ToSql + Sync)> = row
                        .iter()
                        .map(|value| value.as_ref() as &(dyn ToSql + Sync))
                        .collect();
                    tx.execute(table.insert, &params).await?;
                }
                sync_sequence(&tx, table.table).await?;
                info!("Seeded {} {}", table.rows.len(), table.table);
            }

            tx.commit().await?;
        }

        Ok(())
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let client = self.get_connection().await?;
        let rows = client
            .query("SELECT id, email, is_active FROM users ORDER BY id", &[])
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn get_user(&self, id: i32) -> ApiResult<Option<User>> {
        let client = self.get_connection().await?;
        let row = client
            .query_opt("SELECT id, email, is_active FROM users WHERE id = $1", &[&id])
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn list_characters(&self) -> ApiResult<Vec<Character>> {
        let client = self.get_connection().await?;
        let rows = client
            .query(
                "SELECT id, name, gender, birth_year, eye_color, hair_color FROM characters ORDER BY id",
                &[],
            )
            .await?;

        Ok(rows.iter().map(character_from_row).collect())
    }

    async fn get_character(&self, id: i32) -> ApiResult<Option<Character>> {
        let client = self.get_connection().await?;
        let row = client
            .query_opt(
                "SELECT id, name, gender, birth_year, eye_color, hair_color FROM characters WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(character_from_row))
    }

    async fn list_planets(&self) -> ApiResult<Vec<Planet>> {
        let client = self.get_connection().await?;
        let rows = client
            .query(
                "SELECT id, name, climate, terrain, population FROM planets ORDER BY id",
                &[],
            )
            .await?;

        Ok(rows.iter().map(planet_from_row).collect())
    }

    async fn get_planet(&self, id: i32) -> ApiResult<Option<Planet>> {
        let client = self.get_connection().await?;
        let row = client
            .query_opt(
                "SELECT id, name, climate, terrain, population FROM planets WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(planet_from_row))
    }

    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        let client = self.get_connection().await?;
        let rows = client
            .query("SELECT id, name, model, manufacturer FROM vehicles ORDER BY id", &[])
            .await?;

        Ok(rows.iter().map(vehicle_from_row).collect())
    }

    async fn get_vehicle(&self, id: i32) -> ApiResult<Option<Vehicle>> {
        let client = self.get_connection().await?;
        let row = client
            .query_opt(
                "SELECT id, name, model, manufacturer FROM vehicles WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(vehicle_from_row))
    }

    async fn favorites_for_user(&self, user_id: i32) -> ApiResult<Vec<Favorite>> {
        let client = self.get_connection().await?;
        let query = format!("SELECT {FAVORITE_COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY id");
        let rows = client.query(&query, &[&user_id]).await?;

        rows.iter().map(favorite_from_row).collect()
    }

    async fn favorites_for_target(&self, target: FavoriteTarget) -> ApiResult<Vec<Favorite>> {
        let client = self.get_connection().await?;
        let query = format!(
            "SELECT {FAVORITE_COLUMNS} FROM favorites WHERE {} = $1 ORDER BY id",
            target_column(target)
        );
        let rows = client.query(&query, &[&target.id()]).await?;

        rows.iter().map(favorite_from_row).collect()
    }

    async fn add_favorite(&self, user_id: i32, target: FavoriteTarget) -> ApiResult<Favorite> {
        let client = self.get_connection().await?;
        let (character_id, planet_id, vehicle_id) = target.columns();

        let query = format!(
            "INSERT INTO favorites (user_id, character_id, planet_id, vehicle_id) VALUES ($1, $2, $3, $4) RETURNING {FAVORITE_COLUMNS}"
        );
        let row = client
            .query_one(&query, &[&user_id, &character_id, &planet_id, &vehicle_id])
            .await?;

        let favorite = favorite_from_row(&row)?;
        info!("Created favorite {} for user {}", favorite.id, user_id);
        Ok(favorite)
    }

    async fn delete_first_favorite(&self, user_id: i32, target: FavoriteTarget) -> ApiResult<bool> {
        let client = self.get_connection().await?;

        let query = format!(
            "DELETE FROM favorites WHERE id = (SELECT id FROM favorites WHERE user_id = $1 AND {} = $2 ORDER BY id LIMIT 1)",
            target_column(target)
        );
        let affected = client.execute(&query, &[&user_id, &target.id()]).await?;

        Ok(affected > 0)
    }
}
