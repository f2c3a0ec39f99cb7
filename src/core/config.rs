use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub swagger: SwaggerConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub expire_hours: i64,
    pub leeway: Duration,
}

/// Cloudflare R2 storage configuration for content image uploads
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// R2 account id, used to derive the S3 endpoint
    pub account_id: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Bucket name for storing uploads
    pub bucket: String,
    /// R2 region ("auto" unless told otherwise)
    pub region: String,
    /// Public base URL the bucket is served from
    pub public_url: String,
    /// Local scratch directory for uploads in flight
    pub temp_dir: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// First-run admin account created by the startup seed
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            seed: SeedConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let env_name = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            env: env_name,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl JwtConfig {
    const DEFAULT_ISSUER: &'static str = "newsdesk";
    const DEFAULT_EXPIRE_HOURS: i64 = 24;
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute

    pub fn from_env() -> Result<Self, String> {
        let secret_key = env::var("JWT_SECRET_KEY")
            .map_err(|_| "JWT_SECRET_KEY environment variable is required".to_string())?;

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| Self::DEFAULT_ISSUER.to_string());

        let expire_hours = env::var("JWT_EXPIRE_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_EXPIRE_HOURS.to_string())
            .parse::<i64>()
            .map_err(|_| "JWT_EXPIRE_HOURS must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            secret_key,
            issuer,
            expire_hours,
            leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl StorageConfig {
    const DEFAULT_TEMP_DIR: &'static str = "./temp/content";

    pub fn from_env() -> Result<Self, String> {
        let account_id = env::var("R2_ACCOUNT_ID")
            .map_err(|_| "R2_ACCOUNT_ID environment variable is required".to_string())?;

        let access_key = env::var("R2_ACCESS_KEY")
            .map_err(|_| "R2_ACCESS_KEY environment variable is required".to_string())?;

        let secret_key = env::var("R2_SECRET_KEY")
            .map_err(|_| "R2_SECRET_KEY environment variable is required".to_string())?;

        let bucket = env::var("R2_BUCKET")
            .map_err(|_| "R2_BUCKET environment variable is required".to_string())?;

        let region = env::var("R2_REGION").unwrap_or_else(|_| "auto".to_string());

        let public_url = env::var("R2_PUBLIC_URL")
            .map_err(|_| "R2_PUBLIC_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let temp_dir =
            env::var("UPLOAD_TEMP_DIR").unwrap_or_else(|_| Self::DEFAULT_TEMP_DIR.to_string());

        Ok(Self {
            account_id,
            access_key,
            secret_key,
            bucket,
            region,
            public_url,
            temp_dir,
        })
    }

    /// S3-compatible endpoint derived from the account id
    pub fn endpoint(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Newsdesk API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the Newsdesk publishing backend".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, String> {
        let admin_name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string());
        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@gmail.com".to_string());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "hsc999".to_string());

        Ok(Self {
            admin_name,
            admin_email,
            admin_password,
        })
    }
}
