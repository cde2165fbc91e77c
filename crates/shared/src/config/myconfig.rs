use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub server_key: String,
    pub is_production: bool,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: String,
    pub public_base_url: String,
    pub max_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub payment: PaymentConfig,
    pub upload: UploadConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("Missing environment variable: {key}"))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let run_migrations = parse_bool("RUN_MIGRATIONS", &required("RUN_MIGRATIONS")?)?;

        let port = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = lookup("DB_MIN_CONNECTION")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("DB_MIN_CONNECTION must be a valid u32 integer")?;

        let db_max_conn = lookup("DB_MAX_CONNECTION")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTION must be a valid u32 integer")?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONNECTION ({db_min_conn}) cannot exceed DB_MAX_CONNECTION ({db_max_conn})"
            ));
        }

        let payment = PaymentConfig {
            server_key: required("MIDTRANS_SERVER_KEY")?,
            is_production: match lookup("MIDTRANS_IS_PRODUCTION") {
                Some(value) => parse_bool("MIDTRANS_IS_PRODUCTION", &value)?,
                None => false,
            },
        };

        let upload = UploadConfig {
            dir: lookup("UPLOAD_DIR").unwrap_or_else(|| "./uploads".to_string()),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}"))
                .trim_end_matches('/')
                .to_string(),
            max_bytes: lookup("UPLOAD_MAX_BYTES")
                .unwrap_or_else(|| (5 * 1024 * 1024).to_string())
                .parse::<usize>()
                .context("UPLOAD_MAX_BYTES must be a valid integer")?,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            db_min_conn,
            db_max_conn,
            payment,
            upload,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}
