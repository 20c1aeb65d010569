use std::env;

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub relay_url: Option<String>,
    pub api_key: String,
    pub from_address: String,
    pub from_name: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_url: Option<String>,
    pub api_key: String,
    pub max_image_bytes: usize,
    pub max_video_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub frontend_base_url: String,
    pub mail: MailConfig,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let jwt_secret = env::var("JWT_SECRET")?;
        if jwt_secret.len() < 16 {
            return Err("JWT_SECRET must be at least 16 characters".into());
        }

        let jwt_ttl_seconds = env::var("JWT_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let frontend_base_url = env::var("FRONTEND_BASE_URL").unwrap_or_else(|_|
            "http://localhost:3000".to_string()
        );

        // Mail relay is optional; without it mail sends are logged and skipped.
        let mail = MailConfig {
            relay_url: env::var("MAIL_RELAY_URL").ok(),
            api_key: env::var("MAIL_API_KEY").unwrap_or_default(),
            from_address: env::var("MAIL_FROM_ADDRESS").unwrap_or_else(|_|
                "no-reply@influo.local".to_string()
            ),
            from_name: env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "Influo".to_string()),
        };

        let storage = StorageConfig {
            upload_url: env::var("STORAGE_UPLOAD_URL").ok(),
            api_key: env::var("STORAGE_API_KEY").unwrap_or_default(),
            max_image_bytes: env::var("MAX_IMAGE_BYTES")
                .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
                .parse()?,
            max_video_bytes: env::var("MAX_VIDEO_BYTES")
                .unwrap_or_else(|_| (100 * 1024 * 1024).to_string())
                .parse()?,
        };

        Ok(Config {
            database_url,
            server_host,
            server_port,
            jwt_secret,
            jwt_ttl_seconds,
            frontend_base_url,
            mail,
            storage,
        })
    }
}
