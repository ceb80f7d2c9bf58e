pub mod config {
    use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        /// Full connection URL. When set, the individual `db_*` parts are ignored.
        #[serde(default)]
        pub db_url: Option<String>,
        #[serde(default = "default_db_user")]
        pub db_user: String,
        #[serde(default)]
        pub db_password: String,
        #[serde(default = "default_db_host")]
        pub db_host: String,
        #[serde(default = "default_db_port")]
        pub db_port: u16,
        #[serde(default = "default_db_name")]
        pub db_name: String,
        #[serde(default = "default_db_max_connections")]
        pub db_max_connections: u32,
        #[serde(default = "default_db_connect_timeout_secs")]
        pub db_connect_timeout_secs: u64,
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default = "default_request_timeout_secs")]
        pub request_timeout_secs: u64,
        #[serde(default = "default_static_dir")]
        pub static_dir: String,
    }

    impl Config {
        /// Loads configuration from an optional `todo-server.toml` file and environment variables.
        /// Environment variables take precedence over the file.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::File::with_name("todo-server").required(false))
                .add_source(config::Environment::default())
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }

        /// Returns the database connection URL.
        /// User and password are percent-encoded when the URL is assembled from parts.
        pub fn database_url(&self) -> String {
            match &self.db_url {
                Some(url) => url.clone(),
                None => format!(
                    "postgres://{}:{}@{}:{}/{}",
                    utf8_percent_encode(&self.db_user, NON_ALPHANUMERIC),
                    utf8_percent_encode(&self.db_password, NON_ALPHANUMERIC),
                    self.db_host,
                    self.db_port,
                    self.db_name
                ),
            }
        }

        /// Returns the scheme of the connection URL, e.g. `postgres` or `sqlite`.
        pub fn database_backend(&self) -> String {
            match &self.db_url {
                Some(url) => url.split(':').next().unwrap_or_default().to_string(),
                None => "postgres".to_string(),
            }
        }

        pub fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.request_timeout_secs)
        }

        pub fn db_connect_timeout(&self) -> Duration {
            Duration::from_secs(self.db_connect_timeout_secs)
        }
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                db_url: None,
                db_user: default_db_user(),
                db_password: String::new(),
                db_host: default_db_host(),
                db_port: default_db_port(),
                db_name: default_db_name(),
                db_max_connections: default_db_max_connections(),
                db_connect_timeout_secs: default_db_connect_timeout_secs(),
                port: default_port(),
                request_timeout_secs: default_request_timeout_secs(),
                static_dir: default_static_dir(),
            }
        }
    }

    fn default_db_user() -> String {
        "postgres".to_string()
    }

    fn default_db_host() -> String {
        "localhost".to_string()
    }

    fn default_db_port() -> u16 {
        5432
    }

    fn default_db_name() -> String {
        "todo".to_string()
    }

    fn default_db_max_connections() -> u32 {
        10
    }

    fn default_db_connect_timeout_secs() -> u64 {
        5
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_secs() -> u64 {
        10
    }

    fn default_static_dir() -> String {
        "static".to_string()
    }

}
pub mod db;
pub mod entities;
pub mod todo;
pub mod web;
