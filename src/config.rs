use std::env;

/// Runtime settings, read once at startup. Every field can be overridden
/// via the environment; a `.env` file is honored through dotenvy in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub data_file: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Config {
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let data_file =
            env::var("DATA_FILE").unwrap_or_else(|_| "data/climbclub.json".to_string());
        let admin_password = match env::var("ADMIN_PASSWORD") {
            Ok(val) if !val.is_empty() => val,
            _ => {
                log::warn!("No ADMIN_PASSWORD set - using the built-in default");
                "bulldok2025".to_string()
            }
        };
        Config {
            bind_addr,
            data_file,
            admin_password,
        }
    }
}
