use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "clinic-api";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "info,clinic_api=debug".to_string()
}

/// Get the application data directory (~/.clinic-api/)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".clinic-api")
}

/// Path to the SQLite database file. `CLINIC_DB` overrides the default
/// location under the application data directory.
pub fn database_path() -> PathBuf {
    match std::env::var("CLINIC_DB") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join("clinic.db"),
    }
}

/// Address the HTTP server binds to. `CLINIC_ADDR` overrides; an
/// unparseable value falls back to the default.
pub fn bind_addr() -> SocketAddr {
    std::env::var("CLINIC_ADDR")
        .ok()
        .and_then(|addr| addr.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with(".clinic-api"));
    }

    #[test]
    fn default_database_path_under_app_data() {
        if std::env::var("CLINIC_DB").is_err() {
            let path = database_path();
            assert!(path.starts_with(app_data_dir()));
            assert!(path.ends_with("clinic.db"));
        }
    }

    #[test]
    fn default_bind_addr_is_loopback_3000() {
        if std::env::var("CLINIC_ADDR").is_err() {
            let addr = bind_addr();
            assert!(addr.ip().is_loopback());
            assert_eq!(addr.port(), 3000);
        }
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
