//! Connection settings for the backing document database.

/// Where the store lives and what its collections are called.
///
/// Defaults target a local development database. Binaries load a `.env`
/// file via dotenvy before calling [`DbConfig::from_env`]; the library
/// itself never touches the environment.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub database: String,
    pub items_collection: String,
    pub sequences_collection: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "todo-api".to_string(),
            items_collection: "todo-items".to_string(),
            sequences_collection: "sequences".to_string(),
        }
    }
}

impl DbConfig {
    /// Reads `DATABASE_URL` and `DATABASE_NAME`, falling back to the local
    /// defaults. Collection names are fixed.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.url = url;
        }
        if let Ok(database) = std::env::var("DATABASE_NAME") {
            config.database = database;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::DbConfig;

    #[test]
    fn defaults_match_local_provisioning() {
        let config = DbConfig::default();
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "todo-api");
        assert_eq!(config.items_collection, "todo-items");
        assert_eq!(config.sequences_collection, "sequences");
    }
}
