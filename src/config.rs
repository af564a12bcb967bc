use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Paramètres applicatifs stockés dans la table `config` (clé/valeur).
/// Les valeurs absentes retombent sur les défauts ci-dessous.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Rôles dont les agents apparaissent dans le rapport de charge.
    pub roles_attributaires: Vec<String>,
    /// Nombre de semaines renvoyées par défaut par le flux hebdomadaire
    /// quand l'appelant ne fournit pas de limite (0 = toutes).
    pub limite_semaines_flux: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            roles_attributaires: vec!["ADMIN".into(), "REDACTEUR".into()],
            limite_semaines_flux: 0,
        }
    }
}

pub fn get_config_from_db(conn: &Connection) -> Result<AppConfig, rusqlite::Error> {
    let mut stmt = conn.prepare_cached("SELECT key, value FROM config")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut config = AppConfig::default();

    for row in rows {
        let (key, value) = row?;
        match key.as_str() {
            "roles_attributaires" => {
                if let Ok(v) = serde_json::from_str(&value) {
                    config.roles_attributaires = v;
                }
            }
            "limite_semaines_flux" => {
                config.limite_semaines_flux = value.parse().unwrap_or(0)
            }
            _ => {}
        }
    }

    Ok(config)
}

pub fn update_config_in_db(conn: &Connection, config: &AppConfig) -> Result<(), rusqlite::Error> {
    let pairs: Vec<(&str, String)> = vec![
        (
            "roles_attributaires",
            serde_json::to_string(&config.roles_attributaires).unwrap_or_default(),
        ),
        (
            "limite_semaines_flux",
            config.limite_semaines_flux.to_string(),
        ),
    ];

    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO config (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
    )?;

    for (key, value) in pairs {
        stmt.execute(rusqlite::params![key, value])?;
    }

    Ok(())
}
