use rusqlite::Connection;
use std::sync::Mutex;

use crate::error::AppError;

/// Point d'accès unique au magasin de données. La connexion est construite
/// une fois au démarrage puis injectée par référence dans chaque rapport.
pub struct AppState {
    pub db: Mutex<Option<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            db: Mutex::new(Some(conn)),
        }
    }
}

pub trait DbAccess {
    fn db<F, T>(&self, f: F) -> Result<T, String>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>;
}

impl DbAccess for AppState {
    fn db<F, T>(&self, f: F) -> Result<T, String>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let guard = self
            .db
            .lock()
            .map_err(|e| AppError::Custom(format!("Verrou empoisonné: {}", e)).to_string())?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| AppError::Custom("Base de données non initialisée".into()).to_string())?;
        f(conn).map_err(|e| AppError::from(e).to_string())
    }
}
