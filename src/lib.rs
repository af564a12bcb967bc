//! Moteur statistique du pilotage de la protection fonctionnelle :
//! répartitions catégorielles des demandes, charge par rédacteur, flux
//! hebdomadaire et mensuel avec stock, suivi budgétaire des engagements
//! et des dépenses. Les données vivent dans une base SQLite embarquée.

pub mod analyzer;
pub mod config;
pub mod db;
pub mod error;
pub mod reports;
pub mod state;

// ─── E2E Integration Tests ──────────────────────────────────────────────────
