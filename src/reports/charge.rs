use crate::analyzer::charge::{compute_charge, RapportCharge};
use crate::config::get_config_from_db;
use crate::db::queries;
use crate::state::{AppState, DbAccess};

use super::{annee_ou_courante, trace_erreur};

/// Charge de travail de l'année : volumes généraux puis une ligne par agent
/// attributaire actif (rôles configurés) ayant au moins une demande reçue
/// dans l'année.
pub fn rapport_charge(state: &AppState, annee: Option<i32>) -> Result<RapportCharge, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let config = get_config_from_db(conn)?;
        let redacteurs = queries::get_redacteurs_actifs(conn, &config.roles_attributaires)?;
        let demandes = queries::get_demandes_annee(conn, annee)?;
        let liens = queries::get_liens_decisions_annee(conn, annee)?;
        Ok(compute_charge(annee, &demandes, &liens, &redacteurs))
    });
    trace_erreur("charge", annee, resultat)
}
