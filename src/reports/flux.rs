use chrono::NaiveDateTime;

use crate::analyzer::flux::{
    compute_flux_hebdo, compute_flux_mensuel, fenetre_flux, premiere_signature_par_demande,
    FluxHebdo, FluxMensuel,
};
use crate::config::get_config_from_db;
use crate::db::queries;
use crate::state::{AppState, DbAccess};

use super::{annee_ou_courante, trace_erreur};

/// Flux hebdomadaire entrées/sorties/stock sur la fenêtre étendue de
/// l'année. Sans `limite` explicite, la limite configurée s'applique
/// (0 = toutes les semaines).
pub fn flux_hebdomadaire(
    state: &AppState,
    annee: Option<i32>,
    limite: Option<usize>,
) -> Result<FluxHebdo, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let config = get_config_from_db(conn)?;
        let limite = limite
            .or_else(|| (config.limite_semaines_flux > 0).then_some(config.limite_semaines_flux));

        let (debut, fin) = fenetre_flux(annee);
        let receptions = queries::get_dates_reception_fenetre(conn, debut, fin)?;
        let liens = queries::get_liens_decisions_fenetre(conn, debut, fin)?;
        let sorties: Vec<NaiveDateTime> =
            premiere_signature_par_demande(&liens).into_values().collect();

        Ok(compute_flux_hebdo(annee, &receptions, &sorties, limite))
    });
    trace_erreur("flux hebdomadaire", annee, resultat)
}

/// Flux mensuel de l'année, avec la colonne de comparaison des entrées de
/// l'année précédente et la ligne de moyennes.
pub fn flux_mensuel(state: &AppState, annee: Option<i32>) -> Result<FluxMensuel, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let receptions = queries::get_dates_reception_annee(conn, annee)?;
        let precedentes = queries::get_dates_reception_annee(conn, annee - 1)?;
        let liens = queries::get_liens_decisions_annee(conn, annee)?;
        let signatures: Vec<NaiveDateTime> =
            premiere_signature_par_demande(&liens).into_values().collect();

        Ok(compute_flux_mensuel(annee, &receptions, &precedentes, &signatures))
    });
    trace_erreur("flux mensuel", annee, resultat)
}
