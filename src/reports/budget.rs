use crate::analyzer::budget::{
    compute_depenses_mensuelles, compute_engagements_mensuels, compute_engagements_sgami,
    compute_kpi_engagements, compute_kpi_paiements, compute_paiements_par_pce,
    compute_paiements_par_sgami, DepensesMensuelles, EngagementSgami, EngagementsMensuels,
    KpiEngagements, KpiPaiements, RepartitionPaiements,
};
use crate::db::queries;
use crate::state::{AppState, DbAccess};

use super::{annee_ou_courante, trace_erreur};

/// Indicateurs de tête des engagements : comptages conventions/avenants,
/// montants moyens, engagé signé et engagé créé projetés sur le budget.
pub fn kpi_engagements(state: &AppState, annee: Option<i32>) -> Result<KpiEngagements, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let budget = queries::get_budget_total_annee(conn, annee)?;
        let conventions = queries::get_conventions_annee(conn, annee)?;
        Ok(compute_kpi_engagements(annee, &conventions, budget))
    });
    trace_erreur("kpi engagements", annee, resultat)
}

/// Montants engagés de l'année par service payeur, triés par montant
/// décroissant.
pub fn engagements_par_sgami(
    state: &AppState,
    annee: Option<i32>,
) -> Result<Vec<EngagementSgami>, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let budget = queries::get_budget_total_annee(conn, annee)?;
        let conventions = queries::get_conventions_annee(conn, annee)?;
        Ok(compute_engagements_sgami(annee, &conventions, budget))
    });
    trace_erreur("engagements par sgami", annee, resultat)
}

/// Série mensuelle des engagements avec cumuls HT, projections et cumul TTC
/// estimé.
pub fn engagements_mensuels(
    state: &AppState,
    annee: Option<i32>,
) -> Result<EngagementsMensuels, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let budget = queries::get_budget_total_annee(conn, annee)?;
        let conventions = queries::get_conventions_annee(conn, annee)?;
        Ok(compute_engagements_mensuels(annee, &conventions, budget))
    });
    trace_erreur("engagements mensuels", annee, resultat)
}

/// Indicateurs de tête des dépenses : volumes, moyennes par paiement et par
/// dossier, totaux HT indicatif et TTC rapporté au budget.
pub fn kpi_paiements(state: &AppState, annee: Option<i32>) -> Result<KpiPaiements, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let budget = queries::get_budget_total_annee(conn, annee)?;
        let paiements = queries::get_paiements_annee(conn, annee)?;
        Ok(compute_kpi_paiements(annee, &paiements, budget))
    });
    trace_erreur("kpi paiements", annee, resultat)
}

pub fn paiements_par_sgami(
    state: &AppState,
    annee: Option<i32>,
) -> Result<RepartitionPaiements, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let budget = queries::get_budget_total_annee(conn, annee)?;
        let paiements = queries::get_paiements_annee(conn, annee)?;
        Ok(compute_paiements_par_sgami(annee, &paiements, budget))
    });
    trace_erreur("paiements par sgami", annee, resultat)
}

pub fn paiements_par_pce(
    state: &AppState,
    annee: Option<i32>,
) -> Result<RepartitionPaiements, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let budget = queries::get_budget_total_annee(conn, annee)?;
        let paiements = queries::get_paiements_annee(conn, annee)?;
        Ok(compute_paiements_par_pce(annee, &paiements, budget))
    });
    trace_erreur("paiements par pce", annee, resultat)
}

/// Dépenses mensuelles en double série : par mois de création du dossier et
/// par mois d'enregistrement du paiement.
pub fn depenses_mensuelles(
    state: &AppState,
    annee: Option<i32>,
) -> Result<DepensesMensuelles, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let budget = queries::get_budget_total_annee(conn, annee)?;
        let paiements = queries::get_paiements_annee(conn, annee)?;
        Ok(compute_depenses_mensuelles(annee, &paiements, budget))
    });
    trace_erreur("dépenses mensuelles", annee, resultat)
}
