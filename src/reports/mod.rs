//! Points d'entrée des rapports : chaque fonction résout l'année demandée,
//! tire les enregistrements nécessaires via la couche de requêtes puis
//! délègue le calcul aux fonctions pures de `analyzer`.

pub mod budget;
pub mod charge;
pub mod flux;
pub mod repartition;

use chrono::Datelike;

/// Année effective d'un rapport : l'année demandée si elle est plausible,
/// sinon l'année civile courante.
pub(crate) fn annee_ou_courante(annee: Option<i32>) -> i32 {
    match annee {
        Some(a) if (2000..=2100).contains(&a) => a,
        _ => chrono::Local::now().year(),
    }
}

pub(crate) fn trace_erreur<T>(rapport: &str, annee: i32, resultat: Result<T, String>) -> Result<T, String> {
    if let Err(e) = &resultat {
        log::error!("Rapport {} ({}) en échec: {}", rapport, annee, e);
    }
    resultat
}
