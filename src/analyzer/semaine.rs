use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Semaine ISO 8601 d'une date : numéro, année de rattachement et bornes
/// lundi/dimanche de la semaine calendaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemaineIso {
    pub numero: u32,
    pub annee_iso: i32,
    pub debut: NaiveDate,
    pub fin: NaiveDate,
}

impl SemaineIso {
    /// Clé triable et unique de la semaine : `"{annee_iso}-{numero:02}"`.
    /// Le zéro-padding rend l'ordre lexicographique chronologique.
    pub fn cle(&self) -> String {
        format!("{}-{:02}", self.annee_iso, self.numero)
    }
}

/// Calcule la semaine ISO d'une date par la règle du jeudi : une semaine
/// appartient à l'année de son jeudi, et la semaine 1 est celle du 4 janvier.
///
/// Fin décembre peut donc tomber en semaine 1 de l'année suivante, et début
/// janvier en semaine 52/53 de l'année précédente.
pub fn semaine_iso(date: NaiveDate) -> SemaineIso {
    let lundi = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    let jeudi = lundi + Duration::days(3);
    let annee_iso = jeudi.year();

    // Le 4 janvier est toujours en semaine 1 ; son jeudi est le premier
    // jeudi ISO de l'année.
    let jan4 = NaiveDate::from_ymd_opt(annee_iso, 1, 4)
        .expect("le 4 janvier existe pour toute année");
    let premier_jeudi =
        jan4 - Duration::days(jan4.weekday().num_days_from_monday() as i64) + Duration::days(3);

    let numero = ((jeudi - premier_jeudi).num_days() / 7) as u32 + 1;

    SemaineIso {
        numero,
        annee_iso,
        debut: lundi,
        fin: lundi + Duration::days(6),
    }
}
