pub mod agregats;
pub mod budget;
pub mod charge;
pub mod flux;
pub mod repartition;
pub mod semaine;

pub use repartition::NON_RENSEIGNE;
pub use semaine::{semaine_iso, SemaineIso};

/// Libellé français d'un mois calendaire (1-12).
pub fn libelle_mois(mois: u32) -> &'static str {
    match mois {
        1 => "Janvier",
        2 => "Février",
        3 => "Mars",
        4 => "Avril",
        5 => "Mai",
        6 => "Juin",
        7 => "Juillet",
        8 => "Août",
        9 => "Septembre",
        10 => "Octobre",
        11 => "Novembre",
        12 => "Décembre",
        _ => "Inconnu",
    }
}
