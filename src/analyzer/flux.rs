//! Flux temporels entrées/sorties avec stock porté : série hebdomadaire
//! dense sur fenêtre étendue et série mensuelle sur 12 mois.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::agregats::arrondi2;
use super::libelle_mois;
use super::semaine::semaine_iso;
use crate::db::queries::LienDecision;

/// Première date de signature par demande : le minimum des signatures non
/// nulles parmi les liens. Fonction unique partagée par les flux hebdomadaire
/// et mensuel pour garantir une sémantique de sortie cohérente.
pub fn premiere_signature_par_demande(liens: &[LienDecision]) -> HashMap<i64, NaiveDateTime> {
    let mut premieres: HashMap<i64, NaiveDateTime> = HashMap::new();
    for lien in liens {
        if let Some(signature) = lien.date_signature {
            premieres
                .entry(lien.demande_id)
                .and_modify(|d| {
                    if signature < *d {
                        *d = signature;
                    }
                })
                .or_insert(signature);
        }
    }
    premieres
}

// ─── Flux hebdomadaire ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemaineFlux {
    pub cle: String,
    pub numero: u32,
    pub debut: NaiveDate,
    pub fin: NaiveDate,
    pub entrees: usize,
    pub sorties: usize,
    pub delta: i64,
    pub stock: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FluxHebdo {
    pub annee: i32,
    pub semaines: Vec<SemaineFlux>,
    pub total_semaines: usize,
}

/// Fenêtre étendue du flux hebdomadaire, alignée sur des semaines entières :
/// du lundi de la semaine du 20 décembre (annee-1) au lundi qui suit la
/// semaine du 10 janvier (annee+1), en bornes semi-ouvertes [debut, fin).
pub fn fenetre_flux(annee: i32) -> (NaiveDate, NaiveDate) {
    let debut = NaiveDate::from_ymd_opt(annee - 1, 12, 20)
        .expect("le 20 décembre existe pour toute année");
    let fin =
        NaiveDate::from_ymd_opt(annee + 1, 1, 10).expect("le 10 janvier existe pour toute année");
    let premier_lundi = debut - Duration::days(debut.weekday().num_days_from_monday() as i64);
    let dernier_lundi = fin - Duration::days(fin.weekday().num_days_from_monday() as i64);
    (premier_lundi, dernier_lundi + Duration::days(7))
}

/// Série hebdomadaire dense sur la fenêtre étendue [20 décembre annee-1,
/// 10 janvier annee+1] : les semaines à cheval sur les bornes d'année y
/// figurent entières. Chaque semaine apparaît même sans activité.
///
/// Le stock est cumulé sur la série chronologique complète ; la limite
/// éventuelle ne fait que tronquer la sortie aux N semaines les plus
/// récentes (ordre anté-chronologique), sans jamais recalculer le stock.
pub fn compute_flux_hebdo(
    annee: i32,
    receptions: &[NaiveDateTime],
    sorties: &[NaiveDateTime],
    limite: Option<usize>,
) -> FluxHebdo {
    let (premier_lundi, fin_fenetre) = fenetre_flux(annee);

    // Génération dense : un pas de 7 jours à partir du lundi de la première
    // semaine, dans l'ordre chronologique.
    let mut semaines: Vec<SemaineFlux> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut lundi = premier_lundi;
    while lundi < fin_fenetre {
        let semaine = semaine_iso(lundi);
        index.insert(semaine.cle(), semaines.len());
        semaines.push(SemaineFlux {
            cle: semaine.cle(),
            numero: semaine.numero,
            debut: semaine.debut,
            fin: semaine.fin,
            entrees: 0,
            sorties: 0,
            delta: 0,
            stock: 0,
        });
        lundi += Duration::days(7);
    }

    for reception in receptions {
        if let Some(&i) = index.get(&semaine_iso(reception.date()).cle()) {
            semaines[i].entrees += 1;
        }
    }
    for sortie in sorties {
        if let Some(&i) = index.get(&semaine_iso(sortie.date()).cle()) {
            semaines[i].sorties += 1;
        }
    }

    let mut stock: i64 = 0;
    for semaine in &mut semaines {
        semaine.delta = semaine.entrees as i64 - semaine.sorties as i64;
        stock += semaine.delta;
        semaine.stock = stock;
    }

    let total_semaines = semaines.len();
    semaines.reverse();
    if let Some(limite) = limite {
        semaines.truncate(limite);
    }

    FluxHebdo {
        annee,
        semaines,
        total_semaines,
    }
}

// ─── Flux mensuel ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoisFlux {
    pub mois: u32,
    pub libelle: String,
    pub entrees: usize,
    pub sorties: usize,
    pub entrees_annee_precedente: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoyenneMensuelle {
    pub entrees: f64,
    pub sorties: f64,
    pub entrees_annee_precedente: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FluxMensuel {
    pub annee: i32,
    pub annee_precedente: i32,
    pub mois: Vec<MoisFlux>,
    pub moyenne: MoyenneMensuelle,
}

/// Série mensuelle dense sur les 12 mois civils de l'année. Les sorties
/// sont les premières signatures du mois pour des demandes reçues dans
/// l'année sélectionnée ; les signatures d'une autre année sont ignorées.
pub fn compute_flux_mensuel(
    annee: i32,
    receptions: &[NaiveDateTime],
    receptions_annee_precedente: &[NaiveDateTime],
    premieres_signatures: &[NaiveDateTime],
) -> FluxMensuel {
    let mut entrees = [0usize; 12];
    let mut sorties = [0usize; 12];
    let mut entrees_prec = [0usize; 12];

    for r in receptions {
        if r.year() == annee {
            entrees[r.month0() as usize] += 1;
        }
    }
    for s in premieres_signatures {
        if s.year() == annee {
            sorties[s.month0() as usize] += 1;
        }
    }
    for r in receptions_annee_precedente {
        if r.year() == annee - 1 {
            entrees_prec[r.month0() as usize] += 1;
        }
    }

    let mois: Vec<MoisFlux> = (0..12)
        .map(|m| MoisFlux {
            mois: m as u32 + 1,
            libelle: libelle_mois(m as u32 + 1).to_string(),
            entrees: entrees[m],
            sorties: sorties[m],
            entrees_annee_precedente: entrees_prec[m],
        })
        .collect();

    let moyenne = MoyenneMensuelle {
        entrees: arrondi2(entrees.iter().sum::<usize>() as f64 / 12.0),
        sorties: arrondi2(sorties.iter().sum::<usize>() as f64 / 12.0),
        entrees_annee_precedente: arrondi2(entrees_prec.iter().sum::<usize>() as f64 / 12.0),
    };

    FluxMensuel {
        annee,
        annee_precedente: annee - 1,
        mois,
        moyenne,
    }
}
