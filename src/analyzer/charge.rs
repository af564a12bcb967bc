//! Rapport de charge par rédacteur : demandes attribuées, ventilation
//! propre/BAP, décisions signées dans l'année et passages AJE→PJ.

use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use serde::Serialize;

use crate::db::queries::{DemandeStat, LienDecision, Redacteur};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeGenerale {
    pub total_recues: usize,
    pub total_traitees: usize,
    pub total_en_cours_attribuees: usize,
    pub total_non_attribuees: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionsParType {
    pub pj: usize,
    pub aje: usize,
    pub aj: usize,
    pub rejet: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRedacteur {
    pub id: i64,
    pub redacteur: String,
    pub role: String,
    pub demandes_attribuees: usize,
    pub demandes_propres: usize,
    pub demandes_bap: usize,
    pub decisions: DecisionsParType,
    pub passages_aje_pj: usize,
    pub en_cours: usize,
    pub en_cours_propres: usize,
    pub en_cours_bap: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RapportCharge {
    pub annee: i32,
    pub generale: ChargeGenerale,
    pub redacteurs: Vec<ChargeRedacteur>,
}

/// Calcule le rapport de charge à partir des demandes reçues dans l'année,
/// de leurs liens de décision (toutes dates de signature confondues) et des
/// agents éligibles, déjà triés par rôle puis nom.
///
/// Invariants garantis : propres + bap = attribuées, et
/// en_cours = en_cours_propres + en_cours_bap, pour chaque rédacteur.
pub fn compute_charge(
    annee: i32,
    demandes: &[DemandeStat],
    liens: &[LienDecision],
    redacteurs: &[Redacteur],
) -> RapportCharge {
    // Une demande est traitée dès qu'un de ses liens porte une signature,
    // quelle que soit l'année de cette signature.
    let traitees: HashSet<i64> = liens
        .iter()
        .filter(|l| l.date_signature.is_some())
        .map(|l| l.demande_id)
        .collect();

    // Liens signés dans l'année sélectionnée, indexés par demande.
    let mut liens_annee: HashMap<i64, Vec<&LienDecision>> = HashMap::new();
    for lien in liens {
        if matches!(lien.date_signature, Some(d) if d.year() == annee) {
            liens_annee.entry(lien.demande_id).or_default().push(lien);
        }
    }

    let mut par_redacteur: HashMap<i64, Vec<&DemandeStat>> = HashMap::new();
    for demande in demandes {
        if let Some(id) = demande.redacteur_id {
            par_redacteur.entry(id).or_default().push(demande);
        }
    }

    let generale = ChargeGenerale {
        total_recues: demandes.len(),
        total_traitees: demandes.iter().filter(|d| traitees.contains(&d.id)).count(),
        total_en_cours_attribuees: demandes
            .iter()
            .filter(|d| d.redacteur_id.is_some() && !traitees.contains(&d.id))
            .count(),
        total_non_attribuees: demandes.iter().filter(|d| d.redacteur_id.is_none()).count(),
    };

    let vide: Vec<&DemandeStat> = Vec::new();
    let mut lignes = Vec::new();

    for redacteur in redacteurs {
        let attribuees = par_redacteur.get(&redacteur.id).unwrap_or(&vide);
        if attribuees.is_empty() {
            continue;
        }

        let demandes_propres = attribuees.iter().filter(|d| d.bap_id.is_none()).count();
        let demandes_bap = attribuees.len() - demandes_propres;

        let mut decisions = DecisionsParType::default();
        let mut passages_aje_pj = 0;
        for demande in attribuees {
            let Some(liens_demande) = liens_annee.get(&demande.id) else {
                continue;
            };
            let mut aje_signee = false;
            let mut pj_signee = false;
            for lien in liens_demande {
                match lien.type_decision.as_str() {
                    "PJ" => {
                        decisions.pj += 1;
                        pj_signee = true;
                    }
                    "AJE" => {
                        decisions.aje += 1;
                        aje_signee = true;
                    }
                    "AJ" => decisions.aj += 1,
                    "REJET" => decisions.rejet += 1,
                    _ => {}
                }
            }
            if aje_signee && pj_signee {
                passages_aje_pj += 1;
            }
        }

        let en_cours_demandes: Vec<&&DemandeStat> = attribuees
            .iter()
            .filter(|d| !traitees.contains(&d.id))
            .collect();
        let en_cours_propres = en_cours_demandes
            .iter()
            .filter(|d| d.bap_id.is_none())
            .count();

        lignes.push(ChargeRedacteur {
            id: redacteur.id,
            redacteur: format!("{} {}", redacteur.nom, redacteur.prenom),
            role: redacteur.role.clone(),
            demandes_attribuees: attribuees.len(),
            demandes_propres,
            demandes_bap,
            decisions,
            passages_aje_pj,
            en_cours: en_cours_demandes.len(),
            en_cours_propres,
            en_cours_bap: en_cours_demandes.len() - en_cours_propres,
        });
    }

    RapportCharge {
        annee,
        generale,
        redacteurs: lignes,
    }
}
