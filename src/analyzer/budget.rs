//! Rapports financiers : engagements (conventions/avenants) et dépenses
//! (paiements), rapportés à l'enveloppe budgétaire annuelle.
//!
//! Les montants sont accumulés en pleine précision et arrondis à 2 décimales
//! uniquement à la construction des lignes de sortie.

use chrono::Datelike;
use serde::Serialize;

use super::agregats::{arrondi2, cumuls, grouper_et_sommer, moyenne_par, pourcentage, somme_par};
use super::libelle_mois;
use super::repartition::NON_RENSEIGNE;
use crate::db::queries::{ConventionStat, PaiementStat};

const FACTEUR_PROJECTION: f64 = 1.10;
const FACTEUR_PROJECTION_SUP: f64 = 1.20;
/// Approximation TTC = HT × 1,20 : facteur figé hérité du métier, à ne pas
/// remplacer par un vrai calcul de TVA.
const FACTEUR_TTC_ESTIME: f64 = 1.20;

// ─── Projections ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MontantProjete {
    pub montant: f64,
    pub pourcentage_budget: f64,
    pub projection10: f64,
    pub pourcentage_projection10: f64,
    pub projection20: f64,
    pub pourcentage_projection20: f64,
}

/// Projections en chaîne : +10 %, puis +20 % appliqués au montant déjà
/// majoré de 10 % (et non +20 % du montant initial).
pub fn projeter(montant: f64, budget_total: f64) -> MontantProjete {
    let projection10 = montant * FACTEUR_PROJECTION;
    let projection20 = projection10 * FACTEUR_PROJECTION_SUP;
    MontantProjete {
        montant: arrondi2(montant),
        pourcentage_budget: arrondi2(pourcentage(montant, budget_total)),
        projection10: arrondi2(projection10),
        pourcentage_projection10: arrondi2(pourcentage(projection10, budget_total)),
        projection20: arrondi2(projection20),
        pourcentage_projection20: arrondi2(pourcentage(projection20, budget_total)),
    }
}

// ─── Engagements : indicateurs de tête ───────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiEngagements {
    pub annee: i32,
    pub budget_total: f64,
    pub conventions_creees: usize,
    pub conventions_signees: usize,
    pub avenants_crees: usize,
    pub avenants_signes: usize,
    pub montant_moyen_convention: f64,
    pub montant_moyen_avenant: f64,
    pub engage_signe: MontantProjete,
    pub engage_cree: MontantProjete,
}

fn creee_dans_annee(c: &ConventionStat, annee: i32) -> bool {
    c.date_creation.year() == annee
}

fn signee_dans_annee(c: &ConventionStat, annee: i32) -> bool {
    matches!(c.date_retour_signee, Some(d) if d.year() == annee)
}

pub fn compute_kpi_engagements(
    annee: i32,
    conventions: &[ConventionStat],
    budget_total: f64,
) -> KpiEngagements {
    let creees: Vec<&ConventionStat> = conventions
        .iter()
        .filter(|c| creee_dans_annee(c, annee))
        .collect();
    let signees: Vec<&ConventionStat> = conventions
        .iter()
        .filter(|c| signee_dans_annee(c, annee))
        .collect();

    let conventions_creees: Vec<&&ConventionStat> = creees
        .iter()
        .filter(|c| c.type_convention == "CONVENTION")
        .collect();
    let avenants_crees: Vec<&&ConventionStat> = creees
        .iter()
        .filter(|c| c.type_convention == "AVENANT")
        .collect();

    KpiEngagements {
        annee,
        budget_total: arrondi2(budget_total),
        conventions_creees: conventions_creees.len(),
        conventions_signees: signees
            .iter()
            .filter(|c| c.type_convention == "CONVENTION")
            .count(),
        avenants_crees: avenants_crees.len(),
        avenants_signes: signees
            .iter()
            .filter(|c| c.type_convention == "AVENANT")
            .count(),
        montant_moyen_convention: arrondi2(moyenne_par(&conventions_creees, |c| c.montant_ht)),
        montant_moyen_avenant: arrondi2(moyenne_par(&avenants_crees, |c| c.montant_ht)),
        engage_signe: projeter(somme_par(&signees, |c| c.montant_ht), budget_total),
        engage_cree: projeter(somme_par(&creees, |c| c.montant_ht), budget_total),
    }
}

// ─── Engagements par SGAMI ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSgami {
    pub sgami: String,
    pub montants: MontantProjete,
}

/// Montants engagés (conventions créées dans l'année) par service payeur,
/// triés par montant décroissant ; les groupes à montant nul sont omis.
pub fn compute_engagements_sgami(
    annee: i32,
    conventions: &[ConventionStat],
    budget_total: f64,
) -> Vec<EngagementSgami> {
    let creees: Vec<&ConventionStat> = conventions
        .iter()
        .filter(|c| creee_dans_annee(c, annee))
        .collect();
    let mut groupes: Vec<(String, f64)> =
        grouper_et_sommer(&creees, |c| c.sgami.clone(), |c| c.montant_ht)
            .into_iter()
            .filter(|(_, total)| *total > 0.0)
            .collect();
    groupes.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    groupes
        .into_iter()
        .map(|(sgami, total)| EngagementSgami {
            sgami,
            montants: projeter(total, budget_total),
        })
        .collect()
}

// ─── Série mensuelle des engagements ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoisEngagement {
    pub mois: u32,
    pub libelle: String,
    pub montant: f64,
    pub pourcentage_budget: f64,
    pub cumul_ht: f64,
    pub pourcentage_cumul: f64,
    pub projection10: f64,
    pub projection20: f64,
    pub cumul_ttc_estime: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalEngagements {
    pub cumul_ht: f64,
    pub pourcentage_cumul: f64,
    pub cumul_ttc_estime: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementsMensuels {
    pub annee: i32,
    pub budget_total: f64,
    pub mois: Vec<MoisEngagement>,
    pub total: TotalEngagements,
}

pub fn compute_engagements_mensuels(
    annee: i32,
    conventions: &[ConventionStat],
    budget_total: f64,
) -> EngagementsMensuels {
    let mut mensuels = [0.0f64; 12];
    for convention in conventions.iter().filter(|c| creee_dans_annee(c, annee)) {
        mensuels[convention.date_creation.month0() as usize] += convention.montant_ht;
    }
    let cumules = cumuls(&mensuels);

    let mois: Vec<MoisEngagement> = (0..12)
        .map(|m| {
            let projection10 = mensuels[m] * FACTEUR_PROJECTION;
            MoisEngagement {
                mois: m as u32 + 1,
                libelle: libelle_mois(m as u32 + 1).to_string(),
                montant: arrondi2(mensuels[m]),
                pourcentage_budget: arrondi2(pourcentage(mensuels[m], budget_total)),
                cumul_ht: arrondi2(cumules[m]),
                pourcentage_cumul: arrondi2(pourcentage(cumules[m], budget_total)),
                projection10: arrondi2(projection10),
                projection20: arrondi2(projection10 * FACTEUR_PROJECTION_SUP),
                cumul_ttc_estime: arrondi2(cumules[m] * FACTEUR_TTC_ESTIME),
            }
        })
        .collect();

    let cumul_final = cumules[11];
    EngagementsMensuels {
        annee,
        budget_total: arrondi2(budget_total),
        mois,
        total: TotalEngagements {
            cumul_ht: arrondi2(cumul_final),
            pourcentage_cumul: arrondi2(pourcentage(cumul_final, budget_total)),
            cumul_ttc_estime: arrondi2(cumul_final * FACTEUR_TTC_ESTIME),
        },
    }
}

// ─── Dépenses : indicateurs de tête ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiPaiements {
    pub annee: i32,
    pub budget_total: f64,
    pub nb_paiements: usize,
    pub nb_dossiers: usize,
    pub montant_moyen_paiement: f64,
    pub montant_moyen_dossier: f64,
    /// Indicatif : le montant HT n'est pas systématiquement renseigné,
    /// les paiements sans HT contribuent zéro.
    pub total_ht_indicatif: f64,
    pub total_ttc: f64,
    pub pourcentage_budget: f64,
}

pub fn compute_kpi_paiements(
    annee: i32,
    paiements: &[PaiementStat],
    budget_total: f64,
) -> KpiPaiements {
    let total_ttc = somme_par(paiements, |p| p.montant_ttc);
    let total_ht = somme_par(paiements, |p| p.montant_ht.unwrap_or(0.0));

    let mut dossiers: Vec<i64> = paiements.iter().map(|p| p.dossier_id).collect();
    dossiers.sort_unstable();
    dossiers.dedup();
    let nb_dossiers = dossiers.len();

    let moyen_paiement = if paiements.is_empty() {
        0.0
    } else {
        total_ttc / paiements.len() as f64
    };
    let moyen_dossier = if nb_dossiers == 0 {
        0.0
    } else {
        total_ttc / nb_dossiers as f64
    };

    KpiPaiements {
        annee,
        budget_total: arrondi2(budget_total),
        nb_paiements: paiements.len(),
        nb_dossiers,
        montant_moyen_paiement: arrondi2(moyen_paiement),
        montant_moyen_dossier: arrondi2(moyen_dossier),
        total_ht_indicatif: arrondi2(total_ht),
        total_ttc: arrondi2(total_ttc),
        pourcentage_budget: arrondi2(pourcentage(total_ttc, budget_total)),
    }
}

// ─── Dépenses par groupe (SGAMI, PCE) ────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupePaiements {
    pub libelle: String,
    pub nb: usize,
    pub montant_ttc: f64,
    pub pourcentage_budget: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalGroupes {
    pub nb: usize,
    pub montant_ttc: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepartitionPaiements {
    pub annee: i32,
    pub budget_total: f64,
    pub groupes: Vec<GroupePaiements>,
    pub total: TotalGroupes,
}

fn repartition_paiements<F>(
    annee: i32,
    paiements: &[PaiementStat],
    budget_total: f64,
    libelle: F,
) -> RepartitionPaiements
where
    F: Fn(&PaiementStat) -> String,
{
    let mut groupes: Vec<(String, usize, f64)> = Vec::new();
    for paiement in paiements {
        let nom = libelle(paiement);
        match groupes.iter_mut().find(|(n, _, _)| *n == nom) {
            Some((_, nb, total)) => {
                *nb += 1;
                *total += paiement.montant_ttc;
            }
            None => groupes.push((nom, 1, paiement.montant_ttc)),
        }
    }
    groupes.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    let nb_total: usize = groupes.iter().map(|(_, nb, _)| nb).sum();
    let montant_total: f64 = groupes.iter().map(|(_, _, m)| m).sum();

    RepartitionPaiements {
        annee,
        budget_total: arrondi2(budget_total),
        groupes: groupes
            .into_iter()
            .map(|(libelle, nb, montant)| GroupePaiements {
                libelle,
                nb,
                montant_ttc: arrondi2(montant),
                pourcentage_budget: arrondi2(pourcentage(montant, budget_total)),
            })
            .collect(),
        total: TotalGroupes {
            nb: nb_total,
            montant_ttc: arrondi2(montant_total),
        },
    }
}

/// Dépenses de l'année ventilées par service payeur.
pub fn compute_paiements_par_sgami(
    annee: i32,
    paiements: &[PaiementStat],
    budget_total: f64,
) -> RepartitionPaiements {
    repartition_paiements(annee, paiements, budget_total, |p| p.sgami.clone())
}

/// Dépenses de l'année ventilées par ligne budgétaire (PCE) ; les paiements
/// sans PCE alimentent un groupe « Non renseigné ».
pub fn compute_paiements_par_pce(
    annee: i32,
    paiements: &[PaiementStat],
    budget_total: f64,
) -> RepartitionPaiements {
    repartition_paiements(annee, paiements, budget_total, |p| {
        p.pce.clone().unwrap_or_else(|| NON_RENSEIGNE.to_string())
    })
}

// ─── Série mensuelle des dépenses ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoisDepenses {
    pub mois: u32,
    pub libelle: String,
    pub montant_dossiers: f64,
    pub cumul_dossiers: f64,
    pub pourcentage_dossiers: f64,
    pub montant_paiements: f64,
    pub cumul_paiements: f64,
    pub pourcentage_paiements: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalDepenses {
    pub montant_dossiers: f64,
    pub pourcentage_dossiers: f64,
    pub montant_paiements: f64,
    pub pourcentage_paiements: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepensesMensuelles {
    pub annee: i32,
    pub budget_total: f64,
    pub mois: Vec<MoisDepenses>,
    pub total: TotalDepenses,
}

/// Deux séries mensuelles indépendantes : montants TTC ventilés par mois de
/// création du dossier, et par mois d'enregistrement du paiement. Les
/// dossiers créés hors de l'année sélectionnée ne nourrissent que la série
/// « paiements ».
pub fn compute_depenses_mensuelles(
    annee: i32,
    paiements: &[PaiementStat],
    budget_total: f64,
) -> DepensesMensuelles {
    let mut par_dossier = [0.0f64; 12];
    let mut par_paiement = [0.0f64; 12];

    for paiement in paiements {
        if paiement.date_creation_dossier.year() == annee {
            par_dossier[paiement.date_creation_dossier.month0() as usize] += paiement.montant_ttc;
        }
        if paiement.date_creation.year() == annee {
            par_paiement[paiement.date_creation.month0() as usize] += paiement.montant_ttc;
        }
    }

    let cumul_dossiers = cumuls(&par_dossier);
    let cumul_paiements = cumuls(&par_paiement);

    let mois: Vec<MoisDepenses> = (0..12)
        .map(|m| MoisDepenses {
            mois: m as u32 + 1,
            libelle: libelle_mois(m as u32 + 1).to_string(),
            montant_dossiers: arrondi2(par_dossier[m]),
            cumul_dossiers: arrondi2(cumul_dossiers[m]),
            pourcentage_dossiers: arrondi2(pourcentage(cumul_dossiers[m], budget_total)),
            montant_paiements: arrondi2(par_paiement[m]),
            cumul_paiements: arrondi2(cumul_paiements[m]),
            pourcentage_paiements: arrondi2(pourcentage(cumul_paiements[m], budget_total)),
        })
        .collect();

    DepensesMensuelles {
        annee,
        budget_total: arrondi2(budget_total),
        mois,
        total: TotalDepenses {
            montant_dossiers: arrondi2(cumul_dossiers[11]),
            pourcentage_dossiers: arrondi2(pourcentage(cumul_dossiers[11], budget_total)),
            montant_paiements: arrondi2(cumul_paiements[11]),
            pourcentage_paiements: arrondi2(pourcentage(cumul_paiements[11], budget_total)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn convention(
        type_convention: &str,
        montant: f64,
        creation: &str,
        retour: Option<&str>,
        sgami: &str,
    ) -> ConventionStat {
        ConventionStat {
            id: 0,
            type_convention: type_convention.into(),
            montant_ht: montant,
            date_creation: dt(creation),
            date_retour_signee: retour.map(dt),
            sgami: sgami.into(),
        }
    }

    fn paiement(ttc: f64, creation: &str, dossier_id: i64, creation_dossier: &str) -> PaiementStat {
        PaiementStat {
            id: 0,
            montant_ht: None,
            montant_ttc: ttc,
            date_creation: dt(creation),
            sgami: "SGAMI Est".into(),
            pce: None,
            dossier_id,
            date_creation_dossier: dt(creation_dossier),
        }
    }

    // --- projections ---

    #[test]
    fn test_projection_en_chaine() {
        // 1000 → 1100 → 1320 (et non 1200)
        let p = projeter(1000.0, 10000.0);
        assert_eq!(p.projection10, 1100.0);
        assert_eq!(p.projection20, 1320.0);
        assert_eq!(p.pourcentage_budget, 10.0);
        assert_eq!(p.pourcentage_projection10, 11.0);
        assert_eq!(p.pourcentage_projection20, 13.2);
    }

    #[test]
    fn test_projection_budget_nul() {
        let p = projeter(1000.0, 0.0);
        assert_eq!(p.pourcentage_budget, 0.0);
        assert_eq!(p.pourcentage_projection10, 0.0);
        assert_eq!(p.pourcentage_projection20, 0.0);
        assert!(p.pourcentage_budget.is_finite());
    }

    // --- KPI engagements ---

    #[test]
    fn test_kpi_engagements_comptages() {
        let conventions = vec![
            convention("CONVENTION", 1000.0, "2025-02-01", Some("2025-03-01"), "Est"),
            convention("CONVENTION", 2000.0, "2025-05-01", None, "Est"),
            convention("AVENANT", 500.0, "2025-06-01", Some("2025-07-01"), "Ouest"),
            // Créée en 2024, signée en 2025 : signée seulement
            convention("CONVENTION", 800.0, "2024-11-01", Some("2025-01-15"), "Est"),
        ];
        let kpi = compute_kpi_engagements(2025, &conventions, 100000.0);
        assert_eq!(kpi.conventions_creees, 2);
        assert_eq!(kpi.conventions_signees, 2);
        assert_eq!(kpi.avenants_crees, 1);
        assert_eq!(kpi.avenants_signes, 1);
        assert_eq!(kpi.montant_moyen_convention, 1500.0);
        assert_eq!(kpi.montant_moyen_avenant, 500.0);
        // Signé : 1000 + 500 + 800 ; créé : 1000 + 2000 + 500
        assert_eq!(kpi.engage_signe.montant, 2300.0);
        assert_eq!(kpi.engage_cree.montant, 3500.0);
    }

    #[test]
    fn test_kpi_engagements_annee_vide() {
        let kpi = compute_kpi_engagements(2025, &[], 0.0);
        assert_eq!(kpi.conventions_creees, 0);
        assert_eq!(kpi.montant_moyen_convention, 0.0);
        assert_eq!(kpi.engage_signe.montant, 0.0);
        assert_eq!(kpi.engage_signe.pourcentage_budget, 0.0);
    }

    // --- engagements par SGAMI ---

    #[test]
    fn test_engagements_sgami_tri_et_omission() {
        let conventions = vec![
            convention("CONVENTION", 100.0, "2025-01-10", None, "Est"),
            convention("CONVENTION", 900.0, "2025-02-10", None, "Ouest"),
            convention("CONVENTION", 0.0, "2025-03-10", None, "Sud"),
            convention("AVENANT", 50.0, "2025-04-10", None, "Est"),
        ];
        let groupes = compute_engagements_sgami(2025, &conventions, 10000.0);
        assert_eq!(groupes.len(), 2); // Sud (montant nul) omis
        assert_eq!(groupes[0].sgami, "Ouest");
        assert_eq!(groupes[0].montants.montant, 900.0);
        assert_eq!(groupes[1].sgami, "Est");
        assert_eq!(groupes[1].montants.montant, 150.0);
    }

    // --- série mensuelle engagements ---

    #[test]
    fn test_engagements_mensuels_cumuls() {
        let conventions = vec![
            convention("CONVENTION", 1000.0, "2025-01-15", None, "Est"),
            convention("CONVENTION", 500.0, "2025-03-15", None, "Est"),
        ];
        let serie = compute_engagements_mensuels(2025, &conventions, 12000.0);
        assert_eq!(serie.mois.len(), 12);
        assert_eq!(serie.mois[0].montant, 1000.0);
        assert_eq!(serie.mois[0].cumul_ht, 1000.0);
        assert_eq!(serie.mois[1].montant, 0.0);
        assert_eq!(serie.mois[1].cumul_ht, 1000.0);
        assert_eq!(serie.mois[2].cumul_ht, 1500.0);
        assert_eq!(serie.mois[11].cumul_ht, 1500.0);
        // TTC estimé = HT × 1,20
        assert_eq!(serie.mois[2].cumul_ttc_estime, 1800.0);
        // La ligne TOTAL répète les cumuls finaux
        assert_eq!(serie.total.cumul_ht, 1500.0);
        assert_eq!(serie.total.cumul_ttc_estime, 1800.0);
        assert_eq!(serie.total.pourcentage_cumul, 12.5);
    }

    #[test]
    fn test_engagements_mensuels_monotones() {
        let conventions = vec![
            convention("CONVENTION", 300.0, "2025-02-01", None, "Est"),
            convention("CONVENTION", 200.0, "2025-07-01", None, "Est"),
            convention("AVENANT", 100.0, "2025-11-01", None, "Est"),
        ];
        let serie = compute_engagements_mensuels(2025, &conventions, 0.0);
        for paire in serie.mois.windows(2) {
            assert!(paire[1].cumul_ht >= paire[0].cumul_ht);
        }
        // Budget absent : tous les pourcentages à zéro
        for m in &serie.mois {
            assert_eq!(m.pourcentage_budget, 0.0);
            assert_eq!(m.pourcentage_cumul, 0.0);
        }
    }

    // --- KPI paiements ---

    #[test]
    fn test_kpi_paiements() {
        let paiements = vec![
            paiement(120.0, "2025-01-10", 1, "2025-01-05"),
            paiement(240.0, "2025-02-10", 1, "2025-01-05"),
            paiement(600.0, "2025-03-10", 2, "2025-02-20"),
        ];
        let kpi = compute_kpi_paiements(2025, &paiements, 9600.0);
        assert_eq!(kpi.nb_paiements, 3);
        assert_eq!(kpi.nb_dossiers, 2);
        assert_eq!(kpi.total_ttc, 960.0);
        assert_eq!(kpi.montant_moyen_paiement, 320.0);
        assert_eq!(kpi.montant_moyen_dossier, 480.0);
        assert_eq!(kpi.pourcentage_budget, 10.0);
    }

    #[test]
    fn test_kpi_paiements_vide() {
        let kpi = compute_kpi_paiements(2025, &[], 1000.0);
        assert_eq!(kpi.nb_paiements, 0);
        assert_eq!(kpi.montant_moyen_paiement, 0.0);
        assert_eq!(kpi.montant_moyen_dossier, 0.0);
        assert_eq!(kpi.pourcentage_budget, 0.0);
    }

    // --- répartitions ---

    #[test]
    fn test_paiements_par_pce_bucket_non_renseigne() {
        let mut p1 = paiement(100.0, "2025-01-10", 1, "2025-01-05");
        p1.pce = Some("0176-12".into());
        let p2 = paiement(300.0, "2025-02-10", 2, "2025-01-05");

        let repartition = compute_paiements_par_pce(2025, &[p1, p2], 1000.0);
        assert_eq!(repartition.groupes.len(), 2);
        assert_eq!(repartition.groupes[0].libelle, NON_RENSEIGNE);
        assert_eq!(repartition.groupes[0].montant_ttc, 300.0);
        assert_eq!(repartition.groupes[1].libelle, "0176-12");
        assert_eq!(repartition.total.nb, 2);
        assert_eq!(repartition.total.montant_ttc, 400.0);
    }

    #[test]
    fn test_paiements_par_sgami_tri_decroissant() {
        let mut p1 = paiement(100.0, "2025-01-10", 1, "2025-01-05");
        p1.sgami = "Nord".into();
        let mut p2 = paiement(500.0, "2025-01-11", 2, "2025-01-05");
        p2.sgami = "Sud".into();
        let mut p3 = paiement(50.0, "2025-01-12", 3, "2025-01-05");
        p3.sgami = "Nord".into();

        let repartition = compute_paiements_par_sgami(2025, &[p1, p2, p3], 0.0);
        assert_eq!(repartition.groupes[0].libelle, "Sud");
        assert_eq!(repartition.groupes[1].libelle, "Nord");
        assert_eq!(repartition.groupes[1].nb, 2);
        assert_eq!(repartition.groupes[1].montant_ttc, 150.0);
    }

    // --- série mensuelle dépenses ---

    #[test]
    fn test_depenses_mensuelles_deux_series() {
        let paiements = vec![
            // Dossier créé en janvier, payé en mars
            paiement(600.0, "2025-03-10", 1, "2025-01-05"),
            // Dossier créé en 2024 : série dossiers ignorée, série paiements comptée
            paiement(400.0, "2025-02-10", 2, "2024-06-01"),
        ];
        let serie = compute_depenses_mensuelles(2025, &paiements, 2000.0);
        assert_eq!(serie.mois[0].montant_dossiers, 600.0);
        assert_eq!(serie.mois[0].montant_paiements, 0.0);
        assert_eq!(serie.mois[1].montant_paiements, 400.0);
        assert_eq!(serie.mois[2].montant_paiements, 600.0);
        assert_eq!(serie.total.montant_dossiers, 600.0);
        assert_eq!(serie.total.montant_paiements, 1000.0);
        assert_eq!(serie.total.pourcentage_paiements, 50.0);
    }
}
