use serde::{Deserialize, Serialize};

use crate::analyzer::repartition::{repartition_badges, repartition_exclusive, CategorieStat};
use crate::db::queries::{self, DemandeStat};
use crate::state::{AppState, DbAccess};

use super::{annee_ou_courante, trace_erreur};

/// Champ catégoriel sur lequel ventiler les demandes de l'année.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChampCategorie {
    QualificationInfraction,
    ContexteMission,
    FormationAdministrative,
    Branche,
    StatutDemandeur,
    /// Seul champ multi-valué : une demande peut porter plusieurs badges,
    /// chacun compte une occurrence.
    Badge,
}

impl ChampCategorie {
    fn libelle(self) -> &'static str {
        match self {
            ChampCategorie::QualificationInfraction => "qualification_infraction",
            ChampCategorie::ContexteMission => "contexte_mission",
            ChampCategorie::FormationAdministrative => "formation_administrative",
            ChampCategorie::Branche => "branche",
            ChampCategorie::StatutDemandeur => "statut_demandeur",
            ChampCategorie::Badge => "badge",
        }
    }

    fn extraire(self, demande: &DemandeStat) -> Option<String> {
        match self {
            ChampCategorie::QualificationInfraction => demande.qualification_infraction.clone(),
            ChampCategorie::ContexteMission => demande.contexte_mission.clone(),
            ChampCategorie::FormationAdministrative => demande.formation_administrative.clone(),
            ChampCategorie::Branche => demande.branche.clone(),
            ChampCategorie::StatutDemandeur => demande.statut_demandeur.clone(),
            ChampCategorie::Badge => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RapportRepartition {
    pub annee: i32,
    pub champ: String,
    pub total_demandes: usize,
    pub categories: Vec<CategorieStat>,
}

/// Ventilation des demandes reçues dans l'année selon un champ catégoriel.
/// Les pourcentages sont toujours rapportés au nombre de demandes, y compris
/// pour les badges où la somme peut dépasser 100.
pub fn rapport_repartition(
    state: &AppState,
    champ: ChampCategorie,
    annee: Option<i32>,
) -> Result<RapportRepartition, String> {
    let annee = annee_ou_courante(annee);
    let resultat = state.db(|conn| {
        let (total_demandes, categories) = match champ {
            ChampCategorie::Badge => {
                let lignes = queries::get_badges_demandes_annee(conn, annee)?;
                let groupes = regrouper_badges(lignes);
                (groupes.len(), repartition_badges(&groupes))
            }
            _ => {
                let demandes = queries::get_demandes_annee(conn, annee)?;
                let valeurs: Vec<Option<String>> =
                    demandes.iter().map(|d| champ.extraire(d)).collect();
                (demandes.len(), repartition_exclusive(&valeurs))
            }
        };
        Ok(RapportRepartition {
            annee,
            champ: champ.libelle().to_string(),
            total_demandes,
            categories,
        })
    });
    trace_erreur("répartition", annee, resultat)
}

/// Replie les lignes (demande_id, badge) — triées par demande — en une liste
/// de badges par demande. Une demande sans badge produit une liste vide.
fn regrouper_badges(lignes: Vec<(i64, Option<String>)>) -> Vec<Vec<String>> {
    let mut groupes: Vec<(i64, Vec<String>)> = Vec::new();
    for (demande_id, badge) in lignes {
        match groupes.last_mut() {
            Some((id, badges)) if *id == demande_id => {
                if let Some(libelle) = badge {
                    badges.push(libelle);
                }
            }
            _ => groupes.push((demande_id, badge.into_iter().collect())),
        }
    }
    groupes.into_iter().map(|(_, badges)| badges).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regrouper_badges() {
        let lignes = vec![
            (1, Some("Urgent".to_string())),
            (1, Some("Signalé".to_string())),
            (2, None),
            (3, Some("Urgent".to_string())),
        ];
        let groupes = regrouper_badges(lignes);
        assert_eq!(groupes.len(), 3);
        assert_eq!(groupes[0], vec!["Urgent", "Signalé"]);
        assert!(groupes[1].is_empty());
        assert_eq!(groupes[2], vec!["Urgent"]);
    }

    #[test]
    fn test_libelles_champs() {
        assert_eq!(ChampCategorie::Branche.libelle(), "branche");
        assert_eq!(ChampCategorie::Badge.libelle(), "badge");
    }
}
