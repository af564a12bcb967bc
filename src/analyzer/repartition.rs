//! Répartitions catégorielles : comptage par libellé, pourcentage du total
//! annuel, tri décroissant stable.

use std::collections::HashMap;

use serde::Serialize;

use super::agregats::{arrondi2, pourcentage};

/// Libellé substitué aux champs absents ou vides.
pub const NON_RENSEIGNE: &str = "Non renseigné";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorieStat {
    pub categorie: String,
    pub count: usize,
    pub pourcentage: f64,
}

fn normaliser(valeur: Option<&str>) -> String {
    match valeur {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NON_RENSEIGNE.to_string(),
    }
}

/// Comptage en ordre de rencontre puis tri stable par count décroissant :
/// les ex æquo conservent leur ordre d'apparition.
fn compter(libelles: impl Iterator<Item = String>, base: usize) -> Vec<CategorieStat> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut comptes: Vec<(String, usize)> = Vec::new();

    for libelle in libelles {
        match index.get(&libelle) {
            Some(&i) => comptes[i].1 += 1,
            None => {
                index.insert(libelle.clone(), comptes.len());
                comptes.push((libelle, 1));
            }
        }
    }

    let mut stats: Vec<CategorieStat> = comptes
        .into_iter()
        .map(|(categorie, count)| CategorieStat {
            categorie,
            count,
            pourcentage: arrondi2(pourcentage(count as f64, base as f64)),
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Répartition sur un champ exclusif : une valeur (éventuellement absente)
/// par demande. La somme des counts vaut le nombre de demandes.
pub fn repartition_exclusive(valeurs: &[Option<String>]) -> Vec<CategorieStat> {
    compter(
        valeurs.iter().map(|v| normaliser(v.as_deref())),
        valeurs.len(),
    )
}

/// Répartition sur les badges : une demande à N badges alimente N catégories,
/// une demande sans badge compte dans « Non renseigné ». La base des
/// pourcentages reste le nombre de demandes.
pub fn repartition_badges(badges_par_demande: &[Vec<String>]) -> Vec<CategorieStat> {
    let base = badges_par_demande.len();
    let libelles = badges_par_demande.iter().flat_map(|badges| {
        if badges.is_empty() {
            vec![NON_RENSEIGNE.to_string()]
        } else {
            badges.clone()
        }
    });
    compter(libelles, base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_repartition_vide() {
        assert!(repartition_exclusive(&[]).is_empty());
    }

    #[test]
    fn test_tri_decroissant() {
        let valeurs = vec![opt("B"), opt("A"), opt("B"), opt("B"), opt("A"), opt("C")];
        let stats = repartition_exclusive(&valeurs);
        assert_eq!(stats[0].categorie, "B");
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[1].categorie, "A");
        assert_eq!(stats[2].categorie, "C");
    }

    #[test]
    fn test_tri_stable_ex_aequo() {
        // "Menaces" rencontré avant "Outrage", même count : il reste devant
        let valeurs = vec![opt("Menaces"), opt("Outrage"), opt("Menaces"), opt("Outrage")];
        let stats = repartition_exclusive(&valeurs);
        assert_eq!(stats[0].categorie, "Menaces");
        assert_eq!(stats[1].categorie, "Outrage");
    }

    #[test]
    fn test_non_renseigne() {
        let valeurs = vec![opt("GD"), None, opt(""), opt("   ")];
        let stats = repartition_exclusive(&valeurs);
        let nr = stats
            .iter()
            .find(|s| s.categorie == NON_RENSEIGNE)
            .expect("bucket Non renseigné attendu");
        assert_eq!(nr.count, 3);
    }

    #[test]
    fn test_completude_et_pourcentages() {
        let valeurs = vec![opt("A"), opt("A"), opt("B"), None];
        let stats = repartition_exclusive(&valeurs);
        let total: usize = stats.iter().map(|s| s.count).sum();
        assert_eq!(total, valeurs.len());
        let somme_pct: f64 = stats.iter().map(|s| s.pourcentage).sum();
        assert!((somme_pct - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_pourcentages_nuls_si_vide() {
        let stats = repartition_badges(&[]);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_badges_eventail() {
        // 3 demandes : 2 badges, 1 badge, aucun badge
        let badges = vec![
            vec!["Escorte".to_string(), "Signalement".to_string()],
            vec!["Escorte".to_string()],
            vec![],
        ];
        let stats = repartition_badges(&badges);
        let total: usize = stats.iter().map(|s| s.count).sum();
        assert_eq!(total, 4); // 2 + 1 + 1 (Non renseigné)

        let escorte = stats.iter().find(|s| s.categorie == "Escorte").unwrap();
        assert_eq!(escorte.count, 2);
        // Base des pourcentages = 3 demandes, pas 4 occurrences
        assert!((escorte.pourcentage - arrondi2(200.0 / 3.0)).abs() < 1e-9);

        assert!(stats.iter().any(|s| s.categorie == NON_RENSEIGNE));
    }
}
