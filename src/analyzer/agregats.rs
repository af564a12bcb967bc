//! Réducteurs génériques partagés par tous les rapports. Fonctions pures :
//! aucune ne modifie son entrée, toutes sont déterministes.

use std::collections::HashMap;
use std::hash::Hash;

/// Somme d'un champ numérique sur une collection.
pub fn somme_par<T, F>(records: &[T], valeur: F) -> f64
where
    F: Fn(&T) -> f64,
{
    records.iter().map(valeur).sum()
}

/// Moyenne d'un champ numérique. 0.0 si la collection est vide.
pub fn moyenne_par<T, F>(records: &[T], valeur: F) -> f64
where
    F: Fn(&T) -> f64,
{
    if records.is_empty() {
        return 0.0;
    }
    somme_par(records, valeur) / records.len() as f64
}

/// Regroupe par clé et somme un champ numérique au sein de chaque groupe.
pub fn grouper_et_sommer<T, K, FK, FV>(records: &[T], cle: FK, valeur: FV) -> HashMap<K, f64>
where
    K: Eq + Hash,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> f64,
{
    let mut groupes: HashMap<K, f64> = HashMap::new();
    for r in records {
        *groupes.entry(cle(r)).or_insert(0.0) += valeur(r);
    }
    groupes
}

/// Série des totaux cumulés : l'élément i vaut la somme des éléments 0..=i.
pub fn cumuls(valeurs: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    valeurs
        .iter()
        .map(|v| {
            total += v;
            total
        })
        .collect()
}

/// Pourcentage de `valeur` par rapport à `base`. Retourne 0.0 quand la base
/// est nulle ou négative : jamais de NaN ni d'infini dans une sortie.
pub fn pourcentage(valeur: f64, base: f64) -> f64 {
    if base > 0.0 {
        valeur / base * 100.0
    } else {
        0.0
    }
}

/// Arrondi à 2 décimales, appliqué uniquement à la construction des sorties.
/// Les accumulations internes restent en pleine précision.
pub fn arrondi2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ligne {
        montant: f64,
        groupe: &'static str,
    }

    fn lignes() -> Vec<Ligne> {
        vec![
            Ligne { montant: 100.0, groupe: "A" },
            Ligne { montant: 250.5, groupe: "B" },
            Ligne { montant: 49.5, groupe: "A" },
        ]
    }

    #[test]
    fn test_somme_par() {
        assert_eq!(somme_par(&lignes(), |l| l.montant), 400.0);
        assert_eq!(somme_par::<Ligne, _>(&[], |l| l.montant), 0.0);
    }

    #[test]
    fn test_moyenne_par() {
        let m = moyenne_par(&lignes(), |l| l.montant);
        assert!((m - 400.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_moyenne_par_vide() {
        assert_eq!(moyenne_par::<Ligne, _>(&[], |l| l.montant), 0.0);
    }

    #[test]
    fn test_grouper_et_sommer() {
        let groupes = grouper_et_sommer(&lignes(), |l| l.groupe, |l| l.montant);
        assert_eq!(groupes.len(), 2);
        assert!((groupes["A"] - 149.5).abs() < 1e-10);
        assert!((groupes["B"] - 250.5).abs() < 1e-10);
    }

    #[test]
    fn test_cumuls() {
        assert_eq!(cumuls(&[1.0, 2.0, 3.0]), vec![1.0, 3.0, 6.0]);
        assert_eq!(cumuls(&[]), Vec::<f64>::new());
    }

    #[test]
    fn test_cumuls_monotones_si_positifs() {
        let serie = cumuls(&[5.0, 0.0, 12.5, 0.0, 3.0]);
        for fenetre in serie.windows(2) {
            assert!(fenetre[1] >= fenetre[0]);
        }
    }

    #[test]
    fn test_pourcentage_base_nulle() {
        // Jamais NaN ni infini, quelle que soit la valeur
        assert_eq!(pourcentage(42.0, 0.0), 0.0);
        assert_eq!(pourcentage(0.0, 0.0), 0.0);
        assert_eq!(pourcentage(-1.0, 0.0), 0.0);
        assert!(pourcentage(1.0, 0.0).is_finite());
    }

    #[test]
    fn test_pourcentage_zero_sur_base_positive() {
        assert_eq!(pourcentage(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_pourcentage_nominal() {
        assert!((pourcentage(25.0, 200.0) - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_arrondi2() {
        assert_eq!(arrondi2(1.006), 1.01);
        assert_eq!(arrondi2(1234.5678), 1234.57);
        assert_eq!(arrondi2(-0.125), -0.13);
    }
}
