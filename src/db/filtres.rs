use chrono::NaiveDate;
use rusqlite::types::Value;

/// Variantes composables pour l'assemblage dynamique de clauses WHERE,
/// partagées par les requêtes de rapports et la couche CRUD.
///
/// `Plage` est semi-ouverte : borne basse incluse, borne haute exclue — la
/// convention de toutes les fenêtres annuelles du moteur.
pub enum Filtre {
    Plage {
        champ: &'static str,
        min: Option<String>,
        max: Option<String>,
    },
    MultiSelection {
        champ: &'static str,
        valeurs: Vec<String>,
    },
    Texte {
        champ: &'static str,
        motif: String,
    },
}

impl Filtre {
    /// Fenêtre annuelle semi-ouverte [1er janvier, 1er janvier de annee+1).
    pub fn plage_annee(champ: &'static str, annee: i32) -> Filtre {
        Filtre::Plage {
            champ,
            min: Some(format!("{:04}-01-01 00:00:00", annee)),
            max: Some(format!("{:04}-01-01 00:00:00", annee + 1)),
        }
    }

    /// Fenêtre de dates semi-ouverte [debut, fin).
    pub fn plage_dates(champ: &'static str, debut: NaiveDate, fin: NaiveDate) -> Filtre {
        Filtre::Plage {
            champ,
            min: Some(format!("{} 00:00:00", debut.format("%Y-%m-%d"))),
            max: Some(format!("{} 00:00:00", fin.format("%Y-%m-%d"))),
        }
    }
}

/// Ajoute les conditions WHERE correspondant aux filtres fournis.
/// `params` est alimenté au fur et à mesure ; le ?N correspondant est calculé
/// d'après `params.len()` après push (les paramètres SQLite sont 1-indexés).
pub fn appliquer_filtres(sql: &mut String, params: &mut Vec<Value>, filtres: &[Filtre]) {
    for filtre in filtres {
        match filtre {
            Filtre::Plage { champ, min, max } => {
                if let Some(min) = min {
                    params.push(Value::Text(min.clone()));
                    sql.push_str(&format!(" AND {} >= ?{}", champ, params.len()));
                }
                if let Some(max) = max {
                    params.push(Value::Text(max.clone()));
                    sql.push_str(&format!(" AND {} < ?{}", champ, params.len()));
                }
            }
            Filtre::MultiSelection { champ, valeurs } => {
                if valeurs.is_empty() {
                    continue;
                }
                let mut places = Vec::with_capacity(valeurs.len());
                for v in valeurs {
                    params.push(Value::Text(v.clone()));
                    places.push(format!("?{}", params.len()));
                }
                sql.push_str(&format!(" AND {} IN ({})", champ, places.join(", ")));
            }
            Filtre::Texte { champ, motif } => {
                params.push(Value::Text(format!("%{}%", motif)));
                sql.push_str(&format!(" AND {} LIKE ?{}", champ, params.len()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texte(v: &Value) -> &str {
        match v {
            Value::Text(s) => s,
            _ => panic!("paramètre texte attendu"),
        }
    }

    #[test]
    fn test_plage_annee_semi_ouverte() {
        let mut sql = String::from("SELECT * FROM demandes WHERE 1=1");
        let mut params = Vec::new();
        appliquer_filtres(
            &mut sql,
            &mut params,
            &[Filtre::plage_annee("date_reception", 2025)],
        );
        assert_eq!(
            sql,
            "SELECT * FROM demandes WHERE 1=1 AND date_reception >= ?1 AND date_reception < ?2"
        );
        assert_eq!(texte(&params[0]), "2025-01-01 00:00:00");
        assert_eq!(texte(&params[1]), "2026-01-01 00:00:00");
    }

    #[test]
    fn test_multi_selection() {
        let mut sql = String::from("SELECT * FROM utilisateurs WHERE actif = 1");
        let mut params = Vec::new();
        appliquer_filtres(
            &mut sql,
            &mut params,
            &[Filtre::MultiSelection {
                champ: "role",
                valeurs: vec!["ADMIN".into(), "REDACTEUR".into()],
            }],
        );
        assert!(sql.ends_with(" AND role IN (?1, ?2)"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_multi_selection_vide_sans_effet() {
        let mut sql = String::from("SELECT 1 WHERE 1=1");
        let mut params = Vec::new();
        appliquer_filtres(
            &mut sql,
            &mut params,
            &[Filtre::MultiSelection {
                champ: "role",
                valeurs: vec![],
            }],
        );
        assert_eq!(sql, "SELECT 1 WHERE 1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_texte_like() {
        let mut sql = String::from("SELECT * FROM demandes WHERE 1=1");
        let mut params = Vec::new();
        appliquer_filtres(
            &mut sql,
            &mut params,
            &[Filtre::Texte {
                champ: "qualification_infraction",
                motif: "menace".into(),
            }],
        );
        assert!(sql.ends_with(" AND qualification_infraction LIKE ?1"));
        assert_eq!(texte(&params[0]), "%menace%");
    }

    #[test]
    fn test_filtres_combines_numerotation() {
        let mut sql = String::from("SELECT * FROM demandes WHERE 1=1");
        let mut params = Vec::new();
        appliquer_filtres(
            &mut sql,
            &mut params,
            &[
                Filtre::plage_annee("date_reception", 2024),
                Filtre::Texte {
                    champ: "branche",
                    motif: "GD".into(),
                },
            ],
        );
        assert!(sql.contains("?1") && sql.contains("?2") && sql.contains("?3"));
        assert_eq!(params.len(), 3);
    }
}
