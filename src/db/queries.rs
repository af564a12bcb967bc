use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params_from_iter, types::Value, Connection};

use super::filtres::{appliquer_filtres, Filtre};
use crate::error::AppError;

// ─── Enregistrements typés renvoyés au moteur de calcul ──────────────────────

#[derive(Debug, Clone)]
pub struct DemandeStat {
    pub id: i64,
    pub type_demande: String,
    pub date_reception: NaiveDateTime,
    pub redacteur_id: Option<i64>,
    pub bap_id: Option<i64>,
    pub qualification_infraction: Option<String>,
    pub contexte_mission: Option<String>,
    pub formation_administrative: Option<String>,
    pub branche: Option<String>,
    pub statut_demandeur: Option<String>,
}

/// Un lien décision↔demande. Une décision couvrant k demandes produit
/// k liens ; chacun compte séparément dans les agrégats.
#[derive(Debug, Clone)]
pub struct LienDecision {
    pub decision_id: i64,
    pub demande_id: i64,
    pub type_decision: String,
    pub date_signature: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct ConventionStat {
    pub id: i64,
    pub type_convention: String,
    pub montant_ht: f64,
    pub date_creation: NaiveDateTime,
    pub date_retour_signee: Option<NaiveDateTime>,
    pub sgami: String,
}

#[derive(Debug, Clone)]
pub struct PaiementStat {
    pub id: i64,
    pub montant_ht: Option<f64>,
    pub montant_ttc: f64,
    pub date_creation: NaiveDateTime,
    pub sgami: String,
    pub pce: Option<String>,
    pub dossier_id: i64,
    pub date_creation_dossier: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Redacteur {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub role: String,
}

// ─── Helpers privés ──────────────────────────────────────────────────────────

fn parser_date(s: &str) -> Result<NaiveDateTime, rusqlite::Error> {
    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::DateInvalide(s.to_string())),
            )
        })
}

fn parser_date_opt(s: Option<String>) -> Result<Option<NaiveDateTime>, rusqlite::Error> {
    match s {
        Some(s) => parser_date(&s).map(Some),
        None => Ok(None),
    }
}

fn demandes_avec_filtres(
    conn: &Connection,
    filtres: &[Filtre],
) -> Result<Vec<DemandeStat>, rusqlite::Error> {
    let mut sql = String::from(
        "SELECT id, type_demande, date_reception, redacteur_id, bap_id,
                qualification_infraction, contexte_mission, formation_administrative,
                branche, statut_demandeur
         FROM demandes WHERE 1=1",
    );
    let mut params: Vec<Value> = Vec::new();
    appliquer_filtres(&mut sql, &mut params, filtres);
    sql.push_str(" ORDER BY date_reception, id");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<i64>>(3)?,
            row.get::<_, Option<i64>>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, Option<String>>(6)?,
            row.get::<_, Option<String>>(7)?,
            row.get::<_, Option<String>>(8)?,
            row.get::<_, Option<String>>(9)?,
        ))
    })?;

    let mut demandes = Vec::new();
    for row in rows {
        let (id, type_demande, reception, redacteur_id, bap_id, quali, contexte, formation, branche, statut) =
            row?;
        demandes.push(DemandeStat {
            id,
            type_demande,
            date_reception: parser_date(&reception)?,
            redacteur_id,
            bap_id,
            qualification_infraction: quali,
            contexte_mission: contexte,
            formation_administrative: formation,
            branche,
            statut_demandeur: statut,
        });
    }
    Ok(demandes)
}

fn liens_avec_filtres(
    conn: &Connection,
    filtres: &[Filtre],
) -> Result<Vec<LienDecision>, rusqlite::Error> {
    let mut sql = String::from(
        "SELECT dd.decision_id, dd.demande_id, d.type_decision, d.date_signature
         FROM decision_demandes dd
         JOIN decisions d ON d.id = dd.decision_id
         JOIN demandes dm ON dm.id = dd.demande_id
         WHERE 1=1",
    );
    let mut params: Vec<Value> = Vec::new();
    appliquer_filtres(&mut sql, &mut params, filtres);
    sql.push_str(" ORDER BY dd.decision_id, dd.demande_id");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut liens = Vec::new();
    for row in rows {
        let (decision_id, demande_id, type_decision, signature) = row?;
        liens.push(LienDecision {
            decision_id,
            demande_id,
            type_decision,
            date_signature: parser_date_opt(signature)?,
        });
    }
    Ok(liens)
}

// ─── Fonctions de requête publiques ──────────────────────────────────────────

/// Demandes reçues dans l'année (fenêtre semi-ouverte).
pub fn get_demandes_annee(
    conn: &Connection,
    annee: i32,
) -> Result<Vec<DemandeStat>, rusqlite::Error> {
    demandes_avec_filtres(conn, &[Filtre::plage_annee("date_reception", annee)])
}

/// Liens décision↔demande dont la demande a été reçue dans l'année.
/// La date de signature n'est pas filtrée ici : le moteur en a besoin pour
/// distinguer traité/en cours indépendamment de l'année de signature.
pub fn get_liens_decisions_annee(
    conn: &Connection,
    annee: i32,
) -> Result<Vec<LienDecision>, rusqlite::Error> {
    liens_avec_filtres(conn, &[Filtre::plage_annee("dm.date_reception", annee)])
}

/// Liens décision↔demande dont la demande a été reçue dans [debut, fin).
pub fn get_liens_decisions_fenetre(
    conn: &Connection,
    debut: NaiveDate,
    fin: NaiveDate,
) -> Result<Vec<LienDecision>, rusqlite::Error> {
    liens_avec_filtres(conn, &[Filtre::plage_dates("dm.date_reception", debut, fin)])
}

fn dates_reception_avec_filtres(
    conn: &Connection,
    filtres: &[Filtre],
) -> Result<Vec<NaiveDateTime>, rusqlite::Error> {
    let mut sql = String::from("SELECT date_reception FROM demandes WHERE 1=1");
    let mut params: Vec<Value> = Vec::new();
    appliquer_filtres(&mut sql, &mut params, filtres);

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        row.get::<_, String>(0)
    })?;

    let mut dates = Vec::new();
    for row in rows {
        dates.push(parser_date(&row?)?);
    }
    Ok(dates)
}

/// Dates de réception seules, pour la colonne de comparaison N-1 du flux
/// mensuel.
pub fn get_dates_reception_annee(
    conn: &Connection,
    annee: i32,
) -> Result<Vec<NaiveDateTime>, rusqlite::Error> {
    dates_reception_avec_filtres(conn, &[Filtre::plage_annee("date_reception", annee)])
}

/// Dates de réception dans la fenêtre [debut, fin), pour le flux hebdomadaire.
pub fn get_dates_reception_fenetre(
    conn: &Connection,
    debut: NaiveDate,
    fin: NaiveDate,
) -> Result<Vec<NaiveDateTime>, rusqlite::Error> {
    dates_reception_avec_filtres(conn, &[Filtre::plage_dates("date_reception", debut, fin)])
}

/// Conventions et avenants concernés par l'année : créés dans l'année ou
/// retournés signés dans l'année.
pub fn get_conventions_annee(
    conn: &Connection,
    annee: i32,
) -> Result<Vec<ConventionStat>, rusqlite::Error> {
    let min = format!("{:04}-01-01 00:00:00", annee);
    let max = format!("{:04}-01-01 00:00:00", annee + 1);

    let mut stmt = conn.prepare_cached(
        "SELECT c.id, c.type_convention, c.montant_ht, c.date_creation,
                c.date_retour_signee, s.nom
         FROM conventions c
         JOIN sgami s ON s.id = c.sgami_id
         WHERE (c.date_creation >= ?1 AND c.date_creation < ?2)
            OR (c.date_retour_signee >= ?1 AND c.date_retour_signee < ?2)
         ORDER BY c.date_creation, c.id",
    )?;
    let rows = stmt.query_map(rusqlite::params![min, max], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut conventions = Vec::new();
    for row in rows {
        let (id, type_convention, montant_ht, creation, retour, sgami) = row?;
        conventions.push(ConventionStat {
            id,
            type_convention,
            montant_ht,
            date_creation: parser_date(&creation)?,
            date_retour_signee: parser_date_opt(retour)?,
            sgami,
        });
    }
    Ok(conventions)
}

/// Paiements enregistrés dans l'année, avec leur SGAMI, leur ligne
/// budgétaire (PCE) éventuelle et la date de création du dossier.
pub fn get_paiements_annee(
    conn: &Connection,
    annee: i32,
) -> Result<Vec<PaiementStat>, rusqlite::Error> {
    let mut sql = String::from(
        "SELECT p.id, p.montant_ht, p.montant_ttc, p.date_creation,
                s.nom, pc.code, p.dossier_id, dos.date_creation
         FROM paiements p
         JOIN sgami s ON s.id = p.sgami_id
         JOIN dossiers dos ON dos.id = p.dossier_id
         LEFT JOIN pce pc ON pc.id = p.pce_id
         WHERE 1=1",
    );
    let mut params: Vec<Value> = Vec::new();
    appliquer_filtres(
        &mut sql,
        &mut params,
        &[Filtre::plage_annee("p.date_creation", annee)],
    );
    sql.push_str(" ORDER BY p.date_creation, p.id");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<f64>>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, i64>(6)?,
            row.get::<_, String>(7)?,
        ))
    })?;

    let mut paiements = Vec::new();
    for row in rows {
        let (id, ht, ttc, creation, sgami, pce, dossier_id, creation_dossier) = row?;
        paiements.push(PaiementStat {
            id,
            montant_ht: ht,
            montant_ttc: ttc,
            date_creation: parser_date(&creation)?,
            sgami,
            pce,
            dossier_id,
            date_creation_dossier: parser_date(&creation_dossier)?,
        });
    }
    Ok(paiements)
}

/// Enveloppe budgétaire de l'année : budget de base + abondements,
/// 0 si aucune ligne n'existe (jamais une erreur).
pub fn get_budget_total_annee(conn: &Connection, annee: i32) -> Result<f64, rusqlite::Error> {
    let total = conn
        .query_row(
            "SELECT budget_base + abondements FROM budgets_annuels WHERE annee = ?1",
            rusqlite::params![annee],
            |row| row.get::<_, f64>(0),
        )
        .unwrap_or(0.0);
    Ok(total)
}

/// Agents actifs dont le rôle appartient à l'ensemble fourni, triés par
/// rôle puis nom (l'ordre du rapport de charge).
pub fn get_redacteurs_actifs(
    conn: &Connection,
    roles: &[String],
) -> Result<Vec<Redacteur>, rusqlite::Error> {
    let mut sql = String::from("SELECT id, nom, prenom, role FROM utilisateurs WHERE actif = 1");
    let mut params: Vec<Value> = Vec::new();
    appliquer_filtres(
        &mut sql,
        &mut params,
        &[Filtre::MultiSelection {
            champ: "role",
            valeurs: roles.to_vec(),
        }],
    );
    sql.push_str(" ORDER BY role, nom, prenom");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok(Redacteur {
            id: row.get(0)?,
            nom: row.get(1)?,
            prenom: row.get(2)?,
            role: row.get(3)?,
        })
    })?;
    rows.collect()
}

/// Pour chaque demande de l'année, ses libellés de badge (aucune ligne badge
/// → `None`, la demande compte alors dans « Non renseigné »).
pub fn get_badges_demandes_annee(
    conn: &Connection,
    annee: i32,
) -> Result<Vec<(i64, Option<String>)>, rusqlite::Error> {
    let mut sql = String::from(
        "SELECT dm.id, b.libelle
         FROM demandes dm
         LEFT JOIN demande_badges db ON db.demande_id = dm.id
         LEFT JOIN badges b ON b.id = db.badge_id
         WHERE 1=1",
    );
    let mut params: Vec<Value> = Vec::new();
    appliquer_filtres(
        &mut sql,
        &mut params,
        &[Filtre::plage_annee("dm.date_reception", annee)],
    );
    sql.push_str(" ORDER BY dm.date_reception, dm.id");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
    })?;
    rows.collect()
}
