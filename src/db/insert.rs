use chrono::NaiveDateTime;
use rusqlite::Connection;

fn fmt_date(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn fmt_date_opt(dt: Option<NaiveDateTime>) -> Option<String> {
    dt.map(fmt_date)
}

pub struct NouvelleDemande<'a> {
    pub type_demande: &'a str,
    pub date_reception: NaiveDateTime,
    pub redacteur_id: Option<i64>,
    pub bap_id: Option<i64>,
    pub qualification_infraction: Option<&'a str>,
    pub contexte_mission: Option<&'a str>,
    pub formation_administrative: Option<&'a str>,
    pub branche: Option<&'a str>,
    pub statut_demandeur: Option<&'a str>,
}

pub struct NouvelleConvention<'a> {
    pub type_convention: &'a str,
    pub montant_ht: f64,
    pub date_creation: NaiveDateTime,
    pub date_retour_signee: Option<NaiveDateTime>,
    pub sgami_id: i64,
}

pub struct NouveauPaiement {
    pub montant_ht: Option<f64>,
    pub montant_ttc: f64,
    pub date_creation: NaiveDateTime,
    pub sgami_id: i64,
    pub pce_id: Option<i64>,
    pub dossier_id: i64,
}

pub fn inserer_utilisateur(
    conn: &Connection,
    nom: &str,
    prenom: &str,
    role: &str,
    actif: bool,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO utilisateurs (nom, prenom, role, actif) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![nom, prenom, role, actif as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_sgami(conn: &Connection, nom: &str) -> Result<i64, rusqlite::Error> {
    conn.execute("INSERT INTO sgami (nom) VALUES (?1)", rusqlite::params![nom])?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_pce(conn: &Connection, code: &str) -> Result<i64, rusqlite::Error> {
    conn.execute("INSERT INTO pce (code) VALUES (?1)", rusqlite::params![code])?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_bap(conn: &Connection, nom: &str) -> Result<i64, rusqlite::Error> {
    conn.execute("INSERT INTO bap (nom) VALUES (?1)", rusqlite::params![nom])?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_badge(conn: &Connection, libelle: &str) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO badges (libelle) VALUES (?1)",
        rusqlite::params![libelle],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_dossier(
    conn: &Connection,
    date_creation: NaiveDateTime,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO dossiers (date_creation) VALUES (?1)",
        rusqlite::params![fmt_date(date_creation)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_demande(
    conn: &Connection,
    demande: &NouvelleDemande,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO demandes (
            type_demande, date_reception, redacteur_id, bap_id,
            qualification_infraction, contexte_mission, formation_administrative,
            branche, statut_demandeur
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            demande.type_demande,
            fmt_date(demande.date_reception),
            demande.redacteur_id,
            demande.bap_id,
            demande.qualification_infraction,
            demande.contexte_mission,
            demande.formation_administrative,
            demande.branche,
            demande.statut_demandeur,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn associer_badge(
    conn: &Connection,
    demande_id: i64,
    badge_id: i64,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR IGNORE INTO demande_badges (demande_id, badge_id) VALUES (?1, ?2)",
        rusqlite::params![demande_id, badge_id],
    )?;
    Ok(())
}

/// Insère une décision et ses liens vers une ou plusieurs demandes,
/// dans une même transaction.
pub fn inserer_decision(
    conn: &Connection,
    type_decision: &str,
    motif_rejet: Option<&str>,
    date_signature: Option<NaiveDateTime>,
    demande_ids: &[i64],
) -> Result<i64, rusqlite::Error> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO decisions (type_decision, motif_rejet, date_signature) VALUES (?1, ?2, ?3)",
        rusqlite::params![type_decision, motif_rejet, fmt_date_opt(date_signature)],
    )?;
    let decision_id = tx.last_insert_rowid();
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO decision_demandes (decision_id, demande_id) VALUES (?1, ?2)",
        )?;
        for demande_id in demande_ids {
            stmt.execute(rusqlite::params![decision_id, demande_id])?;
        }
    }
    tx.commit()?;
    Ok(decision_id)
}

pub fn inserer_convention(
    conn: &Connection,
    convention: &NouvelleConvention,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO conventions (
            type_convention, montant_ht, date_creation, date_retour_signee, sgami_id
        ) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            convention.type_convention,
            convention.montant_ht,
            fmt_date(convention.date_creation),
            fmt_date_opt(convention.date_retour_signee),
            convention.sgami_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_paiement(
    conn: &Connection,
    paiement: &NouveauPaiement,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO paiements (
            montant_ht, montant_ttc, date_creation, sgami_id, pce_id, dossier_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            paiement.montant_ht,
            paiement.montant_ttc,
            fmt_date(paiement.date_creation),
            paiement.sgami_id,
            paiement.pce_id,
            paiement.dossier_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn inserer_budget_annuel(
    conn: &Connection,
    annee: i32,
    budget_base: f64,
    abondements: f64,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO budgets_annuels (annee, budget_base, abondements) VALUES (?1, ?2, ?3)",
        rusqlite::params![annee, budget_base, abondements],
    )?;
    Ok(conn.last_insert_rowid())
}
