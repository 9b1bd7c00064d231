//! Prompt templates sent to the model.
//!
//! Each template pins the answer to a fixed HTML layout (headed sections and
//! lists, no code fences) so the dashboard can inject it as is.

use crate::models::{MatchFacts, Snapshot};

const COACH_INTRO: &str = "Tu es un coach Challenger sur League of Legends.";

const HTML_ONLY: &str =
    "Réponds UNIQUEMENT en HTML brut, sans bloc ```html, sans <html>, <body> ni doctype.";

pub const NO_HISTORY: &str = "Aucun historique.";

/// Game plan for the first two minutes: matchup and rosters only
pub fn early_game_prompt(facts: &MatchFacts) -> String {
    format!(
        "{COACH_INTRO} La partie démarre, prépare un plan de jeu complet.\n\n\
         JOUEUR: {champion} (moi) - Rôle: {position}\n\
         ADVERSAIRE DE LANE: {opponent}\n\
         MON ÉQUIPE: {own}\n\
         ÉQUIPE ADVERSE: {enemy}\n\
         MODE DE JEU: {mode}\n\n\
         INSTRUCTIONS:\n\
         1. Donne les conditions de victoire et le plan global de la partie.\n\
         2. Donne les 6 items du build final dans l'ordre d'achat.\n\
         3. Donne des conseils de phase de lane contre {opponent}.\n\
         4. {HTML_ONLY}\n\n\
         STRUCTURE ATTENDUE:\n\
         <h3>🗺️ Plan de Jeu & Conditions de Victoire</h3><ul><li>...</li></ul>\n\
         <h3>⚔️ Matchup contre {opponent}</h3><ul><li>...</li></ul>\n\
         <h3>📦 Build Final (6 items)</h3><ol><li>...</li></ol>",
        champion = facts.champion,
        position = facts.position,
        opponent = facts.lane_opponent,
        own = facts.own_team.join(", "),
        enemy = facts.enemy_team.join(", "),
        mode = facts.game_mode,
    )
}

/// Advice for the next two minutes from the reduced snapshot and the last
/// pieces of advice
pub fn tactical_prompt(facts: &MatchFacts, history: &[String], reduced: &Snapshot) -> String {
    let context = if history.is_empty() {
        NO_HISTORY.to_string()
    } else {
        history.join("\n---\n")
    };

    format!(
        "{COACH_INTRO} Ton objectif: un avantage tactique immédiat.\n\n\
         JOUEUR: {champion} (moi)\n\
         MON ÉQUIPE: {own}\n\
         ÉQUIPE ADVERSE: {enemy}\n\
         MODE DE JEU: {mode}\n\
         TES CONSEILS PRÉCÉDENTS:\n{context}\n\n\
         DONNÉES DE LA PARTIE: {data}\n\n\
         INSTRUCTIONS:\n\
         1. Analyse la situation (or, XP, items, KDA, objectifs).\n\
         2. Donne un plan d'action concret pour les 2 prochaines minutes.\n\
         3. Propose les prochains achats adaptés à la partie.\n\
         4. Sois direct, impératif et concis.\n\
         5. {HTML_ONLY}\n\n\
         STRUCTURE ATTENDUE:\n\
         <h3>📊 Analyse Actuelle</h3><ul><li>...</li></ul>\n\
         <h3>⚡ Plan pour les 2 prochaines minutes</h3><ul><li><strong>Action</strong>: ...</li></ul>\n\
         <h3>⚔️ Itemisation Recommandée</h3><ul><li><strong>Achat prioritaire</strong>: ...</li></ul>",
        champion = facts.champion,
        own = facts.own_team.join(", "),
        enemy = facts.enemy_team.join(", "),
        mode = facts.game_mode,
        data = reduced,
    )
}

/// End-of-match report from the last full snapshot
pub fn post_game_prompt(full: &Snapshot) -> String {
    format!(
        "{COACH_INTRO} La partie est terminée, rédige un rapport complet.\n\n\
         DONNÉES COMPLÈTES DE LA PARTIE: {full}\n\n\
         INSTRUCTIONS:\n\
         1. Analyse la performance globale (KDA, or, objectifs, items).\n\
         2. Identifie les moments clés (teamfights, objectifs pris ou perdus).\n\
         3. Donne 3 points forts et 3 axes d'amélioration pour la prochaine partie.\n\
         4. {HTML_ONLY}\n\n\
         STRUCTURE ATTENDUE:\n\
         <h3>🏆 Rapport de Fin de Partie</h3><ul><li>...</li></ul>\n\
         <h3>🔑 Moments Clés</h3><ul><li>...</li></ul>\n\
         <h3>📈 Axes d'Amélioration</h3><ul><li>...</li></ul>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GamePhase;
    use serde_json::json;

    fn facts() -> MatchFacts {
        MatchFacts {
            champion: "Orianna".to_string(),
            position: "MIDDLE".to_string(),
            own_team: vec!["Jayce".into(), "Orianna".into()],
            enemy_team: vec!["Azir".into(), "K'Sante".into()],
            lane_opponent: "Azir".to_string(),
            game_time: 45.0,
            game_mode: "CLASSIC".to_string(),
            phase: GamePhase::Early,
        }
    }

    #[test]
    fn early_prompt_names_matchup() {
        let prompt = early_game_prompt(&facts());
        assert!(prompt.contains("JOUEUR: Orianna (moi) - Rôle: MIDDLE"));
        assert!(prompt.contains("ADVERSAIRE DE LANE: Azir"));
        assert!(prompt.contains("MON ÉQUIPE: Jayce, Orianna"));
        assert!(prompt.contains("ÉQUIPE ADVERSE: Azir, K'Sante"));
        assert!(prompt.contains("<h3>⚔️ Matchup contre Azir</h3>"));
        assert!(prompt.contains("sans bloc ```html"));
    }

    #[test]
    fn tactical_prompt_embeds_history_and_data() {
        let history = vec!["<h3>old</h3>".to_string(), "<h3>newer</h3>".to_string()];
        let reduced = json!({ "gameData": { "gameTime": 600.0 } });
        let prompt = tactical_prompt(&facts(), &history, &reduced);

        assert!(prompt.contains("<h3>old</h3>\n---\n<h3>newer</h3>"));
        assert!(prompt.contains(r#"DONNÉES DE LA PARTIE: {"gameData":{"gameTime":600.0}}"#));
        assert!(prompt.contains("MODE DE JEU: CLASSIC"));
    }

    #[test]
    fn tactical_prompt_without_history() {
        let prompt = tactical_prompt(&facts(), &[], &json!({}));
        assert!(prompt.contains(NO_HISTORY));
    }

    #[test]
    fn post_game_prompt_embeds_snapshot() {
        let prompt = post_game_prompt(&json!({ "events": { "Events": [{ "EventName": "GameEnd" }] } }));
        assert!(prompt.contains("GameEnd"));
        assert!(prompt.contains("Rapport de Fin de Partie"));
    }
}
