//! HTML fragments published as advice while nothing better is available.

pub const WAITING_FOR_LINK: &str = "En attente du lien neural avec la Faille de l'invocateur...";
pub const WAITING_FOR_API: &str = "Partie détectée. En attente de l'initialisation de l'API...";
pub const WAITING_FOR_MATCH: &str = "En attente du lancement de la partie...";
pub const EARLY_GAME_LOADING: &str = "Génération du plan de jeu (Early Game)...";
pub const TACTICAL_LOADING: &str = "Analyse tactique en cours...";
pub const POST_GAME_LOADING: &str = "Partie terminée. Génération du rapport de fin de match...";

/// Spinner with a status line underneath
pub fn loader_html(message: &str) -> String {
    format!(
        r#"
    <div class="flex flex-col items-center justify-center h-48 text-hextech-blue/50 animate-pulse">
        <svg class="w-12 h-12 mb-4 animate-spin" fill="none" viewBox="0 0 24 24">
            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
            <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
        </svg>
        <p>{message}</p>
    </div>
    "#
    )
}

/// Trim model output and drop a surrounding ```html fence if the model
/// ignored the formatting instructions.
pub fn clean_advice(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the fence language tag, if any
        text = match rest.split_once('\n') {
            Some((tag, body)) if !tag.contains('<') => body,
            _ => rest,
        };
        text = text.trim_end();
        text = text.strip_suffix("```").unwrap_or(text);
    }

    text.trim().to_string()
}
