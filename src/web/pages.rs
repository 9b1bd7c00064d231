//! Dashboard HTML.

pub const SETTINGS_SAVED: &str = r#"<span class="text-green-400">Paramètres sauvegardés !</span>"#;

pub const INDEX: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="utf-8">
    <title>Nexus Coach</title>
    <style>
        body { background: #010a13; color: #f0e6d2; font-family: sans-serif; margin: 2rem; }
        header { display: flex; gap: 2rem; color: #c8aa6e; }
        #advice { margin-top: 1.5rem; }
        h3 { color: #0ac8b9; }
    </style>
</head>
<body>
    <header>
        <span>Mode : <strong id="gamemode">--</strong></span>
        <span>Conseil à : <strong id="gametime">00:00</strong></span>
        <span>Prochaine mise à jour : <strong id="next-update">--</strong></span>
        <a href="/settings">Paramètres</a>
    </header>
    <main id="advice"></main>
    <script>
        const panels = {
            "advice": "/api/advice",
            "gamemode": "/api/gamemode",
            "gametime": "/api/gametime",
            "next-update": "/api/next-update",
        };
        async function refresh() {
            for (const [id, url] of Object.entries(panels)) {
                try {
                    const response = await fetch(url);
                    const text = await response.text();
                    const node = document.getElementById(id);
                    if (id === "advice") { node.innerHTML = text; } else { node.textContent = text; }
                } catch (e) { /* dashboard keeps the last value */ }
            }
        }
        refresh();
        setInterval(refresh, 2000);
    </script>
</body>
</html>
"#;

/// Settings form pre-filled with the current values
pub fn settings(model: &str, debug: bool) -> String {
    let checked = if debug { " checked" } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head><meta charset="utf-8"><title>Paramètres</title></head>
<body>
    <form method="post" action="/settings">
        <label>Modèle Gemini <input type="text" name="model" value="{model}"></label>
        <label><input type="checkbox" name="debug"{checked}> Mode debug</label>
        <button type="submit">Sauvegarder</button>
    </form>
    <a href="/">Retour</a>
</body>
</html>
"#,
        model = escape_attr(model),
    )
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_escapes_model() {
        let html = settings(r#"x"><script>"#, false);
        assert!(html.contains(r#"value="x&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("checked"));
    }
}
