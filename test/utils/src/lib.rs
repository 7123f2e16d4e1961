pub fn long_message_fixture() -> &'static str {
    return r#"
Here's a short explanation of photosynthesis.

Plants take in sunlight, water, and carbon dioxide, and turn them into glucose and oxygen. This happens inside the chloroplasts, which contain a green pigment called chlorophyll that absorbs light.

That's it!
"#
    .trim();
}

/// Persisted state as written by the current storage version.
pub fn persisted_state_fixture() -> String {
    return serde_json::json!({
        "state": {
            "darkMode": false,
            "currentPersonaId": "comedian",
            "settings": {
                "temperature": 0.3,
                "maxTokens": 512,
                "showTimestamps": false
            }
        },
        "version": 1
    })
    .to_string();
}

/// Persisted state as written before the storage version was bumped, where
/// the persona was stored under `currentPersona`.
pub fn legacy_state_fixture() -> String {
    return serde_json::json!({
        "state": {
            "darkMode": true,
            "currentPersona": "writer",
            "settings": {
                "temperature": 0.5
            }
        },
        "version": 0
    })
    .to_string();
}
