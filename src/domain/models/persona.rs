#[cfg(test)]
#[path = "persona_test.rs"]
mod tests;

pub const DEFAULT_PERSONA: &str = "assistant";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prompt: String,
}

impl Persona {
    pub fn new(id: &str, name: &str, description: &str, prompt: &str) -> Persona {
        return Persona {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            prompt: prompt.to_string(),
        };
    }
}

/// Read-only set of personas available for the session, kept in display
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl Default for PersonaRegistry {
    fn default() -> PersonaRegistry {
        return PersonaRegistry::new(vec![
            Persona::new(
                "assistant",
                "Assistant",
                "Helpful and friendly AI assistant",
                "You are a helpful AI assistant.",
            ),
            Persona::new(
                "tutor",
                "Tutor",
                "Patient and educational",
                "You are a knowledgeable tutor. Explain concepts clearly and provide examples.",
            ),
            Persona::new(
                "comedian",
                "Comedian",
                "Witty and humorous",
                "You are a comedian. Keep responses funny and lighthearted.",
            ),
            Persona::new(
                "writer",
                "Writer",
                "Creative and eloquent",
                "You are a creative writer. Provide detailed and engaging responses.",
            ),
        ]);
    }
}

impl PersonaRegistry {
    pub fn new(personas: Vec<Persona>) -> PersonaRegistry {
        return PersonaRegistry { personas };
    }

    pub fn get(&self, id: &str) -> Option<&Persona> {
        return self.personas.iter().find(|e| return e.id == id);
    }

    pub fn contains(&self, id: &str) -> bool {
        return self.get(id).is_some();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        return self.personas.iter();
    }

    pub fn ids(&self) -> Vec<String> {
        return self
            .personas
            .iter()
            .map(|e| return e.id.to_string())
            .collect();
    }

    /// The persona following `id` in display order, wrapping around. Unknown
    /// ids resolve to the first persona.
    pub fn next_after(&self, id: &str) -> Option<&Persona> {
        let position = self.personas.iter().position(|e| return e.id == id);
        return match position {
            Some(idx) => self.personas.get((idx + 1) % self.personas.len()),
            None => self.personas.first(),
        };
    }

    /// Display name for `id`, or `fallback` when the id is not registered.
    pub fn display_name<'a>(&'a self, id: &str, fallback: &'a str) -> &'a str {
        return self
            .get(id)
            .map(|e| return e.name.as_str())
            .unwrap_or(fallback);
    }
}
