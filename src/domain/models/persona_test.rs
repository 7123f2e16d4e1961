use super::Persona;
use super::PersonaRegistry;
use super::DEFAULT_PERSONA;

#[test]
fn it_ships_default_personas_in_order() {
    let registry = PersonaRegistry::default();
    assert_eq!(
        registry.ids(),
        vec!["assistant", "tutor", "comedian", "writer"]
    );
    assert!(registry.contains(DEFAULT_PERSONA));
}

#[test]
fn it_gets_persona_by_id() {
    let registry = PersonaRegistry::default();
    let tutor = registry.get("tutor").unwrap();
    assert_eq!(tutor.name, "Tutor");
    assert_eq!(tutor.description, "Patient and educational");
    assert!(registry.get("pirate").is_none());
}

#[test]
fn it_falls_back_on_unknown_display_name() {
    let registry = PersonaRegistry::default();
    assert_eq!(registry.display_name("writer", "AI"), "Writer");
    assert_eq!(registry.display_name("pirate", "AI"), "AI");
}

#[test]
fn it_cycles_personas() {
    let registry = PersonaRegistry::default();
    assert_eq!(registry.next_after("assistant").unwrap().id, "tutor");
    assert_eq!(registry.next_after("writer").unwrap().id, "assistant");
    assert_eq!(registry.next_after("pirate").unwrap().id, "assistant");
}

#[test]
fn it_handles_empty_registry() {
    let registry = PersonaRegistry::new(vec![]);
    assert!(registry.ids().is_empty());
    assert!(registry.next_after("assistant").is_none());

    let registry = PersonaRegistry::new(vec![Persona::new("solo", "Solo", "", "")]);
    assert_eq!(registry.ids(), vec!["solo".to_string()]);
    assert_eq!(registry.next_after("solo").unwrap().id, "solo");
}
