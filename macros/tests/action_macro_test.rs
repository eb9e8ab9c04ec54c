//! Tests for #[derive(Action)] macro

use tasklist_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum NoteAction {
    #[intent]
    Write { text: String },

    #[intent]
    Clear,

    #[intent]
    Pin(u32),

    #[event]
    Written { id: u32, text: String },

    #[event]
    Cleared,

    Tick,
}

#[test]
fn test_is_intent() {
    let action = NoteAction::Write {
        text: "Test".to_string(),
    };
    assert!(action.is_intent());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = NoteAction::Written {
        id: 1,
        text: "Test".to_string(),
    };
    assert!(!action.is_intent());
    assert!(action.is_event());
}

#[test]
fn test_event_type() {
    let action = NoteAction::Written {
        id: 1,
        text: "Test".to_string(),
    };
    assert_eq!(action.event_type(), "Written.v1");
    assert_eq!(NoteAction::Cleared.event_type(), "Cleared.v1");
}

#[test]
fn test_intent_has_no_event_type() {
    assert_eq!(NoteAction::Clear.event_type(), "unknown");
    assert_eq!(NoteAction::Pin(3).event_type(), "unknown");
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!NoteAction::Tick.is_intent());
    assert!(!NoteAction::Tick.is_event());
}

#[test]
fn test_all_intents_identified() {
    let intents = vec![
        NoteAction::Write {
            text: "Test".to_string(),
        },
        NoteAction::Clear,
        NoteAction::Pin(7),
    ];

    for intent in intents {
        assert!(intent.is_intent(), "Expected intent: {intent:?}");
        assert!(!intent.is_event(), "Should not be event: {intent:?}");
    }
}

#[test]
fn test_variant_name() {
    assert_eq!(NoteAction::Pin(1).variant_name(), "Pin");
    assert_eq!(NoteAction::Tick.variant_name(), "Tick");
    assert_eq!(
        NoteAction::Written {
            id: 2,
            text: String::new()
        }
        .variant_name(),
        "Written"
    );
}
