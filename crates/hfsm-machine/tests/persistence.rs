//! Save/load of instances and the canonical FOO/A/B walkthrough.

mod common;

use hfsm_core::TransitionError;
use hfsm_machine::{compile, CompiledSpec, Instance};

use common::{logged, navigable, node, path, push, Msg, MsgKind, Unit, UnitAi};

fn spec() -> CompiledSpec<UnitAi> {
    compile(
        &navigable()
            .on(MsgKind::Foo, |_, _| "default".to_string())
            .state(
                "A",
                node()
                    .on(MsgKind::Foo, |_, _| "a".to_string())
                    .on_enter(|ctx| {
                        push(ctx, "enter-A");
                        false
                    })
                    .state(
                        "B",
                        node().on_leave(|ctx| {
                            push(ctx, "leave-B");
                            false
                        }),
                    ),
            )
            .state("C", logged()),
    )
    .unwrap()
}

#[test]
fn walkthrough() {
    let spec = spec();
    let mut unit = Unit::default();

    spec.init(&mut unit, "A").unwrap();
    assert_eq!(unit.log, vec!["enter-A"]);

    spec.process_message(&mut unit, &Msg::Goto("A.B"));
    assert_eq!(unit.log, vec!["enter-A"]);
    assert_eq!(spec.process_message(&mut unit, &Msg::Foo).as_deref(), Some("a"));

    spec.process_message(&mut unit, &Msg::Goto("C"));
    assert_eq!(unit.log, vec!["enter-A", "leave-B", "enter:C"]);
    assert_eq!(spec.process_message(&mut unit, &Msg::Foo).as_deref(), Some("default"));
}

#[test]
fn instance_serializes_as_its_state_path() {
    let spec = spec();
    let mut unit = Unit::default();
    spec.init(&mut unit, "A.B").unwrap();

    let saved = serde_json::to_string(&unit.fsm).unwrap();
    assert_eq!(saved, r#""A.B""#);
}

#[test]
fn loaded_instance_resumes_without_hooks() {
    let spec = spec();
    let mut original = Unit::default();
    spec.init(&mut original, "A.B").unwrap();
    let saved = serde_json::to_string(&original.fsm).unwrap();

    let mut loaded = Unit {
        fsm: serde_json::from_str::<Instance>(&saved).unwrap(),
        ..Unit::default()
    };

    assert_eq!(spec.current_state(&loaded), &path("A.B"));
    assert!(loaded.log.is_empty());
    assert!(loaded.changes.is_empty());

    // Behaves exactly like the instance it was saved from.
    assert_eq!(
        spec.process_message(&mut loaded, &Msg::Foo),
        spec.process_message(&mut original, &Msg::Foo)
    );
    spec.process_message(&mut loaded, &Msg::Goto("C"));
    assert_eq!(loaded.log, vec!["leave-B", "enter:C"]);
}

#[test]
fn pending_transition_is_not_saved() {
    let mut fsm = Instance::restored(path("A"));
    fsm.set_next_state_always_entering("B");

    let saved = serde_json::to_string(&fsm).unwrap();
    let loaded: Instance = serde_json::from_str(&saved).unwrap();

    assert_eq!(saved, r#""A""#);
    assert!(loaded.pending_next_state().is_none());
    assert!(!loaded.is_forcing_reenter());
}

#[test]
fn restore_runs_no_hooks() {
    let spec = spec();
    let mut unit = Unit::default();

    spec.restore(&mut unit, path("A.B")).unwrap();

    assert!(unit.log.is_empty());
    assert!(unit.changes.is_empty());
    assert!(spec.is_in_state(&unit, &path("A")));
}

#[test]
fn restore_rejects_unknown_state() {
    let spec = spec();
    let mut unit = Unit::default();
    spec.init(&mut unit, "C").unwrap();

    let err = spec.restore(&mut unit, path("A.Z")).unwrap_err();

    assert_eq!(
        err,
        TransitionError::UnknownState {
            from: "C".into(),
            target: "A.Z".into(),
        }
    );
    assert_eq!(spec.current_state(&unit), &path("C"));
}
