use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use keycode::{Key, KeyEvent, Modifier};
use palette_engine::{
    Action, ActionError, Command, CommandGroup, KeyResponse, LocalHotkeys, Matcher, OpenMode,
    Outcome, Owner, Palette, PaletteBuilder, Platform,
};
use tokio::sync::oneshot;

/// Builder pinned to a non-Mac platform with a shared hotkey backend.
fn builder(api: &Arc<LocalHotkeys>) -> PaletteBuilder {
    Palette::builder()
        .platform(Platform::Other)
        .hotkeys(api.clone())
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
    let n = Arc::new(AtomicUsize::new(0));
    let read = {
        let n = n.clone();
        move || n.load(Ordering::SeqCst)
    };
    (n, read)
}

fn counting_action(hits: &Arc<AtomicUsize>) -> Action {
    let hits = hits.clone();
    Action::new(move || {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

fn file_commands() -> Vec<Command> {
    vec![
        Command::new("save", "Save"),
        Command::new("save-as", "Save As").with_keywords(&["export"]),
        Command::new("load", "Load").disabled(true),
    ]
}

fn flat_ids(p: &Palette) -> Vec<String> {
    p.view().flat().map(|c| c.id.clone()).collect()
}

fn hotkey_event() -> KeyEvent {
    KeyEvent::new(Key::K).with_modifier(Modifier::Control)
}

#[test]
fn idempotent_close_self_managed() {
    let api = Arc::new(LocalHotkeys::new());
    let mut p = builder(&api).registry(file_commands()).build().unwrap();
    assert_eq!(p.mode(), OpenMode::SelfManaged);
    p.open();
    p.set_query("sav");
    p.move_next();

    assert!(p.close());
    let after_one = (p.is_open(), p.query().to_string(), p.selected_index());
    assert!(!p.close());
    let after_two = (p.is_open(), p.query().to_string(), p.selected_index());
    assert_eq!(after_one, after_two);
    assert_eq!(after_one, (false, String::new(), 0));
}

#[test]
fn owner_managed_close_only_notifies() {
    let api = Arc::new(LocalHotkeys::new());
    let (closes, close_count) = counter();
    let c = closes.clone();
    let owner = Owner::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let mut p = builder(&api)
        .registry(file_commands())
        .owner(owner, true)
        .build()
        .unwrap();
    assert_eq!(p.mode(), OpenMode::OwnerManaged);
    assert!(p.take_focus_request());

    p.set_query("save");
    assert!(p.close());
    assert!(p.is_open(), "the owner's value is authoritative");
    assert_eq!(p.query(), "");
    assert_eq!(close_count(), 1);

    // The owner agrees; further closes are no-ops.
    assert!(p.sync_owner_open(false));
    assert!(!p.close());
    assert_eq!(close_count(), 1);

    // Owner reopens: query and selection start fresh.
    assert!(p.sync_owner_open(true));
    assert!(p.take_focus_request());
    assert_eq!(p.query(), "");
    assert_eq!(p.result_count(), 2);
}

#[test]
fn owner_managed_open_requests() {
    let api = Arc::new(LocalHotkeys::new());
    let (requests, request_count) = counter();
    let r = requests.clone();
    let owner = Owner::new(|| {}).on_open_request(move || {
        r.fetch_add(1, Ordering::SeqCst);
    });
    let mut p = builder(&api).owner(owner, false).build().unwrap();

    let mut ev = hotkey_event();
    assert!(matches!(p.handle_key(&mut ev), KeyResponse::Handled));
    assert!(ev.is_default_prevented());
    assert!(!p.is_open());
    assert_eq!(request_count(), 1);
}

#[test]
fn query_reset_on_every_change() {
    let api = Arc::new(LocalHotkeys::new());
    let groups = vec![CommandGroup::new(
        "all",
        (0..6)
            .map(|i| Command::new(format!("c{i}"), format!("Command {i}")))
            .collect(),
    )];
    let mut p = builder(&api).registry(groups).build().unwrap();
    p.open();
    for q in ["c", "co", "command", "", "command 1", "x"] {
        p.move_last();
        p.set_query(q);
        assert_eq!(p.selected_index(), 0, "after query {q:?}");
    }
}

#[test]
fn cyclic_navigation() {
    let api = Arc::new(LocalHotkeys::new());
    let mut p = builder(&api).registry(file_commands()).build().unwrap();
    p.open();
    let n = p.result_count();
    assert_eq!(n, 2);
    for _ in 0..n {
        p.move_next();
    }
    assert_eq!(p.selected_index(), 0);
    p.move_previous();
    assert_eq!(p.selected_index(), n - 1);
    p.move_first();
    assert_eq!(p.selected_index(), 0);
}

#[test]
fn filter_correctness() {
    let api = Arc::new(LocalHotkeys::new());
    let mut p = builder(&api).registry(file_commands()).build().unwrap();
    p.open();
    let cases: [(&str, &[&str]); 4] = [
        ("sav", &["save", "save-as"]),
        ("export", &["save-as"]),
        ("", &["save", "save-as"]),
        ("load", &[]),
    ];
    for (query, expected) in cases {
        p.set_query(query);
        assert_eq!(flat_ids(&p), expected, "query {query:?}");
        assert_eq!(p.result_count(), p.view().len());
    }
    p.set_query("load");
    assert!(p.is_empty_state());
    assert_eq!(p.empty_message(), "No results found.");
}

#[test]
fn truncation_across_groups() {
    let api = Arc::new(LocalHotkeys::new());
    let group = |id: &str| {
        CommandGroup::new(
            id,
            (0..5)
                .map(|i| Command::new(format!("{id}{i}"), format!("Item {i}")))
                .collect(),
        )
        .with_label(id.to_uppercase())
    };
    let mut p = builder(&api)
        .registry(vec![group("a"), group("b")])
        .max_results(7)
        .build()
        .unwrap();
    p.open();
    p.set_query("item");
    let groups = p.view().groups();
    assert_eq!(p.result_count(), 7);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label.as_deref(), Some("A"));
    assert_eq!(groups[0].commands.len(), 5);
    assert_eq!(groups[1].label.as_deref(), Some("B"));
    assert_eq!(groups[1].commands.len(), 2);
}

#[test]
fn selection_on_disabled_is_a_noop() {
    let api = Arc::new(LocalHotkeys::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let mut p = builder(&api)
        .registry(vec![
            Command::new("off", "Off")
                .with_action(counting_action(&hits))
                .disabled(true),
        ])
        .build()
        .unwrap();
    p.open();
    assert!(p.select_current().is_none());
    let mut enter = KeyEvent::new(Key::Return);
    assert!(matches!(p.handle_key(&mut enter), KeyResponse::Handled));
    assert!(p.is_open());
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    // A command disabled after the fact drops out of the view.
    let mut p = builder(&api)
        .registry(vec![Command::new("on", "On").with_action(counting_action(&hits))])
        .build()
        .unwrap();
    p.open();
    p.set_registry(vec![
        Command::new("on", "On")
            .with_action(counting_action(&hits))
            .disabled(true),
    ]);
    assert!(p.select_current().is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn action_failure_propagates_and_still_closes() {
    let api = Arc::new(LocalHotkeys::new());
    let mut p = builder(&api)
        .registry(vec![
            Command::new("boom", "Boom").with_action(Action::from_async(|| async {
                Err(ActionError::msg("disk full"))
            })),
        ])
        .build()
        .unwrap();
    p.open();
    let selection = p.select_current().expect("selection");
    assert_eq!(selection.command_id, "boom");
    assert!(selection.closed);
    assert!(!p.is_open());
    match selection.outcome.await {
        Outcome::Failed(e) => assert_eq!(e.to_string(), "disk full"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn close_on_select_can_be_disabled() {
    let api = Arc::new(LocalHotkeys::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let mut p = builder(&api)
        .registry(vec![Command::new("a", "A").with_action(counting_action(&hits))])
        .close_on_select(false)
        .build()
        .unwrap();
    p.open();
    let mut space = KeyEvent::new(Key::Space);
    let KeyResponse::Selected(selection) = p.handle_key(&mut space) else {
        panic!("expected a selection");
    };
    assert!(!selection.closed);
    assert!(selection.outcome.await.is_completed());
    assert!(p.is_open());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn enter_on_async_command_runs_through_its_outcome() {
    let api = Arc::new(LocalHotkeys::new());
    let (hits, hit_count) = counter();
    let action = Action::from_async(move || {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    let mut p = builder(&api)
        .registry(vec![Command::new("sync-now", "Sync now").with_action(action)])
        .build()
        .unwrap();
    p.open();
    let mut enter = KeyEvent::new(Key::Return);
    let KeyResponse::Selected(selection) = p.handle_key(&mut enter) else {
        panic!("expected a selection");
    };
    assert!(enter.is_default_prevented());
    assert!(selection.closed);
    assert!(!p.is_open());
    assert_eq!(hit_count(), 0, "async body waits for the outcome");

    assert!(selection.outcome.await.is_completed());
    assert_eq!(hit_count(), 1);
}

#[tokio::test]
async fn owner_managed_select_closes_through_owner_once() {
    let api = Arc::new(LocalHotkeys::new());
    let (closes, close_count) = counter();
    let c = closes.clone();
    let owner = Owner::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let hits = Arc::new(AtomicUsize::new(0));
    let mut p = builder(&api)
        .registry(vec![Command::new("a", "A").with_action(counting_action(&hits))])
        .owner(owner, true)
        .build()
        .unwrap();
    p.set_query("a");

    let selection = p.select_current().expect("selection");
    assert!(selection.closed);
    assert!(selection.outcome.await.is_completed());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(close_count(), 1);
    assert!(p.is_open(), "the owner still says open");
    assert_eq!(p.query(), "");

    // The owner applies the close; no second callback.
    assert!(p.sync_owner_open(false));
    assert!(!p.is_open());
    assert_eq!(close_count(), 1);
}

#[tokio::test]
async fn palette_stays_responsive_while_action_pending() {
    let api = Arc::new(LocalHotkeys::new());
    let (tx, rx) = oneshot::channel::<()>();
    let rx = Arc::new(parking_lot::Mutex::new(Some(rx)));
    let action = Action::from_async(move || {
        let rx = rx.lock().take();
        async move {
            if let Some(rx) = rx {
                rx.await.map_err(|e| ActionError::Other(Box::new(e)))?;
            }
            Ok::<(), ActionError>(())
        }
    });
    let mut p = builder(&api)
        .registry(vec![
            Command::new("wait", "Wait").with_action(action),
            Command::new("other", "Other"),
        ])
        .build()
        .unwrap();
    p.open();
    let selection = p.select_current().expect("selection");
    let pending = tokio::spawn(selection.outcome);

    // Closing does not cancel; the palette keeps working.
    assert!(p.open());
    assert!(p.move_next());
    assert_eq!(p.selected_command().map(|c| c.id.as_str()), Some("other"));

    tx.send(()).unwrap();
    assert!(pending.await.unwrap().is_completed());
}

#[test]
fn hotkey_toggles_and_respects_consumed_events() {
    let api = Arc::new(LocalHotkeys::new());
    let mut p = builder(&api).registry(file_commands()).build().unwrap();

    let mut consumed = hotkey_event();
    consumed.prevent_default();
    assert!(matches!(p.handle_key(&mut consumed), KeyResponse::Ignored));
    assert!(!p.is_open());

    let mut ev = hotkey_event();
    assert!(matches!(p.handle_key(&mut ev), KeyResponse::Opened));
    assert!(ev.is_default_prevented());
    assert!(p.is_open());
    assert!(p.take_focus_request());

    // Mac's Command does not trigger on other platforms.
    let mut cmd = KeyEvent::new(Key::K).with_modifier(Modifier::Command);
    assert!(matches!(p.handle_key(&mut cmd), KeyResponse::Ignored));

    let mut ev = hotkey_event();
    assert!(matches!(p.handle_key(&mut ev), KeyResponse::Closed));
    assert!(!p.is_open());
}

#[test]
fn keyboard_contract() {
    let api = Arc::new(LocalHotkeys::new());
    let mut p = builder(&api)
        .registry(vec![
            Command::new("a", "A"),
            Command::new("b", "B"),
            Command::new("c", "C"),
        ])
        .build()
        .unwrap();
    p.open();
    let press = |p: &mut Palette, key: Key| {
        let mut ev = KeyEvent::new(key);
        let resp = p.handle_key(&mut ev);
        assert!(ev.is_default_prevented(), "{key:?} should be consumed");
        resp
    };
    press(&mut p, Key::End);
    assert_eq!(p.selected_index(), 2);
    press(&mut p, Key::DownArrow);
    assert_eq!(p.selected_index(), 0);
    press(&mut p, Key::UpArrow);
    assert_eq!(p.selected_index(), 2);
    press(&mut p, Key::Home);
    assert_eq!(p.selected_index(), 0);
    assert!(matches!(press(&mut p, Key::Escape), KeyResponse::Closed));
    assert!(!p.is_open());
}

#[test]
fn listener_registered_once_and_released_once() {
    let api = Arc::new(LocalHotkeys::new());
    for _ in 0..3 {
        let mut p = builder(&api).build().unwrap();
        assert_eq!(api.active(), 1);
        p.open();
        p.close();
        p.open();
        assert_eq!(api.active(), 1, "open/close cycles do not re-register");
    }
    assert_eq!(api.active(), 0);
    assert_eq!(api.unregister_calls(), 3);

    let mut p = builder(&api).build().unwrap();
    p.shutdown().unwrap();
    p.shutdown().unwrap();
    assert!(!p.is_listening());
    drop(p);
    assert_eq!(api.active(), 0);
    assert_eq!(api.unregister_calls(), 4);
}

#[test]
fn pointer_selection_runs_the_clicked_command() {
    let api = Arc::new(LocalHotkeys::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let mut p = builder(&api)
        .registry(vec![
            Command::new("a", "A"),
            Command::new("b", "B").with_action(counting_action(&hits)),
        ])
        .build()
        .unwrap();
    assert!(p.select_at(1).is_none(), "closed");
    p.open();
    assert!(p.select_at(5).is_none());
    let selection = p.select_at(1).expect("selection");
    assert_eq!(selection.command_id, "b");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    drop(selection);
}

#[test]
fn custom_matcher_and_duplicates() {
    let api = Arc::new(LocalHotkeys::new());
    let mut p = builder(&api)
        .registry(vec![
            CommandGroup::new("one", vec![Command::new("dup", "First")]),
            CommandGroup::new("two", vec![Command::new("dup", "Second")]),
        ])
        .matcher(Matcher::new(|c, q| c.label.to_lowercase().starts_with(q)))
        .build()
        .unwrap();
    p.open();
    assert_eq!(p.result_count(), 2, "duplicates both render");
    assert_eq!(p.command("dup").map(|c| c.label.as_str()), Some("Second"));
    p.set_query("SEC");
    assert_eq!(p.result_count(), 1);
    p.set_query("cond");
    assert_eq!(p.result_count(), 0);
}
