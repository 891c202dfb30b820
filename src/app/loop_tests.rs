use super::*;
use crate::app::action::Action;
use crate::app::observer::MockPaletteObserver;
use crate::app::state::AppState;
use crate::domain::action::MockCommandAction;
use crate::domain::models::{Command, CommandCategory};
use crate::domain::registry::CommandRegistry;
use crate::domain::shortcut::Shortcut;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

fn ok_action(msg: &'static str) -> Arc<MockCommandAction> {
    let mut mock = MockCommandAction::new();
    mock.expect_run().returning(move || Ok(msg.to_string()));
    Arc::new(mock)
}

fn failing_action(msg: &'static str) -> Arc<MockCommandAction> {
    let mut mock = MockCommandAction::new();
    mock.expect_run().returning(move || Err(anyhow::anyhow!(msg)));
    Arc::new(mock)
}

fn registry() -> Arc<CommandRegistry> {
    let commands = vec![
        Command::new(
            "nav.dashboard",
            "Go to Dashboard",
            CommandCategory::Navigation,
            ok_action("dashboard"),
        )
        .with_shortcut(Shortcut::ctrl('d')),
        Command::new(
            "bet.place",
            "Place Bet",
            CommandCategory::Betting,
            ok_action("slip opened"),
        )
        .with_keywords(&["wager", "stake"])
        .with_priority(5.0),
        Command::new(
            "bet.odds",
            "View Odds",
            CommandCategory::Betting,
            ok_action("odds"),
        )
        .with_description("Current lines"),
        Command::new(
            "account.balance",
            "Check Balance",
            CommandCategory::Account,
            ok_action("$100"),
        )
        .with_enabled(false),
        Command::new(
            "tools.export",
            "Export Data",
            CommandCategory::Tools,
            failing_action("export service unavailable"),
        )
        .with_shortcut(Shortcut::ctrl('e')),
    ];
    Arc::new(CommandRegistry::new(commands).unwrap())
}

fn session() -> (PaletteSession, mpsc::Receiver<Action>) {
    let (tx, rx) = mpsc::channel(100);
    (PaletteSession::new(AppState::default(), registry(), tx), rx)
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

#[tokio::test]
async fn test_typed_query_executes_through_loop() {
    let (mut session, action_rx) = session();
    let mut observer = MockPaletteObserver::new();
    observer
        .expect_on_event()
        .withf(|e| matches!(e, crate::app::observer::PaletteEvent::Executed { .. }))
        .times(1)
        .return_const(());
    session.add_observer(Arc::new(observer));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let (event_tx, event_rx) = mpsc::channel(100);

    let driver = tokio::spawn(async move {
        let mut events = vec![key(KeyCode::Char('k'), KeyModifiers::CONTROL)];
        events.extend("bet".chars().map(|c| key(KeyCode::Char(c), KeyModifiers::NONE)));
        events.push(key(KeyCode::Enter, KeyModifiers::NONE));
        for event in events {
            event_tx.send(Ok(event)).await.unwrap();
        }
        // Let the action finish and its completion land before quitting.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        event_tx
            .send(Ok(key(KeyCode::Char('c'), KeyModifiers::CONTROL)))
            .await
            .unwrap();
    });

    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        run_loop_with_events(&mut terminal, session, action_rx, event_rx),
    )
    .await
    .expect("loop timed out")
    .unwrap();

    driver.await.unwrap();
}

#[tokio::test]
async fn test_event_error_ends_loop() {
    let (session, action_rx) = session();
    let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
    let (event_tx, event_rx) = mpsc::channel(1);
    event_tx
        .send(Err(std::io::Error::other("tty gone")))
        .await
        .unwrap();

    let res = run_loop_with_events(&mut terminal, session, action_rx, event_rx).await;
    assert!(res.is_err());
}

#[test]
fn test_event_reader_exits_once_receiver_dropped() {
    let (tx, rx) = mpsc::channel(4);
    let reader = std::thread::spawn(move || {
        // Idle terminal: every poll times out.
        forward_events(&tx, || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            Ok(None)
        });
    });

    let start = std::time::Instant::now();
    drop(rx);
    reader.join().unwrap();
    assert!(start.elapsed() < std::time::Duration::from_secs(1));
}

#[test]
fn test_event_reader_forwards_events_then_error() {
    let (tx, mut rx) = mpsc::channel(4);
    let mut script = vec![
        Err(std::io::Error::other("tty gone")),
        Ok(Some(key(KeyCode::Char('a'), KeyModifiers::NONE))),
        Ok(None),
    ];
    forward_events(&tx, || script.pop().unwrap());
    drop(tx);

    assert!(matches!(rx.blocking_recv(), Some(Ok(Event::Key(_)))));
    assert!(matches!(rx.blocking_recv(), Some(Err(_))));
    assert!(rx.blocking_recv().is_none());
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let (session, action_rx) = session();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    let (event_tx, event_rx) = mpsc::channel(100);

    // Spawn a task to feed random events
    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let event = match rng.gen_range(0..100) {
                0..=5 => {
                    let w = rng.gen_range(10..200);
                    let h = rng.gen_range(10..100);
                    Event::Resize(w, h)
                }
                6..=15 => generate_random_mouse(&mut rng, ratatui::layout::Size::new(80, 24)),
                _ => generate_random_key(&mut rng),
            };
            if event_tx.send(Ok(event)).await.is_err() {
                break;
            }
            // Yield to allow the loop to process events
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
        // Ctrl+C quits whether or not the palette is open.
        let _ = event_tx
            .send(Ok(key(KeyCode::Char('c'), KeyModifiers::CONTROL)))
            .await;
    });

    // Run the real loop (with a test backend)
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(&mut terminal, session, action_rx, event_rx),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    let code = match rng.gen_range(0..20) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::F(5),
        9 => KeyCode::PageDown,
        10 => KeyCode::Tab,
        11 => KeyCode::BackTab,
        12 => KeyCode::Delete,
        13 => KeyCode::Backspace,
        _ => {
            let c = rng.gen_range(b' '..=b'~') as char;
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::ALT);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}

fn generate_random_mouse<R: Rng>(rng: &mut R, size: ratatui::layout::Size) -> Event {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    let kind = match rng.gen_range(0..5) {
        0 => MouseEventKind::Down(MouseButton::Left),
        1 => MouseEventKind::Down(MouseButton::Right),
        2 => MouseEventKind::ScrollUp,
        3 => MouseEventKind::ScrollDown,
        _ => MouseEventKind::Moved,
    };

    let column = rng.gen_range(0..size.width);
    let row = rng.gen_range(0..size.height);

    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}
