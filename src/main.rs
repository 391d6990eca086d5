//! Street Sweeper entry point
//!
//! The browser build is driven from JS through the library's `WebGame`.
//! Natively this runs one headless demo round with the autopilot steering.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use street_sweeper::persistence::MemoryStore;
    use street_sweeper::sim::{GameEvent, GamePhase, Viewport};
    use street_sweeper::{Session, Tuning};

    env_logger::init();
    log::info!("Street Sweeper (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED);
    let tuning = match std::env::var("STREET_SWEEPER_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning file {path}: {e}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let mut session = Session::with_tuning(MemoryStore::new(), seed, Viewport::default(), tuning);
    session.set_idle_mode(true);
    session.start_run();

    // Simulated 60 Hz frames; a round can't outlast a few minutes of bonuses
    let mut now_ms = 0.0;
    for _ in 0..60 * 60 * 10 {
        now_ms += 1000.0 / 60.0;
        session.frame(now_ms);
        for event in session.drain_events() {
            match event {
                GameEvent::WordCompleted { word, .. } => println!("  swept {word}"),
                GameEvent::LevelUp { level, city } => println!("  level {level}: {city}"),
                _ => {}
            }
        }
        if session.state().phase == GamePhase::Over {
            break;
        }
    }

    let summary = session.summary();
    println!(
        "\nScore {} | {} words | level {} ({}) | {:?}",
        summary.score, summary.words_completed, summary.level, summary.city, summary.reason
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main in the library, this is just to satisfy the compiler
}
