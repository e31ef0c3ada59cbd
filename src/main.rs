//! Pulse Field entry point
//!
//! Native builds run a headless session and log the counters; the browser
//! build is driven from `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pulse_field::platform::FpsCounter;
    use pulse_field::sim::{Bounds, Category, Engine, TickInput};
    use pulse_field::Settings;

    env_logger::init();
    log::info!("Pulse Field (native, headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    const FRAMES: u32 = 60 * 30;
    const FRAME_DT: f64 = 1.0 / 60.0;

    let seed = 0x5eed;
    let mut engine = Engine::new(settings, Bounds::new(1280.0, 720.0), seed);
    let mut fps = FpsCounter::default();

    for frame in 0..FRAMES {
        let now = frame as f64 * FRAME_DT;
        // Sweep the square around in a rectangle, tapping keys along the way
        let leg = (frame / 90) % 4;
        let input = TickInput {
            right: leg == 0,
            down: leg == 1,
            left: leg == 2,
            up: leg == 3,
            presses: u32::from(frame % 6 == 0),
        };
        let snapshot = engine.step(now, &input);
        if let Some(rate) = fps.frame(now) {
            log::debug!("fps {rate}, {} effects live", snapshot.effects.len());
        }
        if frame % 600 == 0 {
            log::info!(
                "[{}] particles {} collisions {} boost {:.2}x",
                snapshot.counters.elapsed_label(),
                snapshot.counters.total,
                snapshot.counters.collisions,
                snapshot.counters.speed_multiplier
            );
        }
    }

    let counters = engine.counters();
    log::info!("Finished after {}", counters.elapsed_label());
    for category in Category::ALL {
        log::info!("  {:<9} {}", category.as_str(), counters.count(category));
    }
    log::info!(
        "  total {} / collisions {} / fps {}",
        counters.total,
        counters.collisions,
        fps.fps()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
