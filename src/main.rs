//! Relay Stars entry point
//!
//! Wasm builds mount the payment-success celebration onto the page canvas.
//! Native builds print the current leaderboard and run a headless pass over
//! the celebration as a smoke check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use glam::Vec2;
    use relay_stars::render::CanvasSurface;
    use relay_stars::sim::ConfettiDriver;

    /// Celebration instance driven by requestAnimationFrame
    struct App {
        driver: ConfettiDriver,
        surface: CanvasSurface,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Relay Stars celebration starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("confetti")
            .expect("no confetti canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the backing store to the viewport, CSS pixels; the particle
        // physics are tuned for CSS-pixel speeds
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(390.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(844.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let Some(surface) = CanvasSurface::new(&canvas) else {
            // No 2D context: skip the celebration rather than fail the screen
            log::warn!("2D context unavailable, skipping celebration");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let driver = ConfettiDriver::new(seed, Vec2::new(width as f32, height as f32));

        let app = Rc::new(RefCell::new(App { driver, surface }));
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let App { driver, surface } = &mut *a;
            driver.advance(time, surface)
        };

        // Done or cancelled: stop rescheduling and let the run drop
        if keep_going {
            request_animation_frame(app);
        } else {
            log::info!("Celebration finished");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use relay_stars::config::DonationConfig;
    use relay_stars::render::MeshSurface;
    use relay_stars::sim::ConfettiDriver;
    use relay_stars::store::{FileStore, SnapshotSource};
    use relay_stars::{consts, leaderboard};

    env_logger::init();

    let config = DonationConfig::from_env();
    let store = FileStore::new(config.donations_path());
    let snapshot = store.load();
    let response = leaderboard::leaderboard_response(snapshot.as_ref(), None, &config);

    println!("Relay donation leaderboard");
    println!(
        "  raised ${:.2} of ${:.0} goal ({:.1}%)",
        response.stats.total_usd,
        response.stats.goal_usd,
        config.progress_percent(response.stats.total_usd)
    );
    match config.next_milestone(response.stats.total_stars) {
        Some(next) => println!("  next milestone: {next} stars"),
        None => println!("  all milestones reached"),
    }
    if response.leaderboard.is_empty() {
        println!("  (no donations recorded yet)");
    }
    for entry in &response.leaderboard {
        println!("  #{:<3} {:<24} ${:.2}", entry.rank, entry.name, entry.amount);
    }

    // Headless celebration pass: the full run at 60 Hz against the mesh
    // backend, same code path the browser drives
    let mut driver = ConfettiDriver::new(42, Vec2::new(390.0, 844.0));
    let mut surface = MeshSurface::new();
    let mut now_ms = 0.0;
    let mut frames = 0u32;
    let mut peak_triangles = 0usize;
    while driver.advance(now_ms, &mut surface) {
        peak_triangles = peak_triangles.max(surface.triangle_count());
        now_ms += consts::FRAME_MS;
        frames += 1;
    }

    println!("Celebration OK: {frames} frames, peak {peak_triangles} triangles");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
