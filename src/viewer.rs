use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;
use crate::events::EventBus;
use crate::input::{KeyEvent, WheelEvent};
use crate::progress::{DotLayout, ProgressIndicator};
use crate::session::PresentationSession;

fn accent() -> Color {
    Color::new(157, 43, 238, 255)
}

// Raylib keys and the DOM names the keyboard adapter understands.
const NAV_KEYS: [(KeyboardKey, &str); 9] = [
    (KeyboardKey::KEY_DOWN, "ArrowDown"),
    (KeyboardKey::KEY_RIGHT, "ArrowRight"),
    (KeyboardKey::KEY_SPACE, " "),
    (KeyboardKey::KEY_PAGE_DOWN, "PageDown"),
    (KeyboardKey::KEY_UP, "ArrowUp"),
    (KeyboardKey::KEY_LEFT, "ArrowLeft"),
    (KeyboardKey::KEY_PAGE_UP, "PageUp"),
    (KeyboardKey::KEY_HOME, "Home"),
    (KeyboardKey::KEY_END, "End"),
];

struct Particle {
    position: Vector2,
    velocity: Vector2,
    radius: f32,
    alpha: u8,
}

impl Particle {
    fn random(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            position: Vector2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
            velocity: Vector2::new(rng.random_range(-8.0..8.0), rng.random_range(-20.0..-4.0)),
            radius: rng.random_range(0.5..2.0),
            alpha: rng.random_range(20..90),
        }
    }

    fn update(&mut self, dt: f32, width: f32, height: f32) {
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
        if self.position.y < 0.0 {
            self.position.y = height;
        }
        if self.position.x < 0.0 {
            self.position.x = width;
        } else if self.position.x > width {
            self.position.x = 0.0;
        }
    }
}

/// Opens the presentation window and runs until it is closed. Input is fed
/// through `bus`, so the session's own subscriptions do the navigation.
pub fn run(session: &PresentationSession, bus: &EventBus) {
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title("Presentation")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let (progress, _observer) = ProgressIndicator::attach(session);

    let mut rng = rand::rng();
    let mut particles: Vec<Particle> = (0..PARTICLE_COUNT)
        .map(|_| Particle::random(&mut rng, RENDER_WIDTH as f32, RENDER_HEIGHT as f32))
        .collect();

    let mut shown_index = session.current_index();
    let mut fade_timer = FADE_DURATION;

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let sw = rl.get_screen_width() as f32;
        let sh = rl.get_screen_height() as f32;

        // --- Input ---
        for (key, name) in NAV_KEYS {
            // Held keys repeat, as browser keydown does
            if rl.is_key_pressed(key) || rl.is_key_pressed_repeat(key) {
                bus.dispatch_key(&KeyEvent::new(name));
            }
        }

        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            // raylib reports wheel-up as positive, the DOM as negative
            bus.dispatch_wheel(&WheelEvent {
                delta_y: -wheel * WHEEL_UNITS_PER_NOTCH,
            });
        }

        let dots = DotLayout {
            x: sw - 24.0,
            center_y: sh / 2.0,
            spacing: 18.0,
            radius: 4.0,
        };
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            let count = session.controller().total_slides();
            if let Some(index) = dots.hit(mouse.x, mouse.y, count) {
                session.go_to_index(index as i64);
            }
        }

        // --- Update ---
        session.tick();

        let current = session.current_index();
        if current != shown_index {
            shown_index = current;
            fade_timer = 0.0;
        }
        fade_timer = (fade_timer + dt).min(FADE_DURATION);

        for particle in particles.iter_mut() {
            particle.update(dt, sw, sh);
        }

        // --- Draw ---
        let view = progress.borrow();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        for particle in particles.iter() {
            d.draw_circle_v(
                particle.position,
                particle.radius,
                Color::new(255, 255, 255, particle.alpha),
            );
        }

        let t = fade_timer / FADE_DURATION;
        let title = view.current_id().as_str().replace('-', " ").to_uppercase();
        let title_size = 64;
        let title_width = measure_text(&title, title_size);
        d.draw_text(
            &title,
            (sw as i32 - title_width) / 2,
            (sh as i32 - title_size) / 2,
            title_size,
            Color::new(255, 255, 255, (255.0 * t) as u8),
        );

        let markers = view.markers();
        for marker in markers.iter() {
            let (x, y) = dots.position(marker.index, markers.len());
            if marker.current {
                d.draw_circle_v(Vector2::new(x, y), dots.radius * 1.5, accent());
            } else {
                d.draw_circle_v(Vector2::new(x, y), dots.radius, Color::new(255, 255, 255, 51));
            }
        }

        let counter = view.counter();
        let counter_width = measure_text(&counter, 14);
        d.draw_text(
            &counter,
            sw as i32 - counter_width - 24,
            sh as i32 - 30,
            14,
            Color::new(255, 255, 255, 128),
        );
        d.draw_text(
            "Up / Down or Space to navigate",
            24,
            sh as i32 - 30,
            12,
            Color::new(255, 255, 255, 76),
        );
    }
}
