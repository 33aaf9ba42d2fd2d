use std::time::Duration;

pub const COOL_DOWN: Duration = Duration::from_millis(1000); // Time after an accepted move during which input is absorbed
pub const WHEEL_NOISE_THRESHOLD: f32 = 10.0;                 // Wheel deltas at or below this are treated as noise

pub const DEFAULT_SECTION_IDS: [&str; 7] = [
    "hero",
    "pain-point",
    "brain",
    "vision",
    "blueprint",
    "mastery",
    "summary",
];

pub const RENDER_WIDTH: i32 = 1280;           // Initial viewer window width
pub const RENDER_HEIGHT: i32 = 720;           // Initial viewer window height
pub const FPS: u32 = 60;                      // Frames per second
pub const FADE_DURATION: f32 = 0.5;           // Section fade-in when the index changes (seconds)
pub const PARTICLE_COUNT: usize = 120;        // Background particles drawn by the viewer
pub const WHEEL_UNITS_PER_NOTCH: f32 = 100.0; // Converts a raylib wheel notch into a DOM-like delta
