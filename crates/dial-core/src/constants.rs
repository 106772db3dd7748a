use std::time::Duration;

// Shared tuning constants for the dial, the fan slider and their animations.

// Temperature domain (degrees Fahrenheit)
pub const MIN_TEMPERATURE: f32 = 62.0;
pub const MAX_TEMPERATURE: f32 = 86.0;
pub const DEFAULT_TEMPERATURE: f32 = 76.0; // value a room starts with before it is adjusted

// Dial sweep, in radians of pointer travel around the pivot
pub const SWEEP_MIN: f32 = -1.85;
pub const SWEEP_MAX: f32 = 0.85;
pub const RING_ROTATION_GAIN: f32 = 0.8; // ring turns slower than the finger

// Viewport-relative dial geometry
pub const DIAL_RADIUS_PER_WIDTH: f32 = 0.9;
pub const DIAL_PIVOT_X_PAD: f32 = 25.0; // pivot sits just off the right edge
pub const DIAL_PIVOT_Y_LIFT: f32 = 50.0;

// Release momentum
pub const DECAY_MIN_RADIUS_SQ: f32 = 1.0; // below this the release is a tap
pub const DECAY_VELOCITY_GAIN: f32 = 0.5; // softens flings into the dial
pub const DECAY_DECELERATION: f32 = 0.995; // velocity multiplier per millisecond
pub const DECAY_REST_VELOCITY: f32 = 0.01; // rad/s

// Room transitions
pub const CONTEXT_BLEND_DURATION: Duration = Duration::from_millis(350);
pub const CONTEXT_SETTLE_DURATION: Duration = Duration::from_millis(300);

// Bell (the tick bulge under the finger)
pub const BELL_EXPAND_DURATION: Duration = Duration::from_millis(200);
pub const BELL_INTRO_RISE: Duration = Duration::from_millis(550);
pub const BELL_INTRO_FALL: Duration = Duration::from_millis(150);
pub const BELL_INTRO_ROTATION: f32 = 1.0; // radians the bell swings in from on first show

// Ambient bubbles
pub const AMBIENT_STEPS: usize = 15; // positions per loop
pub const AMBIENT_CYCLE: Duration = Duration::from_millis(1500);
pub const AMBIENT_MIN_SCALE: f32 = 0.15;
pub const AMBIENT_REST_JITTER: f32 = 1.05;
pub const AMBIENT_JITTER_SPAN: f32 = 1.1; // jitter drawn from [-span, span]
pub const AMBIENT_START_ARC_PX: f32 = 140.0; // arc length past 12 o'clock where bubbles start

// Fan slider
pub const FAN_MIN: f32 = 0.0;
pub const FAN_MAX: f32 = 100.0;
pub const FAN_ON_SPEED: f32 = 33.0;
pub const FAN_ANIMATION: Duration = Duration::from_millis(300);

// Chrome fades
pub const ACCENT_FADE: Duration = Duration::from_millis(300);
pub const DIM_FADE: Duration = Duration::from_millis(300);
pub const DIM_DELAY: Duration = Duration::from_millis(300); // dimming waits, brightening does not
pub const DISPLAY_DIMMED_OPACITY: f32 = 0.5;
pub const CONTROLS_DIMMED_OPACITY: f32 = 0.75;
