use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use dial_core::{
    ContextId, Effect, FeedbackSink, FrameSample, GestureSample, HvacMode, ImpactStyle, Palette,
    PaletteTable, Release, SurfaceParams, ThermostatSurface,
};
use glam::Vec2;
use instant::Instant;

const FRAME: Duration = Duration::from_micros(16_667);
const FAN_TRACK_PX: f32 = 240.0;

const ROOMS: [&str; 5] = ["Living Room", "Bedroom", "Kitchen", "Office", "Kids Room"];

const ROOM_PALETTES: [[&str; 5]; 5] = [
    ["#00BFFF", "#00FF7F", "#FFD700", "#ee5f26", "#00BFFF"],
    ["#A7C7E7", "#B5EAD7", "#FFF1BA", "#FFB7B2", "#A7C7E7"],
    ["#FFE066", "#FFD700", "#F4511E", "#FF7043", "#FF8A65"],
    ["#001F3F", "#0074D9", "#7FDBFF", "#B0E0E6", "#001F3F"],
    ["#800080", "#A259F7", "#B2FF59", "#76FF03", "#800080"],
];

struct LogHaptics {
    fired: usize,
}

impl FeedbackSink for LogHaptics {
    fn impact(&mut self, style: ImpactStyle) {
        self.fired += 1;
        log::debug!("[haptic] {:?}", style);
    }
}

struct Options {
    seed: u64,
    realtime: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut opts = Options {
        seed: 42,
        realtime: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => opts.realtime = true,
            s => {
                opts.seed = s
                    .parse()
                    .with_context(|| format!("expected a numeric seed or --realtime, got {s:?}"))?;
            }
        }
    }
    Ok(opts)
}

fn build_palettes() -> anyhow::Result<PaletteTable> {
    let mut table = PaletteTable::new(Palette::from_hex(&ROOM_PALETTES[0])?);
    for (i, stops) in ROOM_PALETTES.iter().enumerate() {
        let palette =
            Palette::from_hex(stops).with_context(|| format!("palette for {}", ROOMS[i]))?;
        table.insert(ContextId(i), palette);
    }
    Ok(table)
}

/// Drives the surface frame by frame, either as fast as possible or paced to
/// the wall clock.
struct Session {
    surface: ThermostatSurface,
    haptics: LogHaptics,
    realtime: bool,
    last_frame: Instant,
    frames: u64,
}

impl Session {
    fn frame(&mut self) -> FrameSample {
        let dt = if self.realtime {
            thread::sleep(FRAME);
            let now = Instant::now();
            let dt = now - self.last_frame;
            self.last_frame = now;
            dt
        } else {
            FRAME
        };
        let sample = self.surface.tick(dt);
        self.frames += 1;
        for effect in self.surface.dispatch_effects(&mut self.haptics) {
            match effect {
                Effect::ValueCommitted { context, value } => {
                    log::info!("[commit] {} = {:.0}°F", ROOMS[context.0 % ROOMS.len()], value)
                }
                Effect::FanCommitted(v) => log::info!("[commit] fan = {:.0}%", v),
                Effect::Haptic(_) => {}
            }
        }
        sample
    }

    fn run_for(&mut self, duration: Duration) -> FrameSample {
        let mut sample = self.frame();
        let mut elapsed = FRAME;
        while elapsed < duration {
            sample = self.frame();
            elapsed += FRAME;
        }
        sample
    }

    /// Sweep a finger along the dial's arc from `from` to `to` radians
    /// (y-up, around the pivot) over `frames` frames, releasing with the
    /// final tangential speed when `fling` is set.
    fn drag_dial(&mut self, from: f32, to: f32, frames: usize, fling: bool) -> Option<Release> {
        let geometry = self.surface.dial().geometry();
        let radius = geometry.radius;
        let at = |angle: f32| geometry.pivot + Vec2::new(angle.cos(), -angle.sin()) * radius;

        self.surface.dial_begin(1, GestureSample::at(at(from).x, at(from).y));
        let mut angle = from;
        for i in 1..=frames {
            angle = from + (to - from) * i as f32 / frames as f32;
            let p = at(angle);
            if let Some(t) = self.surface.dial_update(1, GestureSample::at(p.x, p.y)) {
                log::trace!("[drag] {}°F", t);
            }
            self.frame();
        }
        let p = at(angle);
        let mut release = GestureSample::at(p.x, p.y);
        if fling {
            let omega = (to - from) / (frames as f32 * FRAME.as_secs_f32());
            // tangential screen velocity for a y-up angular velocity
            let v = Vec2::new(-angle.sin(), -angle.cos()) * omega * radius;
            release = release.with_velocity(v.x, v.y);
        }
        self.surface.dial_end(1, release)
    }

    fn drag_fan(&mut self, dx: f32, frames: usize) -> Option<f32> {
        self.surface.fan_begin(2, GestureSample::default());
        for i in 1..=frames {
            let tx = dx * i as f32 / frames as f32;
            self.surface
                .fan_update(2, GestureSample::default().with_translation(tx, 0.0));
            self.frame();
        }
        self.surface.fan_end(2)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let opts = parse_args()?;

    let params = SurfaceParams {
        seed: opts.seed,
        ..SurfaceParams::default()
    };
    let surface = ThermostatSurface::new(params, build_palettes()?)?;
    let mut session = Session {
        surface,
        haptics: LogHaptics { fired: 0 },
        realtime: opts.realtime,
        last_frame: Instant::now(),
        frames: 0,
    };
    session.surface.set_fan_track_length(FAN_TRACK_PX);

    log::info!(
        "thermostat ready: {} at {}°F (seed {})",
        ROOMS[0],
        session.surface.temperature(),
        opts.seed
    );
    session.run_for(Duration::from_millis(700));

    session.surface.set_enabled(true);
    let s = session.run_for(Duration::from_millis(400));
    log::info!("switched on, fan {:.0}%", s.fan_value);

    let release = session.drag_dial(3.0, 3.3, 20, false);
    log::info!("slow drag -> {}°F ({:?})", session.surface.temperature(), release);

    let release = session.drag_dial(3.3, 2.9, 8, true);
    let s = session.run_for(Duration::from_millis(1500));
    log::info!("fling {:?} coasted to {}°F", release, s.temperature);

    for room in [1, 2, 0] {
        session.surface.select_room(ContextId(room));
        let mid = session.run_for(Duration::from_millis(150));
        log::info!(
            "{}: blend {:.2} ring rgb ({:.2}, {:.2}, {:.2})",
            ROOMS[room],
            mid.blend.factor,
            mid.uniforms.gradient[0][0],
            mid.uniforms.gradient[0][1],
            mid.uniforms.gradient[0][2]
        );
        let s = session.run_for(Duration::from_millis(400));
        log::info!("{} settled at {}°F", ROOMS[room], s.temperature);
    }

    let fan = session.drag_fan(60.0, 12);
    log::info!("fan dragged to {:?}", fan);

    session.surface.set_mode(HvacMode::Heat);
    let s = session.run_for(Duration::from_millis(350));
    log::info!(
        "mode {:?}, accent ({:.2}, {:.2}, {:.2})",
        session.surface.mode(),
        s.uniforms.accent[0],
        s.uniforms.accent[1],
        s.uniforms.accent[2]
    );

    session.surface.set_enabled(false);
    let s = session.run_for(Duration::from_millis(700));
    log::info!(
        "switched off: display opacity {:.2}, {} bubbles at rest",
        s.uniforms.display_opacity,
        s.particles.len()
    );

    for (room, value) in session.surface.rooms().iter() {
        log::info!("  {:<12} {:.0}°F", ROOMS[room.0 % ROOMS.len()], value);
    }
    log::info!(
        "{} frames, {} haptic ticks",
        session.frames,
        session.haptics.fired
    );
    Ok(())
}
