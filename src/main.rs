mod gain;
mod output;
mod scope;
mod session;
mod voice;

use std::sync::{Arc, Mutex, mpsc};

use macroquad::{prelude::*, text::measure_text};
use output::AudioEngine;
use scope::{FeedHandle, ScopeFeed, ScopeRenderer, trace_points};
use session::{FREQ_MAX_HZ, FREQ_MIN_HZ, SessionCommand, SharedSession, ToneMode, spawn_session};
use tokio::runtime::Runtime;
use voice::Waveform;

const SCREEN_WIDTH: f32 = 960.0;
const SCREEN_HEIGHT: f32 = 640.0;
const KNOB_SIZE: f32 = 70.0;
const BUTTON_HEIGHT: f32 = 36.0;

// The frequency knob sweeps past both valid ends so the clamp path is
// reachable, like the original free-form number input.
const FREQ_KNOB_MIN_HZ: f32 = 10.0;
const FREQ_KNOB_MAX_HZ: f32 = 25_000.0;
const BEAT_KNOB_MAX_HZ: f32 = 20.0;
const SPEED_MIN_MS: f32 = 5.0;
const SPEED_MAX_MS: f32 = 120.0;

const PRESETS: [(&str, f32); 4] = [
    ("100 HZ", 100.0),
    ("440 HZ", 440.0),
    ("1 KHZ", 1_000.0),
    ("10 KHZ", 10_000.0),
];

// Trace styling is fixed regardless of theme.
const TRACE_STROKE: f32 = 2.0;
const TRACE_COLOR: Color = Color {
    r: 0.1,
    g: 0.45,
    b: 1.0,
    a: 1.0,
};

#[macroquad::main(window_conf)]
async fn main() {
    let runtime = Runtime::new().expect("tokio runtime");
    let (session, commands) = spawn_session(&runtime);
    let feed: FeedHandle = Arc::new(Mutex::new(ScopeFeed::new()));
    let _audio =
        AudioEngine::start(session.clone(), feed.clone()).expect("audio output stream");

    let mut renderer = ScopeRenderer::new();
    let mut panel = PanelState::new();
    let mut knob_drag = KnobDragState::default();
    let mut trace: Vec<(f32, f32)> = Vec::new();

    loop {
        let layout = compute_panel_layout();
        let palette = panel.theme.palette();

        if panel.alert.is_some() {
            handle_alert_dismiss(&mut panel);
        } else {
            handle_controls(
                &mut panel,
                &layout,
                &session,
                &commands,
                &mut renderer,
                &feed,
            );
            sync_session_from_panel(
                &mut panel,
                &mut knob_drag,
                &session,
                &commands,
                &mut renderer,
            );
        }

        if let Some(samples) = renderer.poll(get_time()) {
            trace = trace_points(&samples, layout.scope_rect.w, layout.scope_rect.h);
        }

        let mode = { session.lock().expect("session lock").mode() };
        draw_scene(&mut panel, &mut knob_drag, &layout, &palette, mode, &trace);

        next_frame().await;
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Tonelab".into(),
        fullscreen: false,
        sample_count: 1,
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        high_dpi: false,
        ..Default::default()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Theme {
    Dark,
    Light,
}

impl Theme {
    fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    fn button_label(&self) -> &'static str {
        match self {
            Theme::Dark => "LIGHT MODE",
            Theme::Light => "DARK MODE",
        }
    }

    fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::new(0.07, 0.07, 0.09, 1.0),
                panel: Color::new(0.11, 0.11, 0.14, 0.95),
                outline: Color::new(0.75, 0.78, 0.85, 1.0),
                outline_dim: Color::new(0.45, 0.48, 0.55, 0.5),
                text: Color::new(0.88, 0.9, 0.94, 1.0),
                control: Color::new(0.18, 0.18, 0.22, 1.0),
                control_active: Color::new(0.75, 0.78, 0.85, 1.0),
                control_text: Color::new(0.07, 0.07, 0.09, 1.0),
            },
            Theme::Light => Palette {
                background: Color::new(0.93, 0.93, 0.95, 1.0),
                panel: Color::new(0.99, 0.99, 1.0, 0.95),
                outline: Color::new(0.25, 0.27, 0.32, 1.0),
                outline_dim: Color::new(0.55, 0.57, 0.62, 0.5),
                text: Color::new(0.12, 0.13, 0.16, 1.0),
                control: Color::new(0.84, 0.84, 0.88, 1.0),
                control_active: Color::new(0.25, 0.27, 0.32, 1.0),
                control_text: Color::new(0.97, 0.97, 1.0, 1.0),
            },
        }
    }
}

struct Palette {
    background: Color,
    panel: Color,
    outline: Color,
    outline_dim: Color,
    text: Color,
    control: Color,
    control_active: Color,
    control_text: Color,
}

struct PanelState {
    frequency_value: f32,
    beat_value: f32,
    volume_value: f32,
    speed_value: f32,
    waveform: Waveform,
    theme: Theme,
    alert: Option<String>,
    last_sent_frequency: f32,
}

impl PanelState {
    fn new() -> Self {
        Self {
            frequency_value: frequency_to_value(440.0),
            beat_value: 5.0 / BEAT_KNOB_MAX_HZ,
            volume_value: 0.5,
            speed_value: (30.0 - SPEED_MIN_MS) / (SPEED_MAX_MS - SPEED_MIN_MS),
            waveform: Waveform::Sine,
            theme: Theme::Dark,
            alert: None,
            last_sent_frequency: 440.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KnobId {
    Frequency,
    BeatOffset,
    Volume,
    ScopeSpeed,
}

#[derive(Default)]
struct KnobDragState {
    active_knob: Option<KnobId>,
    origin_value: f32,
    origin_y: f32,
}

#[derive(Clone)]
struct PanelLayout {
    tone_rect: Rect,
    beats_rect: Rect,
    output_rect: Rect,
    scope_panel: Rect,
    frequency_knob: Rect,
    beat_knob: Rect,
    volume_knob: Rect,
    speed_knob: Rect,
    waveform_rects: [Rect; 4],
    preset_rects: [Rect; 4],
    single_button: Rect,
    beats_button: Rect,
    theme_button: Rect,
    scope_rect: Rect,
}

fn compute_panel_layout() -> PanelLayout {
    let margin = 36.0;
    let gap = 18.0;
    let top = 40.0;
    let controls_height = 250.0;
    let usable_width = SCREEN_WIDTH - margin * 2.0 - gap * 2.0;

    let width_factors = [0.44, 0.26, 0.30];
    let tone_rect = Rect::new(margin, top, usable_width * width_factors[0], controls_height);
    let beats_rect = Rect::new(
        tone_rect.x + tone_rect.w + gap,
        top,
        usable_width * width_factors[1],
        controls_height,
    );
    let output_rect = Rect::new(
        beats_rect.x + beats_rect.w + gap,
        top,
        usable_width * width_factors[2],
        controls_height,
    );

    let frequency_knob = Rect::new(
        tone_rect.x + 24.0,
        tone_rect.y + 40.0,
        KNOB_SIZE,
        KNOB_SIZE,
    );
    let wave_button = vec2(86.0, 26.0);
    let mut waveform_rects = [Rect::new(0.0, 0.0, 0.0, 0.0); 4];
    let wave_x = tone_rect.x + tone_rect.w - wave_button.x * 2.0 - 34.0;
    for (index, rect) in waveform_rects.iter_mut().enumerate() {
        let row = index / 2;
        let col = index % 2;
        *rect = Rect::new(
            wave_x + col as f32 * (wave_button.x + 10.0),
            tone_rect.y + 40.0 + row as f32 * (wave_button.y + 10.0),
            wave_button.x,
            wave_button.y,
        );
    }
    let mut preset_rects = [Rect::new(0.0, 0.0, 0.0, 0.0); 4];
    let preset_width = (tone_rect.w - 48.0 - 30.0) / 4.0;
    for (index, rect) in preset_rects.iter_mut().enumerate() {
        *rect = Rect::new(
            tone_rect.x + 24.0 + index as f32 * (preset_width + 10.0),
            tone_rect.y + tone_rect.h - 54.0,
            preset_width,
            26.0,
        );
    }

    let beat_knob = Rect::new(
        beats_rect.x + beats_rect.w * 0.5 - KNOB_SIZE * 0.5,
        beats_rect.y + 40.0,
        KNOB_SIZE,
        KNOB_SIZE,
    );
    let beats_button = Rect::new(
        beats_rect.x + 20.0,
        beats_rect.y + beats_rect.h - 60.0,
        beats_rect.w - 40.0,
        BUTTON_HEIGHT,
    );

    let volume_knob = Rect::new(
        output_rect.x + output_rect.w * 0.5 - KNOB_SIZE * 0.5,
        output_rect.y + 40.0,
        KNOB_SIZE,
        KNOB_SIZE,
    );
    let single_button = Rect::new(
        output_rect.x + 20.0,
        output_rect.y + output_rect.h - 60.0,
        output_rect.w - 40.0,
        BUTTON_HEIGHT,
    );

    let scope_panel = Rect::new(
        margin,
        top + controls_height + 40.0,
        SCREEN_WIDTH - margin * 2.0,
        SCREEN_HEIGHT - top - controls_height - 80.0,
    );
    let speed_knob = Rect::new(
        scope_panel.x + scope_panel.w - KNOB_SIZE - 28.0,
        scope_panel.y + 40.0,
        KNOB_SIZE,
        KNOB_SIZE,
    );
    let scope_rect = Rect::new(
        scope_panel.x + 16.0,
        scope_panel.y + 16.0,
        scope_panel.w - KNOB_SIZE - 76.0,
        scope_panel.h - 32.0,
    );

    let theme_button = Rect::new(SCREEN_WIDTH - margin - 130.0, 6.0, 130.0, 26.0);

    PanelLayout {
        tone_rect,
        beats_rect,
        output_rect,
        scope_panel,
        frequency_knob,
        beat_knob,
        volume_knob,
        speed_knob,
        waveform_rects,
        preset_rects,
        single_button,
        beats_button,
        theme_button,
        scope_rect,
    }
}

fn mouse_position_vec() -> Vec2 {
    let (x, y) = mouse_position();
    vec2(x, y)
}

fn value_to_frequency(value: f32) -> f32 {
    let ratio = FREQ_KNOB_MAX_HZ / FREQ_KNOB_MIN_HZ;
    FREQ_KNOB_MIN_HZ * ratio.powf(value.clamp(0.0, 1.0))
}

fn frequency_to_value(hz: f32) -> f32 {
    let ratio = FREQ_KNOB_MAX_HZ / FREQ_KNOB_MIN_HZ;
    (hz / FREQ_KNOB_MIN_HZ).ln() / ratio.ln()
}

fn value_to_beat_offset(value: f32) -> f32 {
    value.clamp(0.0, 1.0) * BEAT_KNOB_MAX_HZ
}

fn value_to_interval_ms(value: f32) -> u32 {
    (SPEED_MIN_MS + value.clamp(0.0, 1.0) * (SPEED_MAX_MS - SPEED_MIN_MS)).round() as u32
}

fn handle_controls(
    panel: &mut PanelState,
    layout: &PanelLayout,
    session: &SharedSession,
    commands: &mpsc::Sender<SessionCommand>,
    renderer: &mut ScopeRenderer,
    feed: &FeedHandle,
) {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return;
    }
    let mouse = mouse_position_vec();

    if layout.theme_button.contains(mouse) {
        panel.theme = panel.theme.toggle();
    }

    for (index, rect) in layout.waveform_rects.iter().enumerate() {
        if rect.contains(mouse) {
            let waveform = Waveform::VALUES[index];
            panel.waveform = waveform;
            let _ = commands.send(SessionCommand::SetWaveform(waveform));
        }
    }

    for (index, rect) in layout.preset_rects.iter().enumerate() {
        if rect.contains(mouse) {
            let (_, hz) = PRESETS[index];
            let _ = commands.send(SessionCommand::ApplyPreset(hz));
            panel.frequency_value = frequency_to_value(hz);
            panel.last_sent_frequency = hz;
        }
    }

    if layout.single_button.contains(mouse) {
        let mut guard = session.lock().expect("session lock");
        if guard.mode() == ToneMode::SingleTone {
            guard.stop_single_tone();
            drop(guard);
            renderer.stop();
        } else {
            match guard.start_single_tone() {
                Ok(()) => {
                    drop(guard);
                    renderer.attach(feed.clone());
                    renderer.start(get_time());
                }
                Err(err) => panel.alert = Some(err.to_string()),
            }
        }
    }

    if layout.beats_button.contains(mouse) {
        let mut guard = session.lock().expect("session lock");
        if guard.mode() == ToneMode::BeatTones {
            guard.stop_beat_tones();
            drop(guard);
            renderer.stop();
        } else {
            let offset = value_to_beat_offset(panel.beat_value);
            match guard.start_beat_tones(offset) {
                Ok(()) => {
                    drop(guard);
                    renderer.attach(feed.clone());
                    renderer.start(get_time());
                }
                Err(err) => panel.alert = Some(err.to_string()),
            }
        }
    }
}

fn sync_session_from_panel(
    panel: &mut PanelState,
    knob_drag: &mut KnobDragState,
    session: &SharedSession,
    commands: &mpsc::Sender<SessionCommand>,
    renderer: &mut ScopeRenderer,
) {
    let hz = value_to_frequency(panel.frequency_value);
    if (hz - panel.last_sent_frequency).abs() > 0.01 {
        let result = {
            let mut guard = session.lock().expect("session lock");
            guard.set_frequency(hz)
        };
        match result {
            Ok(()) => panel.last_sent_frequency = hz,
            Err(err) => {
                let clamped = hz.clamp(FREQ_MIN_HZ, FREQ_MAX_HZ);
                panel.frequency_value = frequency_to_value(clamped);
                panel.last_sent_frequency = clamped;
                panel.alert = Some(err.to_string());
                knob_drag.active_knob = None;
            }
        }
    }

    let _ = commands.send(SessionCommand::SetVolume(panel.volume_value));
    let _ = commands.send(SessionCommand::SetBeatOffset(value_to_beat_offset(
        panel.beat_value,
    )));
    renderer.set_interval_ms(value_to_interval_ms(panel.speed_value));
}

fn handle_alert_dismiss(panel: &mut PanelState) {
    if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Enter) {
        panel.alert = None;
        return;
    }
    if is_mouse_button_pressed(MouseButton::Left)
        && alert_ok_rect().contains(mouse_position_vec())
    {
        panel.alert = None;
    }
}

fn alert_box_rect() -> Rect {
    Rect::new(
        SCREEN_WIDTH * 0.5 - 230.0,
        SCREEN_HEIGHT * 0.5 - 80.0,
        460.0,
        160.0,
    )
}

fn alert_ok_rect() -> Rect {
    let alert = alert_box_rect();
    Rect::new(
        alert.x + alert.w * 0.5 - 45.0,
        alert.y + alert.h - 52.0,
        90.0,
        32.0,
    )
}

fn draw_scene(
    panel: &mut PanelState,
    knob_drag: &mut KnobDragState,
    layout: &PanelLayout,
    palette: &Palette,
    mode: ToneMode,
    trace: &[(f32, f32)],
) {
    clear_background(palette.background);
    let locked = panel.alert.is_some();

    draw_section(&layout.tone_rect, "TONE", palette);
    draw_section(&layout.beats_rect, "BEATS", palette);
    draw_section(&layout.output_rect, "OUTPUT", palette);
    draw_section(&layout.scope_panel, "SCOPE", palette);

    let frequency_text = format_frequency(value_to_frequency(panel.frequency_value));
    draw_knob_widget(
        knob_drag,
        KnobId::Frequency,
        layout.frequency_knob,
        &mut panel.frequency_value,
        "FREQUENCY",
        Some(&frequency_text),
        palette,
        locked,
    );

    draw_text_ex(
        "WAVEFORM",
        layout.waveform_rects[0].x,
        layout.waveform_rects[0].y - 10.0,
        TextParams {
            font_size: 14,
            color: palette.text,
            ..Default::default()
        },
    );
    for (index, rect) in layout.waveform_rects.iter().enumerate() {
        let waveform = Waveform::VALUES[index];
        draw_small_button(*rect, waveform.label(), panel.waveform == waveform, palette);
    }

    draw_text_ex(
        "PRESETS",
        layout.preset_rects[0].x,
        layout.preset_rects[0].y - 8.0,
        TextParams {
            font_size: 14,
            color: palette.text,
            ..Default::default()
        },
    );
    for (index, rect) in layout.preset_rects.iter().enumerate() {
        draw_small_button(*rect, PRESETS[index].0, false, palette);
    }

    let beat_text = format!("{:.1} HZ", value_to_beat_offset(panel.beat_value));
    draw_knob_widget(
        knob_drag,
        KnobId::BeatOffset,
        layout.beat_knob,
        &mut panel.beat_value,
        "BEAT OFFSET",
        Some(&beat_text),
        palette,
        locked,
    );
    let beats_label = if mode == ToneMode::BeatTones {
        "STOP BEATS"
    } else {
        "PLAY BEATS"
    };
    draw_push_button(layout.beats_button, beats_label, mode == ToneMode::BeatTones, palette);

    let volume_text = format!("VOL {:.2}", panel.volume_value);
    draw_knob_widget(
        knob_drag,
        KnobId::Volume,
        layout.volume_knob,
        &mut panel.volume_value,
        "VOLUME",
        Some(&volume_text),
        palette,
        locked,
    );
    let single_label = if mode == ToneMode::SingleTone {
        "STOP SINGLE TONE"
    } else {
        "START SINGLE TONE"
    };
    draw_push_button(
        layout.single_button,
        single_label,
        mode == ToneMode::SingleTone,
        palette,
    );

    let speed_text = format!("{} MS", value_to_interval_ms(panel.speed_value));
    draw_knob_widget(
        knob_drag,
        KnobId::ScopeSpeed,
        layout.speed_knob,
        &mut panel.speed_value,
        "SPEED",
        Some(&speed_text),
        palette,
        locked,
    );

    draw_scope(&layout.scope_rect, trace, palette);
    draw_push_button(layout.theme_button, panel.theme.button_label(), false, palette);

    if let Some(message) = &panel.alert {
        draw_alert(message, palette);
    }
}

fn format_frequency(hz: f32) -> String {
    if hz >= 1_000.0 {
        format!("{:.2} KHZ", hz / 1_000.0)
    } else {
        format!("{hz:.1} HZ")
    }
}

fn draw_section(rect: &Rect, label: &str, palette: &Palette) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, palette.panel);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, palette.outline);
    draw_text_ex(
        label,
        rect.x + 6.0,
        rect.y - 6.0,
        TextParams {
            font_size: 18,
            color: palette.text,
            ..Default::default()
        },
    );
}

fn draw_small_button(rect: Rect, label: &str, active: bool, palette: &Palette) {
    let fill = if active {
        palette.control_active
    } else {
        palette.control
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, palette.outline);
    let color = if active {
        palette.control_text
    } else {
        palette.text
    };
    draw_centered_text(label, rect, 14, color);
}

fn draw_push_button(rect: Rect, label: &str, active: bool, palette: &Palette) {
    let fill = if active {
        palette.control_active
    } else {
        palette.control
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, palette.outline);
    let color = if active {
        palette.control_text
    } else {
        palette.text
    };
    draw_centered_text(label, rect, 16, color);
}

fn draw_knob_widget(
    knob_drag: &mut KnobDragState,
    knob_id: KnobId,
    rect: Rect,
    value: &mut f32,
    label: &str,
    display: Option<&str>,
    palette: &Palette,
    locked: bool,
) {
    if !locked {
        handle_knob_drag(knob_drag, knob_id, rect, value);
    }
    let center = vec2(rect.x + rect.w * 0.5, rect.y + rect.h * 0.5);
    let radius = rect.w.min(rect.h) * 0.35;
    draw_circle(center.x, center.y, radius + 6.0, palette.control);
    draw_circle_lines(center.x, center.y, radius + 6.0, 1.0, palette.outline_dim);
    draw_circle_lines(center.x, center.y, radius, 1.0, palette.outline_dim);
    let start_angle = -150.0f32.to_radians();
    let angle_range = 300.0f32.to_radians();
    let theta = start_angle + value.clamp(0.0, 1.0) * angle_range;
    let pointer = vec2(theta.cos(), theta.sin()) * radius * 0.8;
    draw_line(
        center.x,
        center.y,
        center.x + pointer.x,
        center.y + pointer.y,
        3.0,
        palette.outline,
    );
    if let Some(text) = display {
        draw_centered_text(
            text,
            Rect::new(rect.x - 20.0, rect.y - 14.0, rect.w + 40.0, 20.0),
            14,
            palette.text,
        );
    }
    draw_centered_text(
        label,
        Rect::new(rect.x - 20.0, rect.y + rect.h + 2.0, rect.w + 40.0, 18.0),
        16,
        palette.text,
    );
}

fn handle_knob_drag(knob_drag: &mut KnobDragState, knob_id: KnobId, rect: Rect, value: &mut f32) {
    let mouse = mouse_position_vec();
    if is_mouse_button_pressed(MouseButton::Left) && rect.contains(mouse) {
        knob_drag.active_knob = Some(knob_id);
        knob_drag.origin_value = *value;
        knob_drag.origin_y = mouse.y;
    }
    if let Some(active) = knob_drag.active_knob {
        if active == knob_id {
            if is_mouse_button_down(MouseButton::Left) {
                let delta = (knob_drag.origin_y - mouse.y) * 0.005;
                *value = (knob_drag.origin_value + delta).clamp(0.0, 1.0);
            } else {
                knob_drag.active_knob = None;
            }
        }
    }
    if is_mouse_button_released(MouseButton::Left) && knob_drag.active_knob == Some(knob_id) {
        knob_drag.active_knob = None;
    }
    let (_x, wheel) = mouse_wheel();
    if rect.contains(mouse) && wheel.abs() > f32::EPSILON {
        *value = (*value + wheel * 0.03).clamp(0.0, 1.0);
    }
}

fn draw_scope(rect: &Rect, trace: &[(f32, f32)], palette: &Palette) {
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, palette.outline);
    // centerline marks silence
    draw_line(
        rect.x,
        rect.y + rect.h * 0.5,
        rect.x + rect.w,
        rect.y + rect.h * 0.5,
        1.0,
        palette.outline_dim,
    );
    for pair in trace.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(
            rect.x + x0,
            rect.y + y0,
            rect.x + x1,
            rect.y + y1,
            TRACE_STROKE,
            TRACE_COLOR,
        );
    }
}

fn draw_alert(message: &str, palette: &Palette) {
    draw_rectangle(
        0.0,
        0.0,
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        Color::new(0.0, 0.0, 0.0, 0.45),
    );
    let rect = alert_box_rect();
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, palette.panel);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, palette.outline);
    draw_centered_text(
        message,
        Rect::new(rect.x, rect.y + 24.0, rect.w, 40.0),
        16,
        palette.text,
    );
    let ok = alert_ok_rect();
    draw_rectangle(ok.x, ok.y, ok.w, ok.h, palette.control);
    draw_rectangle_lines(ok.x, ok.y, ok.w, ok.h, 1.0, palette.outline);
    draw_centered_text("OK", ok, 16, palette.text);
}

fn draw_centered_text(text: &str, rect: Rect, size: u16, color: Color) {
    let measure = measure_text(text, None, size, 1.0);
    let x = rect.x + rect.w * 0.5 - measure.width * 0.5;
    let y = rect.y + rect.h * 0.5 + measure.height * 0.5;
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font_size: size,
            color,
            ..Default::default()
        },
    );
}
