//! Ring Drill entry point
//!
//! Window setup, input gathering and drawing. All mechanic behavior lives
//! in the library; this binary turns keys and clicks into tick commands
//! and renders whatever the scene builder hands back.

use std::time::{SystemTime, UNIX_EPOCH};

// leading :: picks the crate the sim types use; macroquad's prelude
// re-exports its own bundled glam under the same name
use ::glam::Vec2 as SimVec2;
use macroquad::prelude::*;

use ring_drill::TrainerConfig;
use ring_drill::consts::{ARENA_CENTER, ARENA_RADIUS, WINDOW_HEIGHT, WINDOW_WIDTH};
use ring_drill::scene::{self, ParamRow, Rgba, Scene};
use ring_drill::sim::{ParamKey, Phase, TickInput, TrainerState, tick};

// === Panel layout ===
const PANEL_X: f32 = 850.0;
const PANEL_Y: f32 = 50.0;
const PANEL_HEIGHT: f32 = 300.0;
const ROW_HEIGHT: f32 = 45.0;
const BAR_OFFSET_X: f32 = 150.0;
const BAR_WIDTH: f32 = 100.0;
const BAR_HEIGHT: f32 = 20.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Ring Drill".to_string(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba(c.r, c.g, c.b, c.a)
}

fn scatter_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn save_tuning(state: &TrainerState) {
    TrainerConfig {
        params: state.params.clone(),
    }
    .save();
}

/// Turn this frame's keys and clicks into tick commands. The arrow keys
/// are modal: parameter tuning normally, cursor and step control while
/// rewinding.
fn gather_input(state: &TrainerState, selected: &mut usize) -> TickInput {
    let mut input = TickInput::default();

    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        input.place_marker = Some(SimVec2::new(x, y));
    }
    if is_key_pressed(KeyCode::P) {
        input.scatter = Some(scatter_seed());
    }
    if is_key_pressed(KeyCode::Space) {
        if state.phase == Phase::Setup {
            input.start = true;
        } else {
            input.toggle_pause = true;
        }
    }
    if is_key_pressed(KeyCode::R) {
        input.reset = true;
    }
    if is_key_pressed(KeyCode::B) {
        input.toggle_rewind = true;
    }

    if state.phase.is_rewinding() {
        if is_key_pressed(KeyCode::Left) {
            input.scrub = -1;
        }
        if is_key_pressed(KeyCode::Right) {
            input.scrub = 1;
        }
        if is_key_pressed(KeyCode::Up) {
            input.adjust_step = 1;
        }
        if is_key_pressed(KeyCode::Down) {
            input.adjust_step = -1;
        }
    } else {
        let count = ParamKey::ALL.len();
        if is_key_pressed(KeyCode::Up) {
            *selected = (*selected + count - 1) % count;
        }
        if is_key_pressed(KeyCode::Down) {
            *selected = (*selected + 1) % count;
        }
        if is_key_pressed(KeyCode::Left) {
            input.adjust_param = Some((ParamKey::ALL[*selected], -1));
        }
        if is_key_pressed(KeyCode::Right) {
            input.adjust_param = Some((ParamKey::ALL[*selected], 1));
        }
    }

    input
}

fn draw_arena() {
    draw_circle(
        ARENA_CENTER.x,
        ARENA_CENTER.y,
        ARENA_RADIUS,
        Color::from_rgba(128, 128, 128, 30),
    );
    draw_circle_lines(ARENA_CENTER.x, ARENA_CENTER.y, ARENA_RADIUS, 3.0, WHITE);
}

fn draw_markers(frame: &Scene) {
    for ring in &frame.rings {
        draw_circle_lines(
            ring.center.x,
            ring.center.y,
            ring.radius,
            ring.stroke,
            to_color(ring.color),
        );
    }
    for disc in &frame.discs {
        draw_circle(disc.center.x, disc.center.y, disc.radius, to_color(disc.color));
    }
    for star in &frame.stars {
        let color = to_color(star.color);
        let center = vec2(star.center.x, star.center.y);
        // fan fill; every triangle of a star polygon contains the center
        for i in 0..star.points.len() {
            let a = star.points[i];
            let b = star.points[(i + 1) % star.points.len()];
            draw_triangle(center, vec2(a.x, a.y), vec2(b.x, b.y), color);
        }
    }
}

fn draw_param_row(index: usize, row: &ParamRow) {
    let y = PANEL_Y + 50.0 + index as f32 * ROW_HEIGHT;
    let panel_width = WINDOW_WIDTH as f32 - PANEL_X - 20.0;

    if row.selected {
        draw_rectangle(
            PANEL_X + 5.0,
            y - 5.0,
            panel_width - 10.0,
            40.0,
            Color::from_rgba(100, 100, 100, 255),
        );
    }
    draw_text(&row.label, PANEL_X + 10.0, y + 12.0, 16.0, WHITE);
    draw_text(&row.value, PANEL_X + 10.0, y + 32.0, 16.0, YELLOW);

    let bar_x = PANEL_X + BAR_OFFSET_X;
    draw_rectangle(bar_x, y + 10.0, BAR_WIDTH, BAR_HEIGHT, Color::from_rgba(50, 50, 50, 255));
    let fill = if row.selected {
        Color::from_rgba(0, 150, 255, 255)
    } else {
        Color::from_rgba(100, 100, 200, 255)
    };
    draw_rectangle(bar_x, y + 10.0, BAR_WIDTH * row.fraction, BAR_HEIGHT, fill);
    draw_rectangle_lines(bar_x, y + 10.0, BAR_WIDTH, BAR_HEIGHT, 1.0, WHITE);
}

fn draw_hud(frame: &Scene) {
    draw_text(&frame.status, 10.0, 30.0, 28.0, WHITE);

    let panel_width = WINDOW_WIDTH as f32 - PANEL_X - 20.0;
    draw_rectangle_lines(PANEL_X, PANEL_Y, panel_width, PANEL_HEIGHT, 2.0, GRAY);
    draw_text("PARAMETERS", PANEL_X + 10.0, PANEL_Y + 25.0, 20.0, WHITE);
    for (index, row) in frame.params.iter().enumerate() {
        draw_param_row(index, row);
    }

    if let Some(hud) = &frame.rewind {
        draw_text(hud, PANEL_X, PANEL_Y + PANEL_HEIGHT + 40.0, 20.0, ORANGE);
    }
    draw_text(&frame.hint, 10.0, screen_height() - 16.0, 18.0, GRAY);
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Ring Drill starting");

    let config = TrainerConfig::load();
    let mut state = TrainerState::with_params(config.params.clone());
    let mut selected = 0usize;

    // route window-close through the loop exit so tuning still gets saved
    prevent_quit();

    loop {
        if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
            break;
        }

        let input = gather_input(&state, &mut selected);
        let now = get_time();
        tick(&mut state, &input, now);
        if input.reset {
            save_tuning(&state);
        }

        let frame = scene::build(&state, now, ParamKey::ALL[selected]);
        clear_background(BLACK);
        draw_arena();
        draw_markers(&frame);
        draw_hud(&frame);

        next_frame().await;
    }

    save_tuning(&state);
    log::info!("Ring Drill shut down");
}
