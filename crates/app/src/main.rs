use app::app_loop;
use app::scale_prefs::{self, ScalePreference};
use app::seed::{pick_seed, roll_seed};
use app::ui_scale::apply_ui_scale_action;
use game_core::Game;
use macroquad::prelude::*;
use taffy::TaffyTree;

mod frame_input;
mod game_layout;
mod pad_input;
mod ui_render;
mod ui_text;
mod window_config;

use frame_input::capture_frame_input;
use pad_input::PadSource;
use window_config::{build_window_conf, runtime_ui_scale};

#[macroquad::main(build_window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let seed = match pick_seed(&args, roll_seed()) {
        Ok(choice) => choice.value(),
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: undervault [--seed <number>]");
            return;
        }
    };

    let prefs_path = scale_prefs::preference_path();
    let persisted_scale = prefs_path
        .as_deref()
        .and_then(|path| scale_prefs::load_preference(path).ok())
        .map(|pref| pref.scale);
    let mut ui_scale = runtime_ui_scale(persisted_scale);

    let mut game = Game::new(seed);
    let mut pad = PadSource::new();
    let mut taffy: TaffyTree<()> = TaffyTree::new();
    let layout_nodes = game_layout::setup_layout(&mut taffy);

    loop {
        let input = capture_frame_input();
        if let Some(action) = input.ui_scale_action {
            ui_scale = apply_ui_scale_action(ui_scale, action);
            if let Some(path) = prefs_path.as_deref() {
                // A failed preference write is not worth interrupting play.
                let _ = scale_prefs::save_preference(ScalePreference::with_scale(ui_scale), path);
            }
        }

        let elapsed_ms = (get_frame_time() * 1000.0).round() as u32;
        app_loop::tick(&mut game, &input.keys_pressed, &pad.poll(), elapsed_ms);
        if game.quit_requested() {
            break;
        }

        clear_background(BLACK);
        let layout = game_layout::compute_frame_layout(
            &mut taffy,
            &layout_nodes,
            screen_width(),
            screen_height(),
        );
        ui_render::draw_frame(&game, seed, &layout, ui_scale);
        next_frame().await
    }
}
