//! Window configuration for the desktop app.

use app::APP_NAME;
use app::ui_scale::resolve_ui_scale;
use macroquad::window::{Conf, screen_dpi_scale};
use std::env;

const DEFAULT_WINDOW_WIDTH: i32 = 960;
const DEFAULT_WINDOW_HEIGHT: i32 = 720;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Low-DPI framebuffers are not scaled automatically on every
        // desktop; request a high-DPI one so text tracks display scale.
        high_dpi: true,
        ..Default::default()
    }
}

pub fn runtime_ui_scale(persisted_ui_scale: Option<f32>) -> f32 {
    let dpi_scale = screen_dpi_scale();
    let override_value = env::var("UNDERVAULT_UI_SCALE").ok();
    resolve_ui_scale(dpi_scale, persisted_ui_scale, override_value.as_deref())
}
