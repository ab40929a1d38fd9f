//! Rendering for every screen. Each frame redraws from the full game
//! snapshot; nothing here retains state between frames.

use crate::game_layout::{FrameLayout, PanelRect};
use crate::ui_text::{TUTORIAL_LINES, battle_line, event_log_line, stats_panel_lines, status_text};
use app::APP_NAME;
use game_core::{
    BattleAction, Enemy, EnemyKind, Game, GameState, IntroOption, Pos, RelicKind, Screen, TileKind,
    TurnPhase, TutorialOption,
};
use macroquad::prelude::*;

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const LINE_HEIGHT: f32 = 18.0;
const MENU_LINE_STEP: f32 = 30.0;

type Glyph = (&'static str, Color);

pub fn draw_frame(game: &Game, run_seed: u64, layout: &FrameLayout, ui_scale: f32) {
    match game.screen() {
        Screen::Loading => draw_loading_screen(ui_scale),
        Screen::Intro => draw_intro_screen(game, ui_scale),
        Screen::Tutorial => draw_tutorial_screen(game, ui_scale),
        Screen::Exploring => draw_exploring_screen(game, run_seed, layout, ui_scale),
        Screen::Battling => draw_battle_screen(game, ui_scale),
    }
}

fn draw_loading_screen(ui_scale: f32) {
    draw_centered_line(APP_NAME, screen_height() * 0.4, scaled(48.0, ui_scale), GOLD);
    draw_centered_line("Loading...", screen_height() * 0.55, scaled(24.0, ui_scale), LIGHTGRAY);
}

fn draw_intro_screen(game: &Game, ui_scale: f32) {
    draw_centered_line(APP_NAME, screen_height() * 0.25, scaled(48.0, ui_scale), GOLD);
    draw_centered_line(
        "A crawl beneath the world",
        screen_height() * 0.33,
        scaled(20.0, ui_scale),
        LIGHTGRAY,
    );

    let base_y = screen_height() * 0.5;
    for (index, option) in IntroOption::MENU.iter().enumerate() {
        let selected = index == game.intro_index();
        draw_menu_line(option.label(), base_y, index, selected, ui_scale);
    }
}

fn draw_tutorial_screen(game: &Game, ui_scale: f32) {
    draw_centered_line("How to play", screen_height() * 0.15, scaled(36.0, ui_scale), GOLD);

    let text_top = screen_height() * 0.28;
    for (index, line) in TUTORIAL_LINES.iter().enumerate() {
        draw_centered_line(
            line,
            text_top + index as f32 * scaled(24.0, ui_scale),
            scaled(18.0, ui_scale),
            LIGHTGRAY,
        );
    }

    let base_y = screen_height() * 0.7;
    for (index, option) in TutorialOption::MENU.iter().enumerate() {
        let selected = index == game.tutorial_index();
        draw_menu_line(option.label(), base_y, index, selected, ui_scale);
    }
}

fn draw_exploring_screen(game: &Game, run_seed: u64, layout: &FrameLayout, ui_scale: f32) {
    draw_panel_borders(layout, ui_scale);
    draw_status_panel(game, layout.status, ui_scale);
    draw_tile_map(game, layout.map, ui_scale);
    draw_stats_panel(game, run_seed, layout.stats, ui_scale);
    draw_event_log(game, layout.event_log, ui_scale);
}

fn draw_battle_screen(game: &Game, ui_scale: f32) {
    let Some(battle) = game.battle() else {
        return;
    };
    let state = game.state();
    let enemy = state.enemies.get(battle.enemy);

    if let Some(enemy) = enemy {
        draw_centered_line(
            enemy.kind.display_name(),
            screen_height() * 0.15,
            scaled(36.0, ui_scale),
            RED,
        );
        draw_centered_line(
            &format!("{} / {}", enemy.hp.max(0), enemy.max_hp),
            screen_height() * 0.23,
            scaled(24.0, ui_scale),
            LIGHTGRAY,
        );
    }

    draw_centered_line(
        &format!("You  {} / {}", state.player.hp, state.player.max_hp),
        screen_height() * 0.38,
        scaled(24.0, ui_scale),
        GREEN,
    );

    if let Some(event) = game.battle_event() {
        draw_centered_line(
            &battle_line(&event),
            screen_height() * 0.5,
            scaled(22.0, ui_scale),
            YELLOW,
        );
    }

    let base_y = screen_height() * 0.62;
    for (index, action) in BattleAction::MENU.iter().enumerate() {
        let selected = index == battle.menu_index;
        draw_menu_line(action.label(), base_y, index, selected, ui_scale);
    }

    if battle.phase == TurnPhase::EnemyResolution {
        draw_centered_line("...", screen_height() * 0.9, scaled(22.0, ui_scale), GRAY);
    }
}

fn draw_panel_borders(layout: &FrameLayout, ui_scale: f32) {
    for panel in [layout.status, layout.map, layout.stats, layout.event_log] {
        draw_rectangle_lines(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            scaled(BORDER_THICKNESS, ui_scale),
            BORDER_COLOR,
        );
    }
}

fn draw_status_panel(game: &Game, panel: PanelRect, ui_scale: f32) {
    draw_text(
        &status_text(game),
        panel.x + scaled(PANEL_PAD_X, ui_scale),
        panel.y + scaled(PANEL_PAD_Y, ui_scale),
        scaled(20.0, ui_scale),
        WHITE,
    );
}

fn draw_tile_map(game: &Game, panel: PanelRect, ui_scale: f32) {
    let state = game.state();
    let map = &state.map;
    let overlay = build_entity_overlay(state);

    for y in 0..map.height {
        for x in 0..map.width {
            let pos = Pos { y: y as i32, x: x as i32 };
            let index = y * map.width + x;
            let (glyph, color) = overlay[index].unwrap_or_else(|| tile_glyph(map.tile_at(pos)));

            draw_text(
                glyph,
                panel.x + scaled(PANEL_PAD_X, ui_scale) + x as f32 * scaled(11.0, ui_scale),
                panel.y + scaled(20.0, ui_scale) + y as f32 * scaled(LINE_HEIGHT, ui_scale),
                scaled(22.0, ui_scale),
                color,
            );
        }
    }
}

fn build_entity_overlay(state: &GameState) -> Vec<Option<Glyph>> {
    let map = &state.map;
    let mut overlay = vec![None; map.width * map.height];

    let mut relics: Vec<_> = state.relics.values().collect();
    relics.sort_by_key(|relic| (relic.pos.y, relic.pos.x, relic.kind));
    for relic in relics {
        if let Some(index) = cell_index(map.width, map.height, relic.pos) {
            overlay[index] = Some(relic_glyph(relic.kind));
        }
    }

    // Defeated enemies stay in the arena but disappear from the map.
    let mut enemies: Vec<&Enemy> = state.enemies.values().filter(|e| e.is_alive()).collect();
    enemies.sort_by_key(|enemy| (enemy.pos.y, enemy.pos.x, enemy.kind));
    for enemy in enemies {
        if let Some(index) = cell_index(map.width, map.height, enemy.pos) {
            overlay[index] = Some(enemy_glyph(enemy.kind));
        }
    }

    if let Some(index) = cell_index(map.width, map.height, state.player.pos) {
        overlay[index] = Some(("@", GREEN));
    }

    overlay
}

fn cell_index(width: usize, height: usize, pos: Pos) -> Option<usize> {
    if pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height {
        Some((pos.y as usize) * width + (pos.x as usize))
    } else {
        None
    }
}

fn draw_stats_panel(game: &Game, run_seed: u64, panel: PanelRect, ui_scale: f32) {
    let text_x = panel.x + scaled(PANEL_PAD_X, ui_scale);
    let mut text_y = panel.y + scaled(PANEL_PAD_Y, ui_scale);
    for line in stats_panel_lines(game, run_seed) {
        draw_text(&line, text_x, text_y, scaled(16.0, ui_scale), WHITE);
        text_y += scaled(20.0, ui_scale);
    }
}

fn draw_event_log(game: &Game, panel: PanelRect, ui_scale: f32) {
    draw_text(
        "Events",
        panel.x + scaled(PANEL_PAD_X, ui_scale),
        panel.y + scaled(20.0, ui_scale),
        scaled(24.0, ui_scale),
        YELLOW,
    );

    let line_step = scaled(LINE_HEIGHT, ui_scale);
    let visible = (((panel.height - scaled(PANEL_PAD_Y, ui_scale)) / line_step).floor() as usize)
        .min(game.log().len());

    for (index, event) in game.log()[..visible].iter().enumerate() {
        draw_text(
            &event_log_line(event),
            panel.x + scaled(PANEL_PAD_X, ui_scale),
            panel.y + scaled(20.0, ui_scale) + (index as f32 + 1.0) * line_step,
            scaled(18.0, ui_scale),
            LIGHTGRAY,
        );
    }
}

fn draw_menu_line(label: &str, base_y: f32, index: usize, selected: bool, ui_scale: f32) {
    let text = if selected { format!("> {label}") } else { label.to_string() };
    let color = if selected { GOLD } else { LIGHTGRAY };
    let size = scaled(26.0, ui_scale);
    let width = measure_text(&text, None, size as u16, 1.0).width;
    draw_text(
        &text,
        (screen_width() - width) / 2.0,
        base_y + index as f32 * scaled(MENU_LINE_STEP, ui_scale),
        size,
        color,
    );
}

fn draw_centered_line(text: &str, y: f32, size: f32, color: Color) {
    let width = measure_text(text, None, size as u16, 1.0).width;
    draw_text(text, (screen_width() - width) / 2.0, y, size, color);
}

fn scaled(value: f32, ui_scale: f32) -> f32 {
    value * ui_scale
}

fn tile_glyph(tile: TileKind) -> Glyph {
    match tile {
        TileKind::Wall => ("#", DARKGRAY),
        TileKind::Floor => (".", GRAY),
        TileKind::Exit => (">", GOLD),
    }
}

fn enemy_glyph(kind: EnemyKind) -> Glyph {
    match kind {
        EnemyKind::GloomRat => ("r", RED),
        EnemyKind::CinderBat => ("b", ORANGE),
        EnemyKind::HollowHusk => ("H", PURPLE),
    }
}

fn relic_glyph(kind: RelicKind) -> Glyph {
    match kind {
        RelicKind::EmberCoin => ("*", YELLOW),
        RelicKind::BoneIdol => ("*", BEIGE),
        RelicKind::GlassShard => ("*", SKYBLUE),
    }
}
