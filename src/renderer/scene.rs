//! Scene building
//!
//! Describes a frame as an ordered list of draw commands in window space
//! (origin bottom-left, y up). The rendering surface draws them in order and
//! never reports anything back.

use glam::Vec2;

use super::vertex::{Color, colors};
use crate::highscores::Leaderboard;
use crate::sim::{GamePhase, GameState, Obstacle, Player, SaveStatus};
use crate::ui::{Field, LoginForm};

/// Horizontal text alignment relative to `pos`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        center: Vec2,
        size: Vec2,
        color: Color,
    },
    RectOutline {
        center: Vec2,
        size: Vec2,
        width: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: Anchor,
        bold: bool,
    },
}

/// Accumulates draw commands for one frame
#[derive(Debug, Default)]
struct Canvas {
    commands: Vec<DrawCommand>,
}

impl Canvas {
    fn rect(&mut self, center: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            center,
            size,
            color,
        });
    }

    fn outline(&mut self, center: Vec2, size: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::RectOutline {
            center,
            size,
            width,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: Anchor,
    ) {
        self.push_text(text.into(), pos, size, color, anchor, false);
    }

    fn bold(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: Anchor,
    ) {
        self.push_text(text.into(), pos, size, color, anchor, true);
    }

    fn push_text(
        &mut self,
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: Anchor,
        bold: bool,
    ) {
        self.commands.push(DrawCommand::Text {
            text,
            pos,
            size,
            color,
            anchor,
            bold,
        });
    }
}

/// Everything the race screen shows
pub fn race_scene(state: &GameState, player_name: &str, autopilot: bool) -> Vec<DrawCommand> {
    let mut canvas = Canvas::default();
    let (w, h) = (state.config.screen_width, state.config.screen_height);
    let track = &state.track;

    // Road and verges
    canvas.rect(
        Vec2::new(track.center_x(), h / 2.0),
        Vec2::new(track.width(), h),
        colors::ROAD,
    );
    canvas.rect(
        Vec2::new(track.left / 2.0, h / 2.0),
        Vec2::new(track.left, h),
        colors::GRASS,
    );
    let right_verge = w - track.right;
    canvas.rect(
        Vec2::new(w - right_verge / 2.0, h / 2.0),
        Vec2::new(right_verge, h),
        colors::GRASS,
    );

    // Markings
    for stripe in &state.stripes {
        canvas.rect(
            Vec2::new(track.center_x(), stripe.y),
            Vec2::new(8.0, 40.0),
            colors::CENTER_STRIPE,
        );
    }
    for boundary in 1..track.lane_count {
        let x = track.left + boundary as f32 * track.lane_width();
        for stripe in &state.stripes {
            canvas.rect(
                Vec2::new(x, stripe.y + 20.0),
                Vec2::new(4.0, 20.0),
                colors::LANE_MARKER,
            );
        }
    }

    for obstacle in &state.obstacles {
        draw_enemy(&mut canvas, obstacle);
    }
    draw_player(&mut canvas, &state.player);

    canvas.line(
        Vec2::new(track.left, 0.0),
        Vec2::new(track.left, h),
        2.0,
        colors::ROAD_EDGE,
    );
    canvas.line(
        Vec2::new(track.right, 0.0),
        Vec2::new(track.right, h),
        2.0,
        colors::ROAD_EDGE,
    );

    draw_hud(&mut canvas, state, player_name, autopilot);

    match state.run.phase {
        GamePhase::Paused => {
            let screen = Vec2::new(w, h);
            canvas.rect(screen / 2.0, screen, colors::OVERLAY);
            canvas.bold(
                "PAUSED",
                screen / 2.0,
                48.0,
                colors::PROMPT,
                Anchor::Center,
            );
        }
        GamePhase::GameOver => draw_game_over(&mut canvas, state, player_name),
        GamePhase::Running => {}
    }

    canvas.commands
}

fn draw_enemy(canvas: &mut Canvas, car: &Obstacle) {
    let paint = colors::ENEMY_PALETTE[car.color as usize % colors::ENEMY_PALETTE.len()];
    let (pos, size) = (car.pos, car.size);
    canvas.rect(pos, size, paint);
    canvas.rect(
        pos + Vec2::new(0.0, 12.0),
        Vec2::new(size.x - 8.0, 12.0),
        colors::ENEMY_WINDSHIELD,
    );
    for side in [-1.0, 1.0] {
        canvas.rect(
            pos + Vec2::new(side * 12.0, size.y / 2.0 - 4.0),
            Vec2::new(6.0, 4.0),
            colors::ENEMY_HEADLIGHT,
        );
    }
}

fn draw_player(canvas: &mut Canvas, player: &Player) {
    let (pos, size) = (player.pos, player.size);
    canvas.rect(pos, size + Vec2::splat(10.0), colors::PLAYER_GLOW);
    canvas.rect(pos, size, colors::PLAYER_BODY);
    canvas.rect(
        pos + Vec2::new(0.0, 15.0),
        Vec2::new(size.x - 10.0, 15.0),
        colors::PLAYER_WINDSHIELD,
    );
    for side in [-1.0, 1.0] {
        canvas.rect(
            pos + Vec2::new(side * 15.0, size.y / 2.0 - 5.0),
            Vec2::new(8.0, 5.0),
            colors::HEADLIGHT,
        );
        canvas.rect(
            pos + Vec2::new(side * 15.0, -size.y / 2.0 + 5.0),
            Vec2::new(8.0, 5.0),
            colors::TAILLIGHT,
        );
    }
}

fn draw_hud(canvas: &mut Canvas, state: &GameState, player_name: &str, autopilot: bool) {
    let (w, h) = (state.config.screen_width, state.config.screen_height);
    let difficulty = &state.run.difficulty;

    canvas.bold(
        format!("PLAYER: {player_name}"),
        Vec2::new(15.0, h - 35.0),
        20.0,
        colors::HUD_NAME,
        Anchor::Left,
    );
    canvas.bold(
        format!("SCORE: {}", state.run.score),
        Vec2::new(15.0, h - 70.0),
        24.0,
        colors::HUD_SCORE,
        Anchor::Left,
    );
    canvas.bold(
        format!("SPEED: x{:.2}", difficulty.speed_multiplier),
        Vec2::new(15.0, h - 105.0),
        20.0,
        colors::HUD_SPEED,
        Anchor::Left,
    );
    canvas.bold(
        format!("TIME: {}s", difficulty.elapsed as u32),
        Vec2::new(15.0, h - 140.0),
        20.0,
        colors::HUD_TIME,
        Anchor::Left,
    );
    if autopilot {
        canvas.bold(
            "AUTOPILOT",
            Vec2::new(w - 15.0, h - 35.0),
            20.0,
            colors::HUD_SPEED,
            Anchor::Right,
        );
    }
    canvas.bold(
        "\u{2190} \u{2192} MOVE | R RESTART | P PAUSE | ESC MENU",
        Vec2::new(w / 2.0, 30.0),
        16.0,
        colors::HUD_HINT,
        Anchor::Center,
    );
}

fn draw_game_over(canvas: &mut Canvas, state: &GameState, player_name: &str) {
    let (w, h) = (state.config.screen_width, state.config.screen_height);
    let cx = w / 2.0;
    let cy = h / 2.0;

    canvas.rect(Vec2::new(cx, cy), Vec2::new(w, h), colors::OVERLAY);
    canvas.bold(
        "GAME OVER",
        Vec2::new(cx, cy + 60.0),
        48.0,
        colors::GAME_OVER,
        Anchor::Center,
    );
    canvas.bold(
        format!("Player: {player_name}"),
        Vec2::new(cx, cy + 10.0),
        32.0,
        colors::HUD_NAME,
        Anchor::Center,
    );
    canvas.bold(
        format!("Score: {}", state.run.score),
        Vec2::new(cx, cy - 40.0),
        36.0,
        colors::HUD_SCORE,
        Anchor::Center,
    );

    let (save_text, save_color) = match state.run.save_status {
        SaveStatus::Pending => ("Saving result...", colors::SAVE_PENDING),
        SaveStatus::Saved => ("\u{2713} Result saved", colors::SAVE_OK),
        SaveStatus::Failed => ("Result not saved", colors::SAVE_FAILED),
    };
    canvas.text(
        save_text,
        Vec2::new(cx, cy - 90.0),
        22.0,
        save_color,
        Anchor::Center,
    );

    // Prompts appear once the banner has been up long enough
    if state.game_over_settled() {
        canvas.bold(
            "SPACE - NEW GAME",
            Vec2::new(cx, cy - 140.0),
            20.0,
            colors::PROMPT,
            Anchor::Center,
        );
        canvas.bold(
            "ESC - BACK TO MENU",
            Vec2::new(cx, cy - 180.0),
            20.0,
            colors::PROMPT,
            Anchor::Center,
        );
    }
}

/// Everything the menu screen shows
pub fn menu_scene(
    form: &LoginForm,
    leaderboard: &Leaderboard,
    screen: Vec2,
) -> Vec<DrawCommand> {
    let mut canvas = Canvas::default();
    let (w, h) = (screen.x, screen.y);

    canvas.rect(screen / 2.0, screen, colors::MENU_BACKGROUND);
    canvas.bold(
        "PLAYER LOGIN",
        Vec2::new(w / 2.0, h - 60.0),
        28.0,
        colors::TITLE,
        Anchor::Center,
    );

    draw_login_form(&mut canvas, form, screen);
    draw_leaderboard(&mut canvas, leaderboard, screen);

    canvas.text(
        "TAB - switch field | ENTER - sign in | ESC - quit",
        Vec2::new(w / 2.0, 25.0),
        14.0,
        colors::FOOTER,
        Anchor::Center,
    );

    if let Some(error) = form.error() {
        canvas.text(
            error,
            Vec2::new(w / 2.0, h / 2.0 - 150.0),
            16.0,
            colors::ERROR,
            Anchor::Center,
        );
    }

    canvas.commands
}

fn draw_login_form(canvas: &mut Canvas, form: &LoginForm, screen: Vec2) {
    let form_x = screen.x / 4.0;
    let start_y = screen.y - 130.0;
    let field_size = Vec2::new(250.0, 35.0);
    let field_x = form_x + 40.0;

    canvas.bold(
        "SIGN IN",
        Vec2::new(form_x, start_y),
        22.0,
        colors::HEADING,
        Anchor::Center,
    );

    let password = form.masked_password();
    let rows = [
        (Field::Name, "Name:", form.name.as_str()),
        (Field::Password, "Password:", password.as_str()),
    ];
    let mut y = start_y - 50.0;
    for (field, label, value) in rows {
        canvas.text(
            label,
            Vec2::new(form_x - 110.0, y - 5.0),
            16.0,
            colors::WHITE,
            Anchor::Right,
        );

        let border = if form.active == field {
            colors::FIELD_ACTIVE
        } else {
            colors::WHITE
        };
        canvas.rect(Vec2::new(field_x, y), field_size, colors::FIELD);
        canvas.outline(Vec2::new(field_x, y), field_size, 2.0, border);

        let placeholder = match field {
            Field::Name => "Enter name...",
            Field::Password => "Enter password...",
        };
        let (shown, color) = if value.is_empty() {
            (placeholder, colors::PLACEHOLDER)
        } else {
            (value, colors::WHITE)
        };
        canvas.text(
            shown,
            Vec2::new(field_x - field_size.x / 2.0 + 10.0, y),
            16.0,
            color,
            Anchor::Left,
        );
        y -= 60.0;
    }

    y -= 10.0;
    let button = Vec2::new(180.0, 40.0);
    let (fill, label) = if form.can_submit() {
        (colors::BUTTON, colors::WHITE)
    } else {
        (colors::BUTTON_DISABLED, colors::BUTTON_TEXT_DISABLED)
    };
    let button_center = Vec2::new(form_x, y);
    canvas.rect(button_center, button, fill);
    canvas.outline(button_center, button, 2.0, colors::BUTTON_OUTLINE);
    canvas.bold("SIGN IN", button_center, 18.0, label, Anchor::Center);
}

fn draw_leaderboard(canvas: &mut Canvas, leaderboard: &Leaderboard, screen: Vec2) {
    let x = screen.x - screen.x / 4.0;
    let start_y = screen.y - 130.0;
    let table = Vec2::new(320.0, 320.0);
    let row_height = 35.0;

    canvas.bold(
        "LEADERBOARD",
        Vec2::new(x, start_y),
        22.0,
        colors::HEADING,
        Anchor::Center,
    );
    canvas.outline(
        Vec2::new(x, start_y - 40.0 - table.y / 2.0),
        table,
        2.0,
        colors::TABLE_OUTLINE,
    );

    let header_y = start_y - 38.0;
    canvas.bold(
        "#",
        Vec2::new(x - 110.0, header_y),
        14.0,
        colors::TABLE_HEADER,
        Anchor::Center,
    );
    canvas.bold(
        "Player",
        Vec2::new(x - 30.0, header_y),
        14.0,
        colors::TABLE_HEADER,
        Anchor::Center,
    );
    canvas.bold(
        "Score",
        Vec2::new(x + 70.0, header_y),
        14.0,
        colors::TABLE_HEADER,
        Anchor::Center,
    );

    let line_y = start_y - 55.0;
    canvas.line(
        Vec2::new(x - table.x / 2.0 + 10.0, line_y),
        Vec2::new(x + table.x / 2.0 - 10.0, line_y),
        1.0,
        colors::WHITE,
    );

    let mut y = line_y - 25.0;
    let row_size = Vec2::new(table.x - 20.0, row_height);
    if leaderboard.is_empty() {
        let row_center = Vec2::new(x, y - row_height / 2.0);
        canvas.rect(row_center, row_size, colors::ROW_ODD);
        canvas.text(
            "No data",
            Vec2::new(x, y),
            16.0,
            colors::MUTED,
            Anchor::Center,
        );
        y -= 40.0;
    } else {
        for (i, entry) in leaderboard.entries.iter().enumerate() {
            let place = i + 1;
            let row_color = if place % 2 == 1 {
                colors::ROW_ODD
            } else {
                colors::ROW_EVEN
            };
            canvas.rect(Vec2::new(x, y - row_height / 2.0), row_size, row_color);

            let place_color = match place {
                1 => colors::GOLD,
                2 => colors::SILVER,
                3 => colors::BRONZE,
                _ => colors::WHITE,
            };
            canvas.push_text(
                format!("{place}."),
                Vec2::new(x - 110.0, y),
                14.0,
                place_color,
                Anchor::Center,
                place <= 3,
            );
            canvas.text(
                entry.display_name(),
                Vec2::new(x - 30.0, y),
                14.0,
                colors::WHITE,
                Anchor::Center,
            );
            canvas.text(
                entry.score.to_string(),
                Vec2::new(x + 70.0, y),
                14.0,
                colors::WHITE,
                Anchor::Center,
            );
            y -= row_height + 5.0;
        }
    }

    canvas.text(
        format!("Top {} players", crate::consts::LEADERBOARD_SIZE),
        Vec2::new(x, y - 10.0),
        12.0,
        colors::MUTED,
        Anchor::Center,
    );
}

/// Text of every `Text` command, in order. Handy for surfaces without fonts.
pub fn text_lines(commands: &[DrawCommand]) -> impl Iterator<Item = &str> {
    commands.iter().filter_map(|c| match c {
        DrawCommand::Text { text, .. } => Some(text.as_str()),
        _ => None,
    })
}
