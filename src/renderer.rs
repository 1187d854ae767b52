use crate::assets::{AssetCatalog, Sprite, SpriteArt, builtin_sprite};
use crate::entities::{Entity, EntityGroup, EntityKind, PLAYER_TEXTURE};
use crate::game::GameState;
use crate::physics::WorldBounds;
use rand::Rng;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub state: &'a GameState,
    pub assets: &'a AssetCatalog,
    pub area: Rect,
    pub fps: u32,
}

/// Maps world coordinates onto a rectangle of terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub world: WorldBounds,
}

impl Viewport {
    pub fn new(area: Rect, world: WorldBounds) -> Self {
        Self { area, world }
    }

    /// Cell column/row of a world point, possibly outside the area
    pub fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let col = (x / self.world.width * self.area.width as f32).floor() as i32;
        let row = (y / self.world.height * self.area.height as f32).floor() as i32;
        (self.area.x as i32 + col, self.area.y as i32 + row)
    }

    /// Number of cells a body covers, at least one in each direction
    pub fn cells_for(&self, width: f32, height: f32) -> (u16, u16) {
        let cols = (width / self.world.width * self.area.width as f32).round() as u16;
        let rows = (height / self.world.height * self.area.height as f32).round() as u16;
        (cols.max(1), rows.max(1))
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.area.x as i32
            && row >= self.area.y as i32
            && col < (self.area.x + self.area.width) as i32
            && row < (self.area.y + self.area.height) as i32
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        if view.state.win_text_visible {
            self.render_win_banner(frame, view);
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let state = view.state;

        // Playfield between the HUD line and the controls line
        let field = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(field);
        frame.render_widget(block, field);

        // Render stars (simple background)
        if state.frame_count % 10 < 5 {
            let star_text = starfield(&mut rand::rng(), inner.width, inner.height);
            frame.render_widget(
                Paragraph::new(star_text).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
        }

        let viewport = Viewport::new(inner, state.bounds);
        let buffer = frame.buffer_mut();

        self.draw_group(buffer, &viewport, view.assets, &state.enemies);
        self.draw_group(buffer, &viewport, view.assets, &state.lasers);
        let player_sprite = sprite_for(view.assets, PLAYER_TEXTURE);
        draw_sprite(buffer, &viewport, &state.player.body, &player_sprite);

        // Stats overlay at the top
        let capacity = state.lasers.capacity().unwrap_or(0);
        let stats = Line::from(vec![
            Span::styled("Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", state.enemies.live_count()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lasers: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", state.lasers.live_count(), capacity),
                if state.lasers.is_full() {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                },
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        if area.height >= 2 {
            let controls = Line::from(vec![Span::styled(
                "[A/D or Arrows: Move] [Space: Fire] [Q: Quit]",
                Style::default().fg(Color::DarkGray),
            )]);
            let controls_area = Rect {
                x: area.x + 1,
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(Paragraph::new(controls).centered(), controls_area);
        }
    }

    fn draw_group<K: EntityKind>(
        &self,
        buffer: &mut Buffer,
        viewport: &Viewport,
        assets: &AssetCatalog,
        group: &EntityGroup<K>,
    ) {
        let sprite = sprite_for(assets, K::TEXTURE);
        for (_, entity) in group.iter() {
            draw_sprite(buffer, viewport, entity, &sprite);
        }
    }

    fn render_win_banner(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let text = vec![
            Line::from(""),
            Line::from("You Won!").centered().bold().white(),
            Line::from(""),
            Line::from("Press Q to quit").centered().dark_gray(),
        ];

        let width = 30u16.min(area.width);
        let height = 6u16.min(area.height);
        let banner_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            banner_area,
        );
    }
}

/// One row of text per cell row, each cell a star with a small chance
fn starfield<R: Rng>(rng: &mut R, width: u16, height: u16) -> String {
    (0..height)
        .map(|_| {
            (0..width)
                .map(|_| if rng.random_bool(0.05) { '.' } else { ' ' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn sprite_for(assets: &AssetCatalog, key: &str) -> Sprite {
    assets.get(key).cloned().unwrap_or_else(|| builtin_sprite(key))
}

fn draw_sprite(buffer: &mut Buffer, viewport: &Viewport, entity: &Entity, sprite: &Sprite) {
    if !entity.is_alive() {
        return;
    }

    let (col, row) = viewport.to_cell(entity.left(), entity.top());
    match &sprite.art {
        SpriteArt::Glyphs { lines, color } => {
            let style = Style::default().fg(*color).add_modifier(Modifier::BOLD);
            for (i, line) in lines.iter().enumerate() {
                let y = row + i as i32;
                if !viewport.contains(col, y) {
                    continue;
                }
                let right_edge = (viewport.area.x + viewport.area.width) as i32;
                let max_width = (right_edge - col) as usize;
                buffer.set_stringn(col as u16, y as u16, line, max_width, style);
            }
        }
        SpriteArt::Pixels { .. } => {
            // Two vertical pixels per cell using the upper half block
            let (cols, rows) = viewport.cells_for(entity.width, entity.height);
            let sub_rows = rows as f32 * 2.0;
            for cy in 0..rows {
                for cx in 0..cols {
                    let (x, y) = (col + cx as i32, row + cy as i32);
                    if !viewport.contains(x, y) {
                        continue;
                    }
                    let u = (cx as f32 + 0.5) / cols as f32;
                    let upper = sprite.sample(u, (cy as f32 * 2.0 + 0.5) / sub_rows);
                    let lower = sprite.sample(u, (cy as f32 * 2.0 + 1.5) / sub_rows);
                    let Some(cell) = buffer.cell_mut((x as u16, y as u16)) else {
                        continue;
                    };
                    match (upper, lower) {
                        (Some(top), Some(bottom)) => {
                            cell.set_char('▀').set_fg(top).set_bg(bottom);
                        }
                        (Some(top), None) => {
                            cell.set_char('▀').set_fg(top);
                        }
                        (None, Some(bottom)) => {
                            cell.set_char('▄').set_fg(bottom);
                        }
                        (None, None) => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::{SeedableRng, rngs::StdRng};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(state: &GameState) -> String {
        let assets = AssetCatalog::builtin();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    state,
                    assets: &assets,
                    area: frame.area(),
                    fps: 60,
                };
                GameRenderer::new().render(frame, &view);
            })
            .unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn test_viewport_mapping() {
        let viewport = Viewport::new(Rect::new(1, 2, 80, 20), WorldBounds::new(800.0, 600.0));
        assert_eq!(viewport.to_cell(0.0, 0.0), (1, 2));
        assert_eq!(viewport.to_cell(400.0, 300.0), (41, 12));
        assert_eq!(viewport.cells_for(70.0, 40.0), (7, 1));
        assert_eq!(viewport.cells_for(1.0, 1.0), (1, 1));
        assert!(viewport.contains(1, 2));
        assert!(!viewport.contains(81, 2));
        assert!(!viewport.contains(0, 2));
    }

    #[test]
    fn test_starfield_fills_every_column() {
        let mut rng = StdRng::seed_from_u64(7);
        let stars = starfield(&mut rng, 80, 20);
        let rows: Vec<&str> = stars.lines().collect();

        assert_eq!(rows.len(), 20);
        assert!(rows.iter().all(|row| row.chars().count() == 80));
        // Stars are spread across the field, not stacked in the first column
        let columns: std::collections::HashSet<usize> = rows
            .iter()
            .flat_map(|row| row.char_indices().filter(|(_, c)| *c == '.').map(|(i, _)| i))
            .collect();
        assert!(columns.iter().any(|&col| col > 0));
        assert!(columns.len() > 10);
    }

    #[test]
    fn test_render_playing_shows_hud_without_banner() {
        let state = GameState::new_game(&GameConfig::default(), &AssetCatalog::builtin());
        let text = draw(&state);
        assert!(text.contains("Enemies: 3"));
        assert!(text.contains("Lasers: 0/3"));
        assert!(text.contains("{===}"));
        assert!(!text.contains("You Won!"));
    }

    #[test]
    fn test_render_win_banner() {
        let mut state = GameState::new_game(&GameConfig::default(), &AssetCatalog::builtin());
        state.win_text_visible = true;
        let text = draw(&state);
        assert!(text.contains("You Won!"));
    }

    #[test]
    fn test_offscreen_entity_is_skipped() {
        let mut state = GameState::new_game(&GameConfig::default(), &AssetCatalog::builtin());
        state.lasers.spawn(400.0, -500.0, 0.0, -200.0, 8.0, 24.0);
        // Must not panic on negative coordinates
        draw(&state);
    }
}
