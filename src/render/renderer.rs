use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameSession, Position, PowerUpKind};
use crate::metrics::GameMetrics;

/// Presentation flags owned by the mode layer, not the simulation
pub struct Hud<'a> {
    pub paused: bool,
    pub tutorial_message: Option<&'a str>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        session: &GameSession,
        metrics: &GameMetrics,
        hud: &Hud,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the world grid horizontally
        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if session.game_over() {
            let game_over = self.render_game_over(session, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(session);
            frame.render_widget(grid, game_area);
            if hud.paused {
                let overlay_area = centered_rect(30, 5, game_area);
                frame.render_widget(self.render_pause_overlay(), overlay_area);
            }
        }

        let footer = self.render_footer(hud);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_grid(&self, session: &GameSession) -> Paragraph<'_> {
        let n = session.config.cell_count;
        let head = session.train.head();
        let tail = *session.train.body.last().unwrap_or(&head);
        let fog_radius = if session.train.fog_disabled {
            None
        } else {
            session.config.difficulty.fog_radius()
        };
        let rival = session.ai_train.as_ref().filter(|ai| ai.alive);

        let mut lines = Vec::with_capacity(n as usize);
        for y in 0..n {
            let mut spans = Vec::with_capacity(n as usize);
            for x in 0..n {
                let pos = Position::new(x, y);

                // Fog of war: cells beyond every spotlight show nothing
                let rival_head = rival.map(|ai| ai.train.head());
                if !cell_lit(pos, head, rival_head, fog_radius) {
                    spans.push(Span::raw("  "));
                    continue;
                }

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if pos == tail && session.train.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if session.train.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Blue))
                } else if rival.is_some_and(|ai| ai.train.head() == pos) {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if rival.is_some_and(|ai| ai.train.body.contains(&pos)) {
                    Span::styled("□ ", Style::default().fg(Color::Magenta))
                } else if session.coal.positions.contains(&pos) {
                    Span::styled(
                        "o ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if let Some(p) = session.world_power_ups.iter().find(|p| p.pos == pos) {
                    let (symbol, color) = match p.kind {
                        PowerUpKind::SpeedBoost => ("S ", Color::Cyan),
                        PowerUpKind::Torch => ("T ", Color::LightYellow),
                    };
                    Span::styled(
                        symbol,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Perkmandelc "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if let Some(ai) = session.ai_train.as_ref() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Rival: ", Style::default().fg(Color::Yellow)));
            spans.push(if ai.alive {
                Span::styled("alive", Style::default().fg(Color::Magenta))
            } else {
                Span::styled("down", Style::default().fg(Color::DarkGray))
            });
        }

        for p in session.train.active_power_ups() {
            let label = match p.kind {
                PowerUpKind::SpeedBoost => " [speed x2]",
                PowerUpKind::Torch => " [torch]",
            };
            spans.push(Span::styled(label, Style::default().fg(Color::Cyan)));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "YOU DIED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to retry or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_pause_overlay(&self) -> Paragraph<'_> {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_footer<'a>(&self, hud: &Hud<'a>) -> Paragraph<'a> {
        if let Some(message) = hud.tutorial_message {
            return Paragraph::new(vec![Line::from(Span::styled(
                message,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Tutorial "));
        }

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" retry | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a cell is inside any fog spotlight: the player's head always
/// carries one, and a live rival's head opens a second. No radius means no
/// fog at all.
fn cell_lit(
    pos: Position,
    player_head: Position,
    rival_head: Option<Position>,
    radius: Option<f32>,
) -> bool {
    let Some(radius) = radius else {
        return true;
    };
    player_head.distance(pos) <= radius
        || rival_head.is_some_and(|head| head.distance(pos) <= radius)
}

/// A `width` x `height` rect centered inside `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fog_lights_everything() {
        let far = Position::new(39, 39);
        assert!(cell_lit(far, Position::new(0, 0), None, None));
    }

    #[test]
    fn test_player_spotlight() {
        let head = Position::new(10, 10);
        assert!(cell_lit(Position::new(13, 10), head, None, Some(6.0)));
        assert!(!cell_lit(Position::new(20, 10), head, None, Some(6.0)));
    }

    #[test]
    fn test_rival_spotlight_lights_cells_far_from_player() {
        let player = Position::new(5, 5);
        let rival = Some(Position::new(30, 30));
        let near_rival = Position::new(32, 30);
        assert!(!cell_lit(near_rival, player, None, Some(6.0)));
        assert!(cell_lit(near_rival, player, rival, Some(6.0)));
        // Cells far from both stay dark
        assert!(!cell_lit(Position::new(20, 5), player, rival, Some(6.0)));
    }
}
