use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, CollisionType, FrameView, Tile};
use crate::metrics::GameMetrics;
use crate::modes::screen::{Button, Screen};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        screen: &Screen,
        view: Option<&FrameView>,
        metrics: &GameMetrics,
        ticks_per_second: u32,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match (screen, view) {
            (Screen::Menu { selected }, _) => {
                frame.render_widget(self.render_title(), chunks[0]);
                frame.render_widget(self.render_menu(*selected, metrics), body);
            }
            (Screen::Playing, Some(view)) => {
                frame.render_widget(self.render_stats(view, metrics, ticks_per_second), chunks[0]);
                frame.render_widget(self.render_grid(view), body);
            }
            (Screen::Playing, None) => {
                frame.render_widget(self.render_title(), chunks[0]);
            }
            (
                Screen::GameOver {
                    final_score,
                    cause,
                    selected,
                },
                _,
            ) => {
                frame.render_widget(self.render_title(), chunks[0]);
                frame.render_widget(
                    self.render_game_over(*final_score, *cause, *selected, metrics),
                    body,
                );
            }
        }

        frame.render_widget(self.render_controls(screen), chunks[2]);
    }

    fn render_grid(&self, view: &FrameView) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(view.grid_height as usize);

        for y in 0..view.grid_height {
            let spans: Vec<Span> = (0..view.grid_width)
                .map(|x| tile_span(view.tile_at(Cell::new(x, y))))
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake Arena "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        view: &FrameView,
        metrics: &GameMetrics,
        ticks_per_second: u32,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("SCORE: ", label),
            Span::styled(view.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(view.player.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Enemy: ", label),
            Span::styled(view.enemy.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{} t/s", ticks_per_second), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_title(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(Span::styled(
            "SNAKE ARENA",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
    }

    fn render_menu(&self, selected: Button, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from("Eat the food, dodge the obstacles, and swallow the"),
            Line::from("yellow snake once you are longer than it."),
            Line::from(""),
            buttons("PLAY", selected),
            Line::from(""),
        ];

        if let Some(best) = metrics.high_scores.best() {
            text.push(Line::from(vec![
                Span::styled("Best this session: ", Style::default().fg(Color::Yellow)),
                Span::styled(best.to_string(), Style::default().fg(Color::White)),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(
        &self,
        final_score: u32,
        cause: CollisionType,
        selected: Button,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                format!("GAME OVER! SCORE: {}", final_score),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause_text(cause), Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(Span::styled("High scores", Style::default().fg(Color::Yellow))),
        ];

        for (rank, score) in metrics.high_scores.top().into_iter().enumerate() {
            text.push(Line::from(format!("{}. {}", rank + 1, score)));
        }

        text.push(Line::from(""));
        text.push(buttons("PLAY AGAIN", selected));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, screen: &Screen) -> Paragraph<'_> {
        let keys = Style::default().fg(Color::Cyan);
        let quit = Style::default().fg(Color::Red);

        let line = match screen {
            Screen::Playing => Line::from(vec![
                Span::styled("↑↓←→", keys),
                Span::raw(" or "),
                Span::styled("WASD", keys),
                Span::raw(" to move | "),
                Span::styled("R", keys),
                Span::raw(" to restart | "),
                Span::styled("Q", quit),
                Span::raw(" to quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("←→", keys),
                Span::raw(" to choose | "),
                Span::styled("Enter", keys),
                Span::raw(" to press | "),
                Span::styled("Q", quit),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn tile_span(tile: Tile) -> Span<'static> {
    match tile {
        Tile::PlayerHead => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        Tile::PlayerBody => Span::styled("□ ", Style::default().fg(Color::Green)),
        Tile::EnemyHead => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Tile::EnemyBody => Span::styled("□ ", Style::default().fg(Color::Yellow)),
        Tile::Food => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Tile::Obstacle => Span::styled("▓ ", Style::default().fg(Color::Gray)),
        Tile::Trail => Span::styled("· ", Style::default().fg(Color::Rgb(120, 100, 0))),
        Tile::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

fn buttons(play_label: &str, selected: Button) -> Line<'static> {
    let style = |button: Button, color: Color| {
        if button == selected {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    Line::from(vec![
        Span::styled(format!("[ {} ]", play_label), style(Button::Play, Color::Green)),
        Span::raw("      "),
        Span::styled("[ QUIT ]", style(Button::Quit, Color::Red)),
    ])
}

fn cause_text(cause: CollisionType) -> &'static str {
    match cause {
        CollisionType::EnemyBody => "Bitten by a bigger snake",
        CollisionType::SelfCollision => "You bit yourself",
        CollisionType::Obstacle => "Crashed into an obstacle",
        CollisionType::Wall => "Hit the wall",
        CollisionType::BoardFull => "No room left on the board",
    }
}
