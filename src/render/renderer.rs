use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, CollisionType, GameEnd, GameState, RunState};
use crate::input::{ControlButton, ControlPad};
use crate::metrics::GameMetrics;

const BUTTON_WIDTH: u16 = 5;
const PAD_HEIGHT: u16 = 3;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the whole frame and return where the control pad ended up
    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) -> ControlPad {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),              // Header
                Constraint::Min(0),                 // Game area
                Constraint::Length(PAD_HEIGHT + 1), // Control pad + help
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match state.run_state {
            RunState::NotStarted => frame.render_widget(self.render_start(), game_area),
            RunState::Running | RunState::Paused => {
                frame.render_widget(self.render_grid(state), game_area)
            }
            RunState::GameOver(end) => {
                frame.render_widget(self.render_game_over(state, end, metrics), game_area)
            }
        }

        let footer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(PAD_HEIGHT), Constraint::Length(1)])
            .split(chunks[2]);

        let pad = control_pad_layout(footer[0]);
        for button in ControlButton::ALL {
            if let Some(area) = pad.area_of(button) {
                frame.render_widget(self.render_button(button), area);
            }
        }
        frame.render_widget(self.render_controls(), footer[1]);

        pad
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let paused = state.run_state == RunState::Paused;
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_size);

        for y in 0..state.extent() {
            let mut spans = Vec::with_capacity(state.grid_size);

            for x in 0..state.extent() {
                let cell = Cell::new(x, y);

                let span = if cell == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightRed)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(cell) {
                    Span::styled("■ ", Style::default().fg(Color::Blue))
                } else if state.food == Some(cell) {
                    Span::styled(
                        "● ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let (title, border) = if paused {
            (" Snake - PAUSED ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        let mut grid = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center);
        if paused {
            grid = grid.style(Style::default().add_modifier(Modifier::DIM));
        }
        grid
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.max(state.score).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("Eat the food, avoid the walls and your own tail."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "ENTER",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(
        &self,
        state: &GameState,
        end: GameEnd,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let reason = match end {
            GameEnd::Collision(CollisionType::Wall) => "You hit the wall.",
            GameEnd::Collision(CollisionType::SelfCollision) => "You ran into yourself.",
            GameEnd::BoardFilled => "The board is full!",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "ENTER",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
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

    fn render_button(&self, button: ControlButton) -> Paragraph<'_> {
        Paragraph::new(button.label())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Black).bg(Color::Cyan))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / click to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
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

/// Arrange the four buttons as a cross centered in `area`.
///
/// Buttons that would fall outside `area` are clipped, and left out entirely
/// when nothing of them is visible.
fn control_pad_layout(area: Rect) -> ControlPad {
    let center = area.x + area.width / 2;
    let left_of_center = |offset: u16| center.saturating_sub(offset);
    let slots = [
        (ControlButton::Up, left_of_center(BUTTON_WIDTH / 2), area.y),
        (
            ControlButton::Left,
            left_of_center(BUTTON_WIDTH / 2 + BUTTON_WIDTH + 1),
            area.y + 1,
        ),
        (
            ControlButton::Right,
            center + BUTTON_WIDTH / 2 + 2,
            area.y + 1,
        ),
        (ControlButton::Down, left_of_center(BUTTON_WIDTH / 2), area.y + 2),
    ];

    ControlPad::new(slots.into_iter().filter_map(|(button, x, y)| {
        let clipped = Rect::new(x, y, BUTTON_WIDTH, 1).intersection(area);
        (!clipped.is_empty()).then_some((button, clipped))
    }))
}
