use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Coordinate, MatchEngine, PlayField, Winner};
use crate::metrics::GameMetrics;
use crate::session::{ButtonRect, MenuButton, Session, SessionState};

/// Terminal columns used for one grid cell
const CELL_WIDTH: u16 = 2;

/// Grid of styled cells, one per grid unit of the play field
struct Canvas {
    grid_unit: i32,
    rows: Vec<Vec<Span<'static>>>,
}

impl Canvas {
    fn new(field: &PlayField) -> Self {
        let columns = (field.width / field.grid_unit).max(1) as usize;
        let rows = (field.height / field.grid_unit).max(1) as usize;
        let empty = Span::styled(". ", Style::default().fg(Color::DarkGray));

        Self {
            grid_unit: field.grid_unit,
            rows: vec![vec![empty; columns]; rows],
        }
    }

    fn put(&mut self, at: Coordinate, text: String, style: Style) {
        if at.x < 0 || at.y < 0 {
            return;
        }
        let column = (at.x / self.grid_unit) as usize;
        let row = (at.y / self.grid_unit) as usize;
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = Span::styled(text, style);
        }
    }

    fn fill(&mut self, rect: ButtonRect, style: Style) {
        let unit = self.grid_unit;
        let mut y = rect.top_left.y - rect.top_left.y.rem_euclid(unit);
        while y <= rect.bottom_right.y {
            let mut x = rect.top_left.x - rect.top_left.x.rem_euclid(unit);
            while x <= rect.bottom_right.x {
                self.put(Coordinate::new(x, y), "  ".to_string(), style);
                x += unit;
            }
            y += unit;
        }
    }

    fn label(&mut self, rect: ButtonRect, text: &str, style: Style) {
        let unit = self.grid_unit;
        let row = (rect.top_left.y + rect.bottom_right.y) / 2;
        let cells = (text.len() as i32 + 1) / 2;
        let center = (rect.top_left.x + rect.bottom_right.x) / 2;
        let start = center - cells * unit / 2;

        let padded = format!("{:<width$}", text, width = (cells * 2) as usize);
        for (i, pair) in padded.as_bytes().chunks(2).enumerate() {
            let chunk = String::from_utf8_lossy(pair).into_owned();
            self.put(Coordinate::new(start + i as i32 * unit, row), chunk, style);
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.rows.into_iter().map(Line::from).collect()
    }
}

/// Top-left pixel of the grid cell under a terminal position inside `area`
pub fn cell_to_pixel(area: Rect, grid_unit: i32, column: u16, row: u16) -> Option<Coordinate> {
    if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
        return None;
    }
    let cell_x = ((column - area.x) / CELL_WIDTH) as i32;
    let cell_y = (row - area.y) as i32;
    Some(Coordinate::new(cell_x * grid_unit, cell_y * grid_unit))
}

fn rgb(color: u32) -> Color {
    Color::Rgb((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

pub struct Renderer {
    /// Screen area of the play field from the last frame
    field_area: Option<Rect>,
    field: PlayField,
}

impl Renderer {
    pub fn new(field: PlayField) -> Self {
        Self {
            field_area: None,
            field,
        }
    }

    /// Screen area of the play field, if the last frame drew one
    pub fn field_area(&self) -> Option<Rect> {
        self.field_area
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        session: &Session,
        metrics: &GameMetrics,
        outcome: Option<Winner>,
    ) {
        let columns = (self.field.width / self.field.grid_unit) as u16 * CELL_WIDTH;
        let rows = (self.field.height / self.field.grid_unit) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),        // Header
                Constraint::Length(rows + 2), // Field
                Constraint::Min(0),
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_stats(session, metrics);
        frame.render_widget(header, chunks[0]);

        let field_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(columns + 2),
                Constraint::Min(0),
            ])
            .split(chunks[1])[1];

        if let Some(winner) = outcome {
            self.field_area = None;
            frame.render_widget(self.render_outcome(winner, metrics), field_area);
        } else {
            let (title, lines) = match (session.state(), session.engine()) {
                (SessionState::Play, Some(engine)) => (" Snaktionary ", self.play_lines(session, engine)),
                _ => (" Menu ", self.menu_lines(session)),
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title);
            self.field_area = Some(block.inner(field_area));
            frame.render_widget(Paragraph::new(lines).block(block), field_area);
        }

        let controls = self.render_controls(session.state());
        frame.render_widget(controls, chunks[3]);
    }

    fn menu_lines(&self, session: &Session) -> Vec<Line<'static>> {
        let mut canvas = Canvas::new(&self.field);
        let layout = session.layout();

        for (button, text) in [(MenuButton::Play, "PLAY"), (MenuButton::Exit, "EXIT")] {
            let color = if session.hovered() == Some(button) {
                Color::Yellow
            } else {
                Color::Blue
            };
            let style = Style::default().bg(color).fg(Color::Black).add_modifier(Modifier::BOLD);
            canvas.fill(layout.rect(button), style);
            canvas.label(layout.rect(button), text, style);
        }

        self.put_cursor(&mut canvas, session);
        canvas.into_lines()
    }

    fn play_lines(&self, session: &Session, engine: &MatchEngine) -> Vec<Line<'static>> {
        let mut canvas = Canvas::new(&self.field);
        let unit = self.field.grid_unit;

        // Middle wall
        let wall_x = self.field.middle_border - self.field.middle_border.rem_euclid(unit);
        let mut y = 0;
        while y < self.field.height {
            canvas.put(Coordinate::new(wall_x, y), "┃ ".to_string(), Style::default().fg(Color::White));
            y += unit;
        }

        let letter = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let next = Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD);

        if let Some(word) = engine.snake_word() {
            let progress = engine.snake_progress().letter;
            for (i, (&ch, &at)) in word.targets.iter().zip(&word.kbd).enumerate().skip(progress) {
                let style = if i == progress { next } else { letter };
                canvas.put(at, format!("{ch} "), style);
            }
        }

        if let Some(word) = engine.pointer_word() {
            let progress = engine.pointer_progress().letter;
            for (ch, &at) in word.mouse_letters().zip(&word.mouse).skip(progress) {
                canvas.put(at, format!("{ch} "), letter);
            }
        }

        for (i, segment) in engine.snake().body().iter().enumerate() {
            let (text, color) = if i == 0 {
                ("■ ", Color::Green)
            } else {
                ("□ ", rgb(segment.color))
            };
            canvas.put(segment.coord, text.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD));
        }

        self.put_cursor(&mut canvas, session);
        canvas.into_lines()
    }

    fn put_cursor(&self, canvas: &mut Canvas, session: &Session) {
        canvas.put(
            session.pointer().position(),
            "▲ ".to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        );
    }

    fn render_stats(&self, session: &Session, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Snake: ", Style::default().fg(Color::Green)),
            Span::styled(
                metrics.wins(Winner::Snake).to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Mouse: ", Style::default().fg(Color::Magenta)),
            Span::styled(
                metrics.wins(Winner::Pointer).to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];

        if let Some(engine) = session.engine() {
            let words = engine.words().len();
            spans.extend([
                Span::raw("    "),
                Span::styled("Word: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(
                        "{}/{} vs {}/{}",
                        engine.snake_progress().word + 1,
                        words,
                        engine.pointer_progress().word + 1,
                        words
                    ),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            ]);
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_outcome(&self, winner: Winner, metrics: &GameMetrics) -> Paragraph<'_> {
        let color = match winner {
            Winner::Snake => Color::Green,
            Winner::Pointer => Color::Magenta,
        };
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                format!("{} WINS", winner.label().to_uppercase()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.format_time(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, state: SessionState) -> Paragraph<'_> {
        let line = match state {
            SessionState::Play => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" steer the snake | "),
                Span::styled("Mouse", Style::default().fg(Color::Magenta)),
                Span::raw(" clicks letters on the right"),
            ]),
            _ => Line::from(vec![
                Span::styled("Click PLAY", Style::default().fg(Color::Cyan)),
                Span::raw(" or press "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}
