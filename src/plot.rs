use crate::data::*;
use crate::error::*;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tui::backend::{Backend, CrosstermBackend};
use tui::layout::{Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols;
use tui::text::{Span, Spans};
use tui::terminal::Frame;
use tui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use tui::Terminal;
use std::io::Write;

const CURVE_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
];

#[derive(Debug, Clone)]
pub struct Curve {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new(name: impl Into<String>, series: &[Sample]) -> Self {
        let points = series.iter()
            .map(|s| (s.time as f64, s.value as f64))
            .collect();

        Self {
            name: name.into(),
            points,
        }
    }
}

/// A chart of several traces over a shared time axis.
#[derive(Debug, Clone)]
pub struct Figure {
    title: String,
    x_label: String,
    y_label: String,
    curves: Vec<Curve>,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: "Time".to_string(),
            y_label: "Value".to_string(),
            curves: vec![],
        }
    }

    /// One curve per trace, legend in result set order.
    pub fn from_traces(title: impl Into<String>, traces: &ResultSet) -> Self {
        let mut figure = Self::new(title);
        for (name, series) in traces.iter() {
            figure.add_curve(name.as_str(), series);
        }
        figure
    }

    pub fn with_timescale(mut self, timescale: Option<&str>) -> Self {
        self.x_label = match timescale {
            Some(ts) => format!("Time [{}]", ts),
            None => "Time".to_string(),
        };
        self
    }

    pub fn add_curve(&mut self, name: impl Into<String>, series: &[Sample]) {
        self.curves.push(Curve::new(name, series));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    fn bounds(&self, select: impl Fn(&(f64, f64)) -> f64) -> [f64; 2] {
        let mut values = self.curves.iter()
            .flat_map(|c| c.points.iter())
            .map(select);

        let first = match values.next() {
            Some(v) => v,
            None => return [0.0, 1.0],
        };

        let (lo, hi) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if lo == hi {
            [lo - 1.0, hi + 1.0]
        } else {
            [lo, hi]
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        self.bounds(|p| p.0)
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        self.bounds(|p| p.1)
    }

    fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
        let mid = (bounds[0] + bounds[1]) / 2.0;

        vec![
            Span::raw(format!("{:.0}", bounds[0])),
            Span::raw(format!("{:.0}", mid)),
            Span::raw(format!("{:.0}", bounds[1])),
        ]
    }

    /// Draw the figure into `area`, with a key hint in the last line.
    pub fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let stack = Layout::default()
            .direction(Direction::Vertical)
            .margin(0)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let datasets = self.curves.iter()
            .enumerate()
            .map(|(i, curve)| {
                Dataset::default()
                    .name(curve.name.as_str())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(CURVE_COLORS[i % CURVE_COLORS.len()]))
                    .data(&curve.points)
            })
            .collect();

        let x_bounds = self.x_bounds();
        let y_bounds = self.y_bounds();
        let axis_style = Style::default().fg(Color::Gray);

        let chart = Chart::new(datasets)
            .block(Block::default()
                .title(Span::styled(self.title.as_str(), Style::default().add_modifier(Modifier::BOLD)))
                .borders(Borders::ALL))
            .x_axis(Axis::default()
                .title(Span::raw(self.x_label.as_str()))
                .style(axis_style)
                .bounds(x_bounds)
                .labels(Self::axis_labels(x_bounds)))
            .y_axis(Axis::default()
                .title(Span::raw(self.y_label.as_str()))
                .style(axis_style)
                .bounds(y_bounds)
                .labels(Self::axis_labels(y_bounds)))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

        let hint = Paragraph::new(Spans::from(vec![
            Span::raw("q: quit"),
        ]));

        frame.render_widget(chart, stack[0]);
        frame.render_widget(hint, stack[1]);
    }
}


/// Switches a terminal in and out of raw mode.
struct RawMode {
    enable: fn() -> std::io::Result<()>,
    disable: fn() -> std::io::Result<()>,
}

fn enable_raw_mode() -> std::io::Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    Ok(())
}

fn disable_raw_mode() -> std::io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}

const TERMINAL_RAW_MODE: RawMode = RawMode {
    enable: enable_raw_mode,
    disable: disable_raw_mode,
};

/// Run `body` in raw mode on the alternate screen of `out`. The terminal is
/// restored on every path that got past enabling raw mode.
fn on_alternate_screen<W, F>(out: &mut W, raw: &RawMode, body: F) -> Result<()>
    where
        W: Write,
        F: FnOnce() -> Result<()>
{
    (raw.enable)()?;

    if let Err(e) = out.execute(EnterAlternateScreen) {
        (raw.disable)()?;
        return Err(Error::IoError(e.into()));
    }

    let rv = body();

    (raw.disable)()?;
    out.execute(LeaveAlternateScreen)?;

    rv
}

/// Show the figure in the terminal until `q` or `Esc` is pressed.
#[cfg(not(tarpaulin_include))]
pub fn show(figure: &Figure) -> Result<()> {
    on_alternate_screen(&mut std::io::stdout(), &TERMINAL_RAW_MODE, || draw_loop(figure))
}

#[cfg(not(tarpaulin_include))]
fn draw_loop(figure: &Figure) -> Result<()> {
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| {
            let size = f.size();
            figure.draw(f, size);
        })?;

        match event::read()? {
            Event::Key(KeyEvent { code: KeyCode::Char('q'), .. })
            | Event::Key(KeyEvent { code: KeyCode::Esc, .. }) => break,

            _ => {}
        }
    }

    Ok(())
}
