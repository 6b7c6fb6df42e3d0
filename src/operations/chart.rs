use crate::error::{LedgerError, Result};
use crate::models::ledger::Ledger;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Modifier, Rect, Style},
    text::{Line, Span},
    widgets::canvas::{Canvas, Points},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::debug;

const PALETTE: [Color; 11] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
    Color::LightYellow,
    Color::LightGreen,
    Color::LightBlue,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Pie,
    Bar,
}

impl ChartType {
    pub fn title(self) -> &'static str {
        match self {
            ChartType::Pie => "Expense Distribution by Category (Pie Chart)",
            ChartType::Bar => "Expense Distribution by Category (Bar Chart)",
        }
    }
}

impl FromStr for ChartType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "pie" => Ok(ChartType::Pie),
            "bar" => Ok(ChartType::Bar),
            other => Err(LedgerError::InvalidChartType(other.to_string())),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Pie => write!(f, "pie"),
            ChartType::Bar => write!(f, "bar"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub category: String,
    pub amount: Decimal,
    /// Percentage of the total spend, 0..=100.
    pub share: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub chart_type: ChartType,
    pub slices: Vec<ChartSlice>,
    pub total: Decimal,
}

pub fn build_chart(ledger: &Ledger, chart_type: ChartType) -> ChartData {
    let totals = ledger.category_totals();
    let total = totals.iter().fold(Decimal::ZERO, |acc, (_, v)| acc + *v);

    let slices = totals
        .into_iter()
        .enumerate()
        .map(|(idx, (category, amount))| {
            let share = if total > Decimal::ZERO {
                (amount / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
            } else {
                0.0
            };
            ChartSlice {
                category,
                amount,
                share,
                color: PALETTE[idx % PALETTE.len()],
            }
        })
        .collect();

    ChartData {
        chart_type,
        slices,
        total,
    }
}

/// Shows the chart full-screen until `q` or `Esc` is pressed.
pub fn render_chart(ledger: &Ledger, chart_type: &str) -> Result<()> {
    let chart_type: ChartType = chart_type.parse()?;
    let chart = build_chart(ledger, chart_type);
    debug!(%chart_type, categories = chart.slices.len(), "Rendering chart");

    let mut stdout = io::stdout();
    let raw_mode = enter_alternate_screen(RawModeGuard::enter()?, &mut stdout)?;

    let result = (|| -> Result<()> {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| terminal_error("Failed to initialize terminal", e))?;

        loop {
            terminal
                .draw(|frame| {
                    let area = frame.area();
                    draw_chart(frame, area, &chart);
                })
                .map_err(|e| terminal_error("Failed to draw terminal UI", e))?;

            if event::poll(std::time::Duration::from_millis(250))
                .map_err(|e| terminal_error("Failed to poll input", e))?
            {
                match event::read().map_err(|e| terminal_error("Failed to read input", e))? {
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    let mut stdout = io::stdout();
    let left = execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| terminal_error("Failed to leave alternate screen", e));
    raw_mode.release()?;

    result.and(left)
}

/// Keeps the terminal in raw mode until released or dropped.
struct RawModeGuard {
    restore: Option<fn() -> io::Result<()>>,
}

impl RawModeGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().map_err(|e| terminal_error("Failed to enable raw mode", e))?;
        Ok(Self {
            restore: Some(disable_raw_mode),
        })
    }

    fn release(mut self) -> Result<()> {
        match self.restore.take() {
            Some(restore) => restore().map_err(|e| terminal_error("Failed to disable raw mode", e)),
            None => Ok(()),
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            let _ = restore();
        }
    }
}

/// Raw mode is undone when the switch fails, since `guard` drops with the error.
fn enter_alternate_screen(guard: RawModeGuard, out: &mut impl Write) -> Result<RawModeGuard> {
    execute!(out, EnterAlternateScreen)
        .map_err(|e| terminal_error("Failed to enter alternate screen", e))?;
    Ok(guard)
}

fn terminal_error(context: &str, e: impl fmt::Display) -> LedgerError {
    LedgerError::Terminal(format!("{}: {}", context, e))
}

pub fn draw_chart(frame: &mut Frame, area: Rect, chart: &ChartData) {
    let block = Block::default()
        .title(Line::from(vec![Span::styled(
            format!("{}  (press q to exit)", chart.chart_type.title()),
            Style::default().fg(Color::White),
        )]))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if chart.slices.is_empty() {
        let empty = Paragraph::new("No expenses recorded").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    match chart.chart_type {
        ChartType::Pie => draw_pie(frame, inner, chart),
        ChartType::Bar => draw_bar(frame, inner, chart),
    }
}

fn draw_pie(frame: &mut Frame, area: Rect, chart: &ChartData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    // start at 12 o'clock, like a 90 degree start angle
    let mut start_angle = std::f64::consts::FRAC_PI_2;
    let mut arcs = Vec::new();
    for slice in &chart.slices {
        let sweep = slice.share / 100.0 * std::f64::consts::TAU;
        arcs.push((start_angle, start_angle + sweep, slice.color));
        start_angle += sweep;
    }

    let canvas = Canvas::default()
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (start, end, color) in &arcs {
                let mut points = Vec::new();
                let mut r = 0.0;
                while r <= 1.0 {
                    let mut angle = *start;
                    while angle <= *end {
                        points.push((r * angle.cos(), r * angle.sin()));
                        angle += 0.05;
                    }
                    r += 0.04;
                }
                if !points.is_empty() {
                    ctx.draw(&Points {
                        coords: &points,
                        color: *color,
                    });
                }
            }
        });
    frame.render_widget(canvas, layout[0]);

    draw_legend(frame, layout[1], chart);
}

fn draw_legend(frame: &mut Frame, area: Rect, chart: &ChartData) {
    let mut lines = vec![Line::from(vec![
        Span::styled("Category", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled("Share", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ])];

    for slice in &chart.slices {
        let style = Style::default().fg(slice.color);
        lines.push(Line::from(vec![
            Span::styled(format!("{:15}", slice.category), style),
            Span::raw("  "),
            Span::styled(format!("{:>6.1}%", slice.share), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}

fn draw_bar(frame: &mut Frame, area: Rect, chart: &ChartData) {
    let bars: Vec<Bar> = chart
        .slices
        .iter()
        .map(|slice| {
            Bar::default()
                .value(slice.amount.round().to_u64().unwrap_or(0))
                .text_value(format!("{:.2}", slice.amount))
                .label(Line::from(slice.category.clone()))
                .style(Style::default().fg(slice.color))
        })
        .collect();

    let count = chart.slices.len() as u16;
    let bar_width = (area.width / count.max(1)).saturating_sub(1).clamp(3, 12);

    let bar_chart = BarChart::default()
        .block(Block::default().title("Amount ($)"))
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(bar_chart, area);
}
