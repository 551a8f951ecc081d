//! Ratatui-based terminal viewer.
//!
//! The viewer loads a spreadsheet once, then lets the user flip between three
//! tabs: the weekly trend with MA bands, the monthly candlestick view, and a
//! scrollable record table. Reloading (`r`) re-runs the whole pipeline; if
//! the reload fails, the previously displayed series is kept and the error
//! message is shown in the status line.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::RunOutput;
use crate::cli::LoadArgs;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{MonthlyCandles, TrendChart};

/// Start the viewer. The file is loaded before the terminal is put into raw
/// mode so upload-format errors surface as ordinary CLI errors.
pub fn run(args: LoadArgs) -> Result<(), AppError> {
    let run = crate::app::pipeline::run_load(&args.file)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args.file, run);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Trend,
    Monthly,
    Table,
}

impl Tab {
    fn next(self) -> Self {
        match self {
            Tab::Trend => Tab::Monthly,
            Tab::Monthly => Tab::Table,
            Tab::Table => Tab::Trend,
        }
    }

    fn prev(self) -> Self {
        match self {
            Tab::Trend => Tab::Table,
            Tab::Monthly => Tab::Trend,
            Tab::Table => Tab::Monthly,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Tab::Trend => "Trend",
            Tab::Monthly => "Monthly",
            Tab::Table => "Table",
        }
    }
}

struct App {
    file: PathBuf,
    run: RunOutput,
    tab: Tab,
    table_offset: usize,
    status: String,
}

impl App {
    fn new(file: PathBuf, run: RunOutput) -> Self {
        let status = format!("Loaded {} records.", run.series.len());
        Self {
            file,
            run,
            tab: Tab::Trend,
            table_offset: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.tab = self.tab.prev(),
            KeyCode::Char('1') => self.tab = Tab::Trend,
            KeyCode::Char('2') => self.tab = Tab::Monthly,
            KeyCode::Char('3') => self.tab = Tab::Table,
            KeyCode::Up => {
                if self.tab == Tab::Table {
                    self.table_offset = self.table_offset.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.tab == Tab::Table {
                    let max = self.run.series.len().saturating_sub(1);
                    self.table_offset = (self.table_offset + 1).min(max);
                }
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
        false
    }

    fn reload(&mut self) {
        match crate::app::pipeline::run_load(&self.file) {
            Ok(run) => {
                self.status = format!("Reloaded {} records.", run.series.len());
                self.run = run;
                self.table_offset = 0;
            }
            // Keep the previously displayed series; just surface the message.
            Err(err) => self.status = err.to_string(),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ccl", Style::default().fg(Color::Cyan)),
            Span::raw(" — weekly index trends"),
        ]));

        let latest = self.run.weekly.last();
        let span_text = match (self.run.series.first(), self.run.series.last()) {
            (Some(first), Some(last)) => format!("{} → {}", first.end_date, last.end_date),
            _ => "-".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "file: {} | n={} | {span_text} | latest: {} | 52W MA: {}",
                self.file.display(),
                self.run.series.len(),
                latest.map(|p| format!("{:.2}", p.record.value)).unwrap_or_else(|| "-".to_string()),
                latest.map(|p| format!("{:.2}", p.ma52)).unwrap_or_else(|| "-".to_string()),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!(
            " {} ",
            [Tab::Trend, Tab::Monthly, Tab::Table]
                .iter()
                .map(|t| {
                    if *t == self.tab {
                        format!("[{}]", t.title())
                    } else {
                        t.title().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        );
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match self.tab {
            Tab::Trend => self.draw_trend(frame, inner),
            Tab::Monthly => self.draw_monthly(frame, inner),
            Tab::Table => self.draw_table(frame, inner),
        }
    }

    fn draw_trend(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let weekly = &self.run.weekly;
        if weekly.is_empty() {
            self.draw_placeholder(frame, area);
            return;
        }

        let values: Vec<(f64, f64)> = positions(weekly.iter().map(|p| p.record.value));
        let ma: Vec<(f64, f64)> = positions(weekly.iter().map(|p| p.ma52));
        let upper: Vec<(f64, f64)> = positions(weekly.iter().map(|p| p.upper_band));
        let lower: Vec<(f64, f64)> = positions(weekly.iter().map(|p| p.lower_band));
        let ticks: Vec<String> = weekly.iter().map(|p| p.record.end_date.to_string()).collect();

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in weekly {
            y_min = y_min.min(p.record.value).min(p.lower_band);
            y_max = y_max.max(p.record.value).max(p.upper_band);
        }
        let (y_min, y_max) = pad_bounds(y_min, y_max);

        let widget = TrendChart {
            values: &values,
            ma: &ma,
            upper: &upper,
            lower: &lower,
            x_bounds: [0.0, (weekly.len().max(2) - 1) as f64],
            y_bounds: [y_min, y_max],
            x_ticks: &ticks,
        };
        frame.render_widget(widget, area);
    }

    fn draw_monthly(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let monthly = &self.run.monthly;
        if monthly.is_empty() {
            self.draw_placeholder(frame, area);
            return;
        }

        let ma: Vec<(f64, f64)> = positions(monthly.iter().map(|m| m.ma10));

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for m in monthly {
            y_min = y_min.min(m.low).min(m.ma10);
            y_max = y_max.max(m.high).max(m.ma10);
        }
        let (y_min, y_max) = pad_bounds(y_min, y_max);

        let widget = MonthlyCandles {
            months: monthly,
            ma: &ma,
            x_bounds: [-0.5, monthly.len() as f64 - 0.5],
            y_bounds: [y_min, y_max],
        };
        frame.render_widget(widget, area);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            format!("{:<12} {:>10}  {}", "End date", "CCL", "Date range"),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        // Newest first, scrolled by `table_offset`.
        for record in self.run.series.iter().rev().skip(self.table_offset) {
            lines.push(Line::from(format!(
                "{:<12} {:>10.2}  {}",
                record.end_date.to_string(),
                record.value,
                record.original_range
            )));
        }

        let p = Paragraph::new(Text::from(lines));
        frame.render_widget(p, area);
    }

    fn draw_placeholder(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let msg = Paragraph::new("No data.").style(Style::default().fg(Color::Yellow));
        frame.render_widget(msg, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                "q quit | tab/←/→ switch | 1/2/3 jump | ↑/↓ scroll | r reload",
                Style::default().fg(Color::Gray),
            ),
            Span::raw("   "),
            Span::styled(self.status.clone(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn positions(values: impl Iterator<Item = f64>) -> Vec<(f64, f64)> {
    values.enumerate().map(|(i, v)| (i as f64, v)).collect()
}

fn pad_bounds(min: f64, max: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span < 1e-9 { 1.0 } else { span * 0.05 };
    (min - pad, max + pad)
}
