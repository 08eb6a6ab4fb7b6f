//! Ratatui-based terminal UI.
//!
//! The TUI shows the distribution of sample means with its normal fit and a
//! settings panel for scale, number of samples and sample size. Every change
//! reruns the pipeline and redraws the chart.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::run_visualizer;
use crate::domain::{SampleMeansRun, VisualizerParams};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::CltPlottersChart;

const TITLE: &str = "Distribution of Sample Means";
const X_LABEL: &str = "Sample Mean";
const Y_LABEL: &str = "Density";

const SCALE_STEP: f64 = 0.5;
const N_SAMPLES_LADDER: [usize; 10] = [1, 10, 50, 100, 250, 500, 1000, 2000, 5000, 10000];
const SAMPLE_SIZE_LADDER: [usize; 12] = [1, 2, 5, 10, 20, 30, 50, 100, 200, 500, 1000, 2000];

/// Start the TUI.
pub fn run(params: VisualizerParams) -> Result<(), AppError> {
    let mut app = App::new(params)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

struct App {
    params: VisualizerParams,
    selected_field: usize,
    status: String,
    run: SampleMeansRun,
}

impl App {
    fn new(params: VisualizerParams) -> Result<Self, AppError> {
        let run = run_visualizer(&params)?;
        // Pin the resolved seed so parameter edits keep the same random stream.
        let params = VisualizerParams {
            seed: Some(run.seed),
            ..params
        };
        Ok(Self {
            params,
            selected_field: 0,
            status: format!("seed: {}", run.seed),
            run,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            let event =
                event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))?;
            match event {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
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

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < 2 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1)?,
            KeyCode::Right => self.adjust_field(1)?,
            KeyCode::Char('r') => {
                let seed = self.run.seed.wrapping_add(1);
                self.params.seed = Some(seed);
                self.rerun()?;
                self.status = format!("Resampled (seed {seed}).");
            }
            _ => {}
        }

        Ok(false)
    }

    fn adjust_field(&mut self, delta: i32) -> Result<(), AppError> {
        match self.selected_field {
            0 => {
                self.params.scale = step_scale(self.params.scale, delta);
                self.rerun()?;
                self.status = format!("scale: {:.2}", self.params.scale);
            }
            1 => {
                self.params.n_samples =
                    step_ladder(&N_SAMPLES_LADDER, self.params.n_samples, delta);
                self.rerun()?;
                self.status = format!("samples: {}", self.params.n_samples);
            }
            2 => {
                self.params.sample_size =
                    step_ladder(&SAMPLE_SIZE_LADDER, self.params.sample_size, delta);
                self.rerun()?;
                self.status = format!("sample size: {}", self.params.sample_size);
            }
            _ => {}
        }
        Ok(())
    }

    fn rerun(&mut self) -> Result<(), AppError> {
        log::debug!("tui rerun: {:?}", self.params);
        self.run = run_visualizer(&self.params)?;
        Ok(())
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
        let stats = &self.run.stats;
        let lines = vec![
            Line::from(vec![
                Span::styled("clt", Style::default().fg(Color::Cyan)),
                Span::raw(format!(
                    " — Exponential(scale={:.2}) | n={} | size={} | seed={}",
                    self.params.scale,
                    self.params.n_samples,
                    self.params.sample_size,
                    self.run.seed,
                )),
            ]),
            Line::from(Span::styled(
                format!(
                    "μ = {:.2} | σ = {:.2} | scale/√size = {:.2}{}",
                    stats.mean,
                    stats.std,
                    stats.predicted_std,
                    if self.run.curve.is_none() {
                        " | normal fit skipped (σ = 0)"
                    } else {
                        ""
                    },
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = chart_series(&self.run);

        let layout = chart_layout(inner);
        let chart_rect = layout.unwrap_or(inner);
        let widget = CltPlottersChart {
            bars: &series.bars,
            curve: self.run.curve.as_ref().map(|c| c.points.as_slice()),
            mean: self.run.stats.mean,
            std: self.run.stats.std,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, chart_rect);
        if layout.is_some() {
            draw_axis_titles(frame, inner, chart_rect);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Scale: {:.2}", self.params.scale)),
            ListItem::new(format!("Samples: {}", self.params.n_samples)),
            ListItem::new(format!("Sample size: {}", self.params.sample_size)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  r resample  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Move one rung along `ladder` from `current`.
///
/// Values between rungs snap to the neighbouring rung in the requested direction.
fn step_ladder(ladder: &[usize], current: usize, delta: i32) -> usize {
    if delta >= 0 {
        ladder
            .iter()
            .copied()
            .find(|&v| v > current)
            .unwrap_or(current)
    } else {
        ladder
            .iter()
            .rev()
            .copied()
            .find(|&v| v < current)
            .unwrap_or(current)
    }
}

/// Step the scale by `SCALE_STEP`, never below `SCALE_STEP`.
///
/// A scale already under the floor is left alone when stepping down.
fn step_scale(current: f64, delta: i32) -> f64 {
    if delta >= 0 {
        return current + SCALE_STEP;
    }
    let next = current - SCALE_STEP;
    if next >= SCALE_STEP {
        next
    } else {
        current.min(SCALE_STEP)
    }
}

struct ChartSeries {
    bars: Vec<(f64, f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series and bounds for Plotters.
fn chart_series(run: &SampleMeansRun) -> ChartSeries {
    let bars: Vec<(f64, f64, f64)> = run.histogram.bars().collect();

    let mut x0 = run.histogram.edges.first().copied().unwrap_or(0.0);
    let mut x1 = run.histogram.edges.last().copied().unwrap_or(1.0);
    if !x0.is_finite() || !x1.is_finite() || x1 <= x0 {
        x0 = 0.0;
        x1 = 1.0;
    }

    let mut y_max = run.histogram.max_density();
    if let Some(curve) = &run.curve {
        y_max = y_max.max(curve.max_density());
    }
    if !y_max.is_finite() || y_max <= 0.0 {
        y_max = 1.0;
    }

    ChartSeries {
        bars,
        x_bounds: [x0, x1],
        // Headroom for the legend and annotation.
        y_bounds: [0.0, y_max * 1.15],
    }
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

/// Room for the axis titles: one row above the chart, one row below it.
const TITLE_INSETS: AxisInsets = AxisInsets {
    left: 1,
    right: 2,
    top: 1,
    bottom: 1,
};

/// Plotters area inside the chart block, or `None` when there is no room for titles.
fn chart_layout(inner: Rect) -> Option<Rect> {
    let insets = TITLE_INSETS;
    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return None;
    }

    Some(Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    })
}

/// Axis titles around the Plotters area; tick labels come from the Plotters mesh.
fn draw_axis_titles(frame: &mut ratatui::Frame<'_>, inner: Rect, chart: Rect) {
    let x_label = Paragraph::new(X_LABEL)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(Y_LABEL)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
