// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Terminal charts over the repository aggregates.
//!
//! Nothing here aggregates: the pie takes `sum_by_category` output and the
//! line takes `monthly_totals` output as they are.

use crate::models::{CategoryTotal, MonthTotal};
use crate::utils::{fmt_money, fmt_percent};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph,
        canvas::{Canvas, Line as CanvasLine},
    },
};
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::debug;

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightYellow,
];

const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);
const TITLE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Angular step used to fill a slice with rays from the centre.
const FILL_STEP: f64 = 0.005;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub percent: f64,
}

/// Slices for the positive category totals; percentages are over their sum.
pub fn pie_slices(totals: &[CategoryTotal]) -> Vec<PieSlice> {
    let positive: f64 = totals.iter().filter(|c| c.total > 0.0).map(|c| c.total).sum();
    totals
        .iter()
        .filter(|c| c.total > 0.0)
        .map(|c| PieSlice {
            label: c.category.clone(),
            value: c.total,
            percent: c.total / positive * 100.0,
        })
        .collect()
}

/// (index, total) points in the order given, plus the month labels.
pub fn line_points(months: &[MonthTotal]) -> (Vec<(f64, f64)>, Vec<String>) {
    let points = months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.total))
        .collect();
    let labels = months.iter().map(|m| m.month.clone()).collect();
    (points, labels)
}

fn slice_color(i: usize) -> Color {
    PALETTE[i % PALETTE.len()]
}

fn footer(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Press any key to return to the menu",
            FOOTER_STYLE,
        ))),
        area,
    );
}

pub fn draw_pie(frame: &mut Frame, slices: &[PieSlice]) {
    let [body, foot] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
    let block = Block::default()
        .title(Span::styled(" Spending by Category ", TITLE_STYLE))
        .borders(Borders::ALL);
    let inner = block.inner(body);
    frame.render_widget(block, body);

    let [pie_area, legend_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(inner);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.1, 1.1])
        .y_bounds([-1.1, 1.1])
        .paint(|ctx| {
            // Start at twelve o'clock and go counter-clockwise.
            let mut start = FRAC_PI_2;
            for (i, s) in slices.iter().enumerate() {
                let sweep = s.percent / 100.0 * TAU;
                let mut a = start;
                while a < start + sweep {
                    ctx.draw(&CanvasLine::new(0.0, 0.0, a.cos(), a.sin(), slice_color(i)));
                    a += FILL_STEP;
                }
                start += sweep;
            }
        });
    frame.render_widget(canvas, pie_area);

    let legend: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Line::from(vec![
                Span::styled("■ ", Style::new().fg(slice_color(i))),
                Span::raw(format!(
                    "{} {} ({})",
                    s.label,
                    fmt_money(s.value),
                    fmt_percent(s.percent)
                )),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), legend_area);
    footer(frame, foot);
}

pub fn draw_line(frame: &mut Frame, months: &[MonthTotal]) {
    let [body, foot] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
    let (points, labels) = line_points(months);

    let max_x = (points.len().saturating_sub(1)).max(1) as f64;
    let max_y = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    let min_y = points.iter().map(|p| p.1).fold(0.0_f64, f64::min);
    let top = if max_y > 0.0 { max_y * 1.1 } else { 1.0 };
    let bottom = if min_y < 0.0 { min_y * 1.1 } else { 0.0 };

    let x_labels: Vec<String> = match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        2 => labels.clone(),
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    };
    let y_labels: Vec<String> = vec![
        format!("{:.2}", bottom),
        format!("{:.2}", (bottom + top) / 2.0),
        format!("{:.2}", top),
    ];

    let datasets = vec![
        Dataset::default()
            .name("Monthly total")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::new().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::new().fg(Color::Yellow))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(" Monthly Spending Trend ", TITLE_STYLE))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Month")
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Amount ($)")
                .bounds([bottom, top])
                .labels(y_labels),
        );
    frame.render_widget(chart, body);
    footer(frame, foot);
}

/// Where the visualization menu sends its series.
pub trait ChartRenderer {
    fn pie(&mut self, slices: &[PieSlice]) -> Result<()>;
    fn line(&mut self, months: &[MonthTotal]) -> Result<()>;
}

/// Full-screen ratatui rendering; returns when any key is pressed.
#[derive(Debug, Default)]
pub struct TerminalCharts;

impl ChartRenderer for TerminalCharts {
    fn pie(&mut self, slices: &[PieSlice]) -> Result<()> {
        debug!(slices = slices.len(), "rendering pie chart");
        run_chart_view(|frame| draw_pie(frame, slices))
    }

    fn line(&mut self, months: &[MonthTotal]) -> Result<()> {
        debug!(points = months.len(), "rendering line chart");
        run_chart_view(|frame| draw_line(frame, months))
    }
}

fn run_chart_view(mut draw: impl FnMut(&mut Frame)) -> Result<()> {
    let mut terminal = ratatui::try_init()?;

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(&mut draw) {
            break Err(e.into());
        }
        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}
