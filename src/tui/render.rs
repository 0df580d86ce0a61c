use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, BorderType, Borders, Clear, Padding, Paragraph,
};

use crate::tally::store::TallyStore;

const BAR_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::LightRed,
    Color::LightCyan,
    Color::LightGreen,
];

/// One entry of the series handed to the proportional chart renderer.
/// Labels are not required unique; zero values are valid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: String,
    pub value: u64,
}

/// One row of the option list, fully derived from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub name: String,
    pub notes: String,
    pub counter: u64,
    /// `"<counter> - <pct>%"`, suppressed while no votes have been cast.
    pub tally: Option<String>,
}

#[derive(Debug)]
pub struct BoardRenderData<'a> {
    pub slices: &'a [ChartSlice],
    pub rows: &'a [ListRow],
    pub selected: usize,
    pub editing: bool,
    pub total_votes: u64,
    pub mode_label: &'a str,
    pub hints: &'a str,
    pub message: Option<&'a str>,
    pub show_help: bool,
}

/// Chart series: one `{label, value}` pair per option, store order preserved.
pub fn chart_series(store: &TallyStore) -> Vec<ChartSlice> {
    store
        .options()
        .iter()
        .map(|option| ChartSlice {
            label: option.name.clone(),
            value: option.counter,
        })
        .collect()
}

/// List rows: name, notes, counter, and the formatted tally label. The label
/// is omitted entirely while the aggregate total is zero.
pub fn list_rows(store: &TallyStore) -> Vec<ListRow> {
    store
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| ListRow {
            name: option.name.clone(),
            notes: option.notes.clone(),
            counter: option.counter,
            tally: (store.total_votes() > 0)
                .then(|| format!("{} - {:.1}%", option.counter, store.percentage(index))),
        })
        .collect()
}

pub fn draw(frame: &mut Frame, data: &BoardRenderData<'_>) {
    let area = frame.area().inner(Margin {
        horizontal: 1,
        vertical: 0,
    });
    let [chart_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(12),
        Constraint::Min(4),
        Constraint::Length(2),
    ])
    .areas(area);

    draw_chart(frame, chart_area, data);
    draw_list(frame, list_area, data);
    draw_footer(frame, footer_area, data);

    if data.show_help {
        draw_help(frame, frame.area());
    }
}

fn draw_chart(frame: &mut Frame, area: Rect, data: &BoardRenderData<'_>) {
    let bars = data
        .slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let color = BAR_COLORS[idx % BAR_COLORS.len()];
            Bar::default()
                .label(Line::from(slice.label.clone()))
                .value(slice.value)
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect::<Vec<_>>();

    let title = Line::from(vec![
        Span::styled(
            "tally",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} votes", data.total_votes),
            Style::default().fg(Color::Gray),
        ),
    ]);
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area, data.slices.len()))
        .bar_gap(2)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    frame.render_widget(chart, area);
}

fn bar_width(area: Rect, bar_count: usize) -> u16 {
    if bar_count == 0 {
        return 1;
    }
    let usable = area.width.saturating_sub(2) as usize;
    let per_bar = usable.saturating_sub(bar_count.saturating_sub(1) * 2) / bar_count;
    per_bar.clamp(1, 24) as u16
}

fn draw_list(frame: &mut Frame, area: Rect, data: &BoardRenderData<'_>) {
    let mut lines = Vec::new();
    for (idx, row) in data.rows.iter().enumerate() {
        let selected = idx == data.selected;
        let marker = if selected { "> " } else { "  " };
        let name_style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(row.name.clone(), name_style),
        ];
        if data.editing {
            spans.push(Span::styled(
                "  [d] remove",
                Style::default().fg(Color::LightRed),
            ));
        }
        if let Some(tally) = &row.tally {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                tally.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
        if !row.notes.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", row.notes),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
    }
    if data.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "no options yet - press [e] then [a] to add one",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .title(" options ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::new(1, 1, 0, 0)),
    );
    frame.render_widget(list, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, data: &BoardRenderData<'_>) {
    let mode_color = if data.editing {
        Color::LightRed
    } else {
        Color::Cyan
    };
    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", data.mode_label),
            Style::default()
                .fg(Color::Black)
                .bg(mode_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            data.message.unwrap_or(""),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    let hints = Line::from(Span::styled(
        data.hints,
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(vec![status, hints]), area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 56, 50);
    frame.render_widget(Clear, popup);
    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        help_row("j/k or arrows", "select option"),
        help_row("+ / -", "vote up / down (floors at zero)"),
        help_row("e", "toggle edit mode"),
        help_row("a", "add option (edit mode)"),
        help_row("d", "remove option (edit mode)"),
        help_row("?", "toggle this help"),
        help_row("q / Esc", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Votes live in memory only and reset on exit.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" help ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(panel, popup);
}

fn help_row(keys: &str, what: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{keys:<16}"), Style::default().fg(Color::Yellow)),
        Span::styled(what.to_string(), Style::default().fg(Color::Gray)),
    ])
}

pub fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(vertical[1])[1]
}
