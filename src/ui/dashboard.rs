use crate::advisor::Excess;
use crate::export::format::{area as m2, eur, eur_per_m2, pct};
use crate::model::{ComplianceStatus, EvaluationResult, ReserveBand};
use crate::ui::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

// Brandbook colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C);
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0);
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68);
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C);
const BRAND_RED: Color = Color::Rgb(0xA8, 0x3C, 0x3C);
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65);

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);

fn band_color(band: ReserveBand) -> Color {
    match band {
        ReserveBand::Exceeded => BRAND_RED,
        ReserveBand::Tight => BRAND_ORANGE,
        ReserveBand::Comfortable => BRAND_GREEN,
    }
}

fn ok_color(ok: bool) -> Color {
    if ok {
        BRAND_GREEN
    } else {
        BRAND_RED
    }
}

fn status_color(status: ComplianceStatus) -> Color {
    match status {
        ComplianceStatus::Optimal => BRAND_GREEN,
        ComplianceStatus::BorderlineCompromise
        | ComplianceStatus::ConditionalOk
        | ComplianceStatus::RiskyFzpBecomesLimiting => BRAND_ORANGE,
        _ => BRAND_RED,
    }
}

fn reserve_note(reserve: f64, band: ReserveBand) -> String {
    match band {
        ReserveBand::Exceeded => format!("+{} over limit", m2(reserve.abs())),
        ReserveBand::Tight => format!("TIGHT: {} reserve", m2(reserve.max(0.0))),
        ReserveBand::Comfortable => format!("OK: {} reserve", m2(reserve)),
    }
}

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(4), // Metric cards, top row
        Constraint::Length(4), // Metric cards, bottom row
        Constraint::Min(8),    // Details | typologies | advisor
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);

    match &app.result {
        Ok(result) => {
            draw_top_cards(frame, chunks[1], result);
            draw_bottom_cards(frame, chunks[2], result);
            draw_main_content(frame, chunks[3], app, result);
        }
        Err(err) => {
            let text = Paragraph::new(format!("Invalid input: {err}"))
                .style(Style::default().fg(BRAND_RED))
                .block(Block::default().title(" Error ").borders(Borders::ALL));
            frame.render_widget(text, chunks[1].union(chunks[3]));
        }
    }

    let help = match &app.message {
        Some(msg) => format!(
            " {msg} | s Scenario | m Units mode | ↑↓ Proposal | Enter Apply | u Undo | q Quit "
        ),
        None => " s Scenario | m Units mode | ↑↓ Proposal | Enter Apply | u Undo | q Quit "
            .to_string(),
    };
    draw_footer(frame, chunks[4], &help);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let info = &app.inputs.info;
    let name = if info.name.is_empty() {
        "Untitled project"
    } else {
        info.name.as_str()
    };

    let mut spans = vec![Span::styled(format!(" URBANISTIKA | {name} "), HEADER_STYLE)];
    if !info.code.is_empty() {
        spans.push(Span::styled(
            format!("| {} ", info.code),
            Style::default().fg(BRAND_MUTED),
        ));
    }
    spans.push(Span::styled(
        format!("| {} ", app.inputs.scenario),
        Style::default().fg(BRAND_MUTED),
    ));
    if let Ok(result) = &app.result {
        spans.push(Span::styled(
            format!("| {} ", result.status),
            Style::default()
                .fg(status_color(result.status))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn card(frame: &mut Frame, area: Rect, title: &str, value: String, note: String, color: Color) {
    let body = vec![
        Line::from(Span::styled(value, HEADER_STYLE)),
        Line::from(Span::styled(note, Style::default().fg(color))),
    ];
    let widget = Paragraph::new(body).block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(widget, area);
}

fn quarters(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::horizontal([Constraint::Percentage(25); 4]).split(area)
}

fn draw_top_cards(frame: &mut Frame, area: Rect, r: &EvaluationResult) {
    let cols = quarters(area);

    card(
        frame,
        cols[0],
        "Building footprint (FZ)",
        m2(r.massing.building_footprint_m2),
        reserve_note(r.fz.reserve_m2, r.fz.band),
        band_color(r.fz.band),
    );
    card(
        frame,
        cols[1],
        "Basement footprint",
        m2(r.basement.footprint_m2),
        format!("Levels: {}", r.basement.levels),
        if r.basement.exceeds_building_footprint {
            BRAND_ORANGE
        } else {
            BRAND_MUTED
        },
    );
    card(
        frame,
        cols[2],
        "FZP",
        pct(r.fzp.achieved),
        format!("Min: {}", pct(r.fzp.min_fraction)),
        ok_color(r.fzp.ok),
    );
    card(
        frame,
        cols[3],
        "FI (BTP / parcel)",
        format!("{:.2}", r.fi.achieved),
        reserve_note(r.fi.reserve_btp_m2, r.fi.band),
        band_color(r.fi.band),
    );
}

fn draw_bottom_cards(frame: &mut Frame, area: Rect, r: &EvaluationResult) {
    let cols = quarters(area);
    let e = &r.economics;

    card(
        frame,
        cols[0],
        "Units",
        r.units.count.to_string(),
        r.units.source.to_string(),
        BRAND_MUTED,
    );
    card(
        frame,
        cols[1],
        "Total investment",
        eur(e.total_invest),
        eur_per_m2(e.cost_per_m2_nfa),
        BRAND_MUTED,
    );
    card(
        frame,
        cols[2],
        "Margin",
        pct(e.margin_pct),
        eur(e.margin_abs),
        ok_color(e.margin_abs >= 0.0),
    );
    card(
        frame,
        cols[3],
        "Status",
        r.status.label().to_string(),
        r.status.tag().to_string(),
        status_color(r.status),
    );
}

fn draw_main_content(frame: &mut Frame, area: Rect, app: &App, r: &EvaluationResult) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(45), // Details
        Constraint::Percentage(25), // Typologies
        Constraint::Percentage(30), // Advisor
    ])
    .split(area);

    draw_details(frame, chunks[0], app, r);
    draw_typologies(frame, chunks[1], r);
    draw_advisor(frame, chunks[2], app, r);
}

fn draw_details(frame: &mut Frame, area: Rect, app: &App, r: &EvaluationResult) {
    let muted = Style::default().fg(BRAND_MUTED);
    let line = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), muted),
            Span::raw(value),
        ])
    };

    let lines = vec![
        line("Parcel", m2(r.parcel_area_m2)),
        line(
            "FI achieved / limit",
            format!(
                "{:.2} / {:.2} (allowed BTP {})",
                r.fi.achieved,
                r.fi.limit,
                m2(r.fi.allowed_btp_m2)
            ),
        ),
        line(
            "BTP above ground",
            format!("{} ({} floors)", m2(r.massing.btp_above_m2), r.massing.floors),
        ),
        line(
            "NFA",
            format!(
                "{} (net/gross {:.2})",
                m2(r.massing.nfa_m2),
                app.inputs.massing.net_to_gross_ratio
            ),
        ),
        line("Average unit", format!("{:.1} m²", r.massing.avg_unit_m2)),
        line(
            "Parking",
            format!(
                "{} stalls (residents {}, visitors {})",
                r.parking.stalls_total, r.parking.stalls_resident, r.parking.stalls_visitor
            ),
        ),
        line(
            "Basement / surface",
            format!(
                "{} / {} stalls",
                r.parking.stalls_in_basement, r.parking.stalls_on_surface
            ),
        ),
        line("Surface parking area", m2(r.basement.surface_parking_area_m2)),
        line("Growing area", m2(r.fzp.growing_area_m2)),
        line(
            "Economics",
            format!(
                "revenue {}, investment {}",
                eur(r.economics.revenue),
                eur(r.economics.total_invest)
            ),
        ),
    ];

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Details ").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn draw_typologies(frame: &mut Frame, area: Rect, r: &EvaluationResult) {
    let header = Row::new(vec!["Typology", "Share", "m²", "Units"])
        .style(HEADER_STYLE)
        .height(1);

    let rows: Vec<Row> = r
        .units
        .by_typology
        .iter()
        .map(|t| {
            Row::new(vec![
                t.name.clone(),
                format!("{:.0} %", t.share_pct),
                format!("{:.0}", t.avg_unit_m2),
                t.units.to_string(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];

    let title = format!(" Typologies ({} units) ", r.units.count);
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn draw_advisor(frame: &mut Frame, area: Rect, app: &App, r: &EvaluationResult) {
    let proposals = app.proposals();

    let verdict = match Excess::of(r) {
        Some(excess) => Span::styled(excess.to_string(), Style::default().fg(BRAND_RED)),
        None => Span::styled(
            "Compliant. No optimization needed.",
            Style::default().fg(BRAND_GREEN),
        ),
    };
    let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(verdict))];

    for (i, adjustment) in proposals.iter().enumerate() {
        let is_selected = i == app.selected_proposal;
        let style = if is_selected {
            SELECTED_STYLE
        } else {
            Style::default()
        };
        let marker = if is_selected { " ◄" } else { "" };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(adjustment.label(), style),
            Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
        ])));
    }

    let border_style = if proposals.is_empty() {
        Style::default()
    } else {
        Style::default().fg(BRAND_ORANGE)
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Optimization ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(list, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, help: &str) {
    let footer = Paragraph::new(help)
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
