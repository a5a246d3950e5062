use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, AssetKind, Field, StatusLevel};
use crate::domain::{EvmQueryKind, OutputFormat};

const NEUTRAL_PROMPT: &str = "Enter an address to generate a badge";

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header);
    draw_form(f, areas.form, app);
    draw_output(f, areas.output, app);
    draw_status_line(f, areas.status_line, app);
    draw_hint_line(f, areas.hint_line, app);

    if app.chain_picker_open {
        draw_chain_picker(f, areas.size, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "badgesmith",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  dynamic crypto balance badges"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Left);
    f.render_widget(title, area);
}

fn focused_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn field_line(app: &App, field: Field, value: String) -> Line<'static> {
    let focused = app.focus == field && !app.chain_picker_open;
    let marker = if focused { "› " } else { "  " };
    let cursor = if focused && field.is_text() { "▏" } else { "" };
    Line::from(vec![
        Span::styled(marker.to_string(), focused_style(focused)),
        Span::styled(format!("{:<18}", field.title()), focused_style(focused)),
        Span::raw(value),
        Span::styled(cursor.to_string(), Style::default().fg(Color::LightCyan)),
    ])
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("                    {message}"),
        Style::default().fg(Color::Red),
    ))
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(field_line(app, Field::Asset, app.asset_kind.title().to_string()));

    match app.asset_kind {
        AssetKind::Ethereum => {
            let chain_value = match app.selected_chain() {
                Some(chain) => {
                    if chain.testnet {
                        format!("{} [testnet]", chain.label())
                    } else {
                        chain.label()
                    }
                }
                None => {
                    if app.registry.is_loading() {
                        "Loading networks…".to_string()
                    } else if app.registry.error().is_some() {
                        "unavailable".to_string()
                    } else {
                        "Select network… (Enter)".to_string()
                    }
                }
            };
            lines.push(field_line(app, Field::Chain, chain_value));
            if let Some(err) = app.registry.error() {
                lines.push(error_line(err));
            }

            let query_value = match app.query_kind {
                EvmQueryKind::NativeBalance => app.native_balance_label(),
                EvmQueryKind::Erc20Balance => "ERC20 Token Balance".to_string(),
            };
            lines.push(field_line(app, Field::QueryType, query_value));

            if app.query_kind == EvmQueryKind::Erc20Balance {
                lines.push(field_line(
                    app,
                    Field::TokenAddress,
                    app.token_address.clone(),
                ));
                if !app.token_address_error().is_empty() {
                    lines.push(error_line(app.token_address_error()));
                }
            }
        }
        AssetKind::Bitcoin => {
            lines.push(field_line(
                app,
                Field::BtcNetwork,
                app.btc_network.title().to_string(),
            ));
        }
    }

    lines.push(field_line(app, Field::Address, app.address.clone()));
    if !app.address_error().is_empty() {
        lines.push(error_line(app.address_error()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Display overrides (optional)",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(field_line(app, Field::Color, app.overrides.color.clone()));
    lines.push(field_line(
        app,
        Field::WarningThreshold,
        app.overrides.warning_threshold.clone(),
    ));
    if !app.overrides.color.is_empty() && !app.overrides.warning_threshold.is_empty() {
        lines.push(Line::from(Span::styled(
            "                    ignored while a color is set",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(field_line(app, Field::Icon, app.overrides.icon.clone()));

    lines.push(Line::from(""));
    lines.push(field_line(
        app,
        Field::LinkToggle,
        if app.link_to_explorer { "yes" } else { "no" }.to_string(),
    ));

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Query"))
        .wrap(Wrap { trim: false });
    f.render_widget(form, area);
}

fn draw_output(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    // tabs
    let mut tab_spans: Vec<Span> = Vec::new();
    for format in OutputFormat::ALL {
        let active = format == app.output_format;
        let style = if active {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(format!(" {} ", format.title()), style));
        tab_spans.push(Span::raw("|"));
    }
    tab_spans.pop();
    lines.push(Line::from(tab_spans));
    lines.push(Line::from(""));

    if app.has_output() {
        lines.push(Line::from(Span::styled(
            app.output_snippet(),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Badge image",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(app.badge_image_url().to_string()));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Explorer link",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(app.explorer_link_url().to_string()));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Ctrl+Y: copy snippet",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            NEUTRAL_PROMPT,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let output = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Badge"))
        .wrap(Wrap { trim: false });
    f.render_widget(output, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.status_text() {
        Some((text, StatusLevel::Info)) => (text.to_string(), Style::default().fg(Color::Green)),
        Some((text, StatusLevel::Warn)) => (text.to_string(), Style::default().fg(Color::Yellow)),
        Some((text, StatusLevel::Error)) => (text.to_string(), Style::default().fg(Color::Red)),
        None => (String::new(), Style::default()),
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_hint_line(f: &mut Frame, area: Rect, app: &App) {
    let hints = if app.chain_picker_open {
        "type: search  ↑/↓: move  Enter: select  Esc: close"
    } else if app.focus.is_text() {
        "Tab/Shift-Tab: move  type: edit  ←/→: change values  Ctrl+Y: copy  Ctrl+C: quit"
    } else {
        "Tab/Shift-Tab: move  ←/→/Enter: change value  Ctrl+Y: copy  Ctrl+C: quit"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn draw_chain_picker(f: &mut Frame, size: Rect, app: &App) {
    let area = layout::popup_rect(size, 64, 20);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Select network");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let search_area = Rect {
        height: 1,
        ..inner
    };
    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };

    let search = Paragraph::new(Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.chain_search.clone()),
        Span::styled("▏", Style::default().fg(Color::LightCyan)),
    ]));
    f.render_widget(search, search_area);

    let results = app.picker_results();
    if results.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No networks found.",
                Style::default().fg(Color::DarkGray),
            )),
            list_area,
        );
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .map(|chain| {
            let mut spans = vec![Span::raw(chain.label())];
            if chain.testnet {
                spans.push(Span::styled(
                    "  testnet",
                    Style::default().fg(Color::Yellow),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.chain_cursor.min(results.len() - 1)));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");
    f.render_stateful_widget(list, list_area, &mut state);
}
