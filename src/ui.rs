//! Ratatui rendering of the current [`App`] state.
//!
//! Views are built from structured widgets, never from interpolated markup,
//! so recipe fields containing special characters render as plain text.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus, Notice, CARD_HEIGHT, EMPTY_INPUT_MESSAGE};
use crate::model::RecipeDetail;

const THROBBER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Example ingredients suggested alongside the idle and no-results views
const SUGGESTED_INGREDIENTS: &str = "chicken, beef, rice, pasta, or salmon";

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Length(1), // key hints
            Constraint::Min(1),    // results area
        ])
        .split(f.area());

    draw_search_bar(f, app, chunks[0]);
    draw_hints(f, app, chunks[1]);
    draw_results(f, app, chunks[2]);

    if app.modal.is_some() {
        draw_detail_modal(f, app, f.area());
    } else {
        app.modal_area = Rect::default();
    }
}

fn draw_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("Search by ingredient")
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::Input {
            Style::new().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::DarkGray)
        });
    let inner = block.inner(area);
    let paragraph = Paragraph::new(app.input.as_str()).block(block);
    f.render_widget(paragraph, area);

    if app.focus == Focus::Input && app.modal.is_none() {
        let x = inner.x.saturating_add(app.input.chars().count() as u16);
        f.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn draw_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.modal.is_some() {
        vec![
            Span::styled("↑/↓", Style::new().fg(Color::Cyan)),
            Span::raw(" scroll  "),
            Span::styled("Esc", Style::new().fg(Color::Cyan)),
            Span::raw(" close"),
        ]
    } else {
        vec![
            Span::styled("Enter", Style::new().fg(Color::Cyan)),
            Span::raw(" search  "),
            Span::styled("Tab", Style::new().fg(Color::Cyan)),
            Span::raw(" switch pane  "),
            Span::styled("↑/↓", Style::new().fg(Color::Cyan)),
            Span::raw(" select  "),
            Span::styled("Esc", Style::new().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]
    };
    f.render_widget(
        Paragraph::new(Line::from(hints)).style(Style::new().fg(Color::DarkGray)),
        area,
    );
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title("Recipes")
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::Results {
            Style::new().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::DarkGray)
        });
    let inner = block.inner(area);
    app.results_area = inner;
    f.render_widget(block, area);

    if app.loading {
        let frame = THROBBER_FRAMES[app.throbber_idx % THROBBER_FRAMES.len()];
        let spinner = Paragraph::new(format!("{frame} Searching the catalog…"))
            .style(Style::new().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(spinner, inner);
        return;
    }

    if let Some(notice) = &app.notice {
        f.render_widget(notice_paragraph(notice), inner);
        return;
    }

    if app.results.is_empty() {
        let idle = Paragraph::new(vec![
            Line::raw(""),
            Line::raw("Type an ingredient and press Enter to find recipes."),
            Line::styled(
                format!("Try {SUGGESTED_INGREDIENTS}."),
                Style::new().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
        f.render_widget(idle, inner);
        return;
    }

    let items: Vec<ListItem> = app.results.iter().map(card_item).collect();
    let list = List::new(items).highlight_style(Style::new().bg(Color::DarkGray));
    f.render_stateful_widget(list, inner, &mut app.list_state);
}

/// One result card: title, category label, and an activation hint.
fn card_item(summary: &crate::model::RecipeSummary) -> ListItem<'static> {
    let item = ListItem::new(vec![
        Line::styled(summary.name.clone(), Style::new().bold()),
        Line::styled(
            summary.category_label().to_string(),
            Style::new().fg(Color::Green),
        ),
        Line::styled(
            "Enter to view full recipe →".to_string(),
            Style::new().fg(Color::DarkGray),
        ),
    ]);
    // Mouse hit testing in the app assumes this exact card height
    debug_assert_eq!(item.height(), CARD_HEIGHT as usize);
    item
}

fn notice_paragraph(notice: &Notice) -> Paragraph<'static> {
    match notice {
        Notice::EmptyInput => Paragraph::new(vec![
            Line::raw(""),
            Line::styled(EMPTY_INPUT_MESSAGE.to_string(), Style::new().fg(Color::Yellow)),
        ])
        .alignment(Alignment::Center),
        Notice::NoMatches { ingredient } => Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                format!("No recipes found for \"{ingredient}\""),
                Style::new().bold(),
            ),
            Line::raw(""),
            Line::styled(
                format!("Try common ingredients like {SUGGESTED_INGREDIENTS}."),
                Style::new().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false }),
        Notice::Error(message) => Paragraph::new(vec![
            Line::raw(""),
            Line::styled(message.clone(), Style::new().fg(Color::Red).bold()),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false }),
    }
}

fn draw_detail_modal(f: &mut Frame, app: &mut App, full: Rect) {
    let Some(detail) = &app.modal else { return };
    let area = centered_rect(80, 80, full);
    app.modal_area = area;

    // Clear the backdrop area, then draw the detail panel over it
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(Line::styled(detail.name.clone(), Style::new().bold()))
        .title_bottom(Line::styled(" Esc to close ", Style::new().fg(Color::DarkGray)))
        .borders(Borders::ALL)
        .border_style(Style::new().fg(Color::Cyan));

    let paragraph = Paragraph::new(detail_lines(detail))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.modal_scroll, 0));
    f.render_widget(paragraph, area);
}

fn detail_lines(detail: &RecipeDetail) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("[{}]", detail.category.as_deref().unwrap_or_default()),
                Style::new().fg(Color::Green),
            ),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", detail.area.as_deref().unwrap_or_default()),
                Style::new().fg(Color::Green),
            ),
        ]),
        Line::styled(detail.thumbnail_url.clone(), Style::new().fg(Color::DarkGray)),
        Line::raw(""),
        Line::styled("Ingredients:", Style::new().bold()),
    ];
    for ingredient in detail.ingredient_lines() {
        lines.push(Line::raw(format!("  • {ingredient}")));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("Instructions:", Style::new().bold()));
    for instruction_line in detail.instructions().lines() {
        lines.push(Line::raw(instruction_line.to_string()));
    }
    if let Some(video) = detail.video_link() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Video Tutorial:", Style::new().bold()));
        lines.push(Line::styled(
            format!("Watch on YouTube → {video}"),
            Style::new().fg(Color::Cyan),
        ));
    }
    lines
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeSummary;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell(Position::new(x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    fn detail(video: serde_json::Value) -> RecipeDetail {
        serde_json::from_value(json!({
            "idMeal": "52940",
            "strMeal": "Brown Stew Chicken",
            "strMealThumb": "https://example.com/thumb.jpg",
            "strCategory": "Chicken",
            "strArea": "Jamaican",
            "strInstructions": "Squeeze lime.\nRub chicken.",
            "strYoutube": video,
            "strIngredient1": "Chicken",
            "strMeasure1": "1 whole",
        }))
        .unwrap()
    }

    #[test]
    fn cards_show_title_and_category_fallback() {
        let mut app = App::new(12);
        app.results = vec![RecipeSummary {
            id: "1".to_string(),
            name: "Mystery Stew".to_string(),
            thumbnail_url: "https://example.com/1.jpg".to_string(),
            category: None,
        }];
        let screen = render(&mut app);
        assert!(screen.contains("Mystery Stew"));
        assert!(screen.contains("Main Dish"));
        assert!(screen.contains("Enter to view full recipe"));
    }

    #[test]
    fn no_matches_notice_names_the_ingredient() {
        let mut app = App::new(12);
        app.notice = Some(Notice::NoMatches {
            ingredient: "unicorn".to_string(),
        });
        let screen = render(&mut app);
        assert!(screen.contains("No recipes found for \"unicorn\""));
        assert!(screen.contains("chicken, beef, rice"));
    }

    #[test]
    fn loading_hides_cards_behind_the_throbber() {
        let mut app = App::new(12);
        app.loading = true;
        let screen = render(&mut app);
        assert!(screen.contains("Searching the catalog"));
    }

    #[test]
    fn modal_shows_video_link_only_when_present() {
        let mut app = App::new(12);
        app.modal = Some(detail(json!("https://youtu.be/_gFB1fkNhXs")));
        let screen = render(&mut app);
        assert!(screen.contains("Brown Stew Chicken"));
        assert!(screen.contains("1 whole Chicken"));
        assert!(screen.contains("Watch on YouTube"));
        assert!(app.modal_area.width > 0, "modal area recorded for hit testing");

        app.modal = Some(detail(json!(null)));
        let screen = render(&mut app);
        assert!(!screen.contains("Watch on YouTube"));
    }

    #[test]
    fn instructions_keep_embedded_line_breaks() {
        let mut app = App::new(12);
        app.modal = Some(detail(json!(null)));
        let screen = render(&mut app);
        let lime = screen.lines().position(|l| l.contains("Squeeze lime."));
        let rub = screen.lines().position(|l| l.contains("Rub chicken."));
        assert!(lime.is_some() && rub.is_some());
        assert_ne!(lime, rub, "each instruction renders on its own row");
    }
}
