use ratatui::{prelude::*, widgets::*};
use rcountdown::{FrameView, Phase, ProjectionLayout};

use crate::app::AppState;

// ============================================================================
// Themes
// ============================================================================

#[derive(Clone, Copy)]
pub struct Theme {
    pub background: (u8, u8, u8),
    pub accent: (u8, u8, u8),
    pub text: (u8, u8, u8),
    pub hint: (u8, u8, u8),
}

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox", "solarized"];

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            background: (46, 52, 64),
            accent: (136, 192, 208),
            text: (236, 239, 244),
            hint: (76, 86, 106),
        },
        "dracula" => Theme {
            background: (40, 42, 54),
            accent: (189, 147, 249),
            text: (248, 248, 242),
            hint: (98, 114, 164),
        },
        "gruvbox" => Theme {
            background: (40, 40, 40),
            accent: (254, 128, 25),
            text: (235, 219, 178),
            hint: (146, 131, 116),
        },
        "solarized" => Theme {
            background: (0, 43, 54),
            accent: (42, 161, 152),
            text: (253, 246, 227),
            hint: (88, 110, 117),
        },
        _ => Theme {
            background: (66, 66, 66),
            accent: (255, 175, 73),
            text: (255, 255, 255),
            hint: (140, 140, 140),
        },
    }
}

fn rgb(c: (u8, u8, u8)) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Terminals have no alpha, so opacity is a blend toward whatever is behind.
fn fade(fg: (u8, u8, u8), bg: (u8, u8, u8), opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(b) + (f64::from(a) - f64::from(b)) * t).round() as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render_ui(f: &mut Frame, app: &AppState, view: &FrameView) {
    let area = f.size();
    let theme = app.theme;
    let layout = app.screen.layout();

    f.render_widget(Block::default().style(Style::default().bg(rgb(theme.background))), area);

    render_background(f, area, view, &layout, theme);
    render_title(f, area, view, theme);
    render_list(f, area, app, view, theme);
    render_countdown(f, area, app, view, theme);
    render_button(f, area, view, &layout, theme);
    render_controls(f, area, view, theme);
}

/// Layout units to rows, relative to the projection's screen height.
fn to_rows(units: f64, layout: &ProjectionLayout, area: Rect) -> i32 {
    (units / layout.screen_height * f64::from(area.height)).round() as i32
}

fn clip(area: Rect, x: i32, y: i32, width: u16, height: u16) -> Option<Rect> {
    let x0 = x.max(area.x as i32);
    let y0 = y.max(area.y as i32);
    let x1 = (x + width as i32).min((area.x + area.width) as i32);
    let y1 = (y + height as i32).min((area.y + area.height) as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

fn render_background(f: &mut Frame, area: Rect, view: &FrameView, layout: &ProjectionLayout, theme: Theme) {
    let v = &view.visual;
    // slid-in position, then the drained share comes off the top
    let drained = (1.0 - v.background_fill) * f64::from(area.height);
    let top = area.y as i32 + to_rows(v.background_translate_y, layout, area) + drained.round() as i32;
    if let Some(rect) = clip(area, area.x as i32, top, area.width, area.height) {
        f.render_widget(Block::default().style(Style::default().bg(rgb(theme.accent))), rect);
    }
}

fn render_title(f: &mut Frame, area: Rect, view: &FrameView, theme: Theme) {
    let color = fade(theme.text, theme.background, view.visual.button_opacity);
    if let Some(rect) = clip(area, area.x as i32, area.y as i32 + 1, area.width, 1) {
        f.render_widget(
            Paragraph::new(Span::styled("⏳ RCOUNTDOWN", Style::default().fg(color).add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center),
            rect,
        );
    }
}

fn list_row(area: Rect) -> i32 {
    area.y as i32 + area.height as i32 / 3
}

fn render_list(f: &mut Frame, area: Rect, app: &AppState, view: &FrameView, theme: Theme) {
    if view.visual.list_opacity <= 0.0 {
        return;
    }
    let mapper = app.screen.mapper();
    let offset = mapper.state().offset;
    let item = mapper.item_size();
    let center = area.x as i32 + area.width as i32 / 2;
    let row = list_row(area);

    for (i, (duration, weight)) in mapper.catalog().iter().zip(&view.visual.items).enumerate() {
        let x = center + (i as f64 * item - offset).round() as i32;
        let label = duration.secs().to_string();
        let width = item.max(1.0) as u16;

        let mut style = Style::default().fg(fade(theme.text, theme.background, weight.opacity));
        if weight.scale > 0.8 {
            style = style.add_modifier(Modifier::BOLD);
        }

        if weight.scale > 0.9 {
            let glyph = big_number(&label);
            let w = glyph[0].chars().count() as u16;
            if let Some(rect) = clip(area, x - w as i32 / 2, row - 2, w, glyph.len() as u16) {
                let lines: Vec<Line> = glyph.into_iter().map(|l| Line::from(Span::styled(l, style))).collect();
                f.render_widget(Paragraph::new(lines), rect);
            }
        } else if let Some(rect) = clip(area, x - width as i32 / 2, row, width, 1) {
            f.render_widget(Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center), rect);
        }
    }
}

fn render_countdown(f: &mut Frame, area: Rect, app: &AppState, view: &FrameView, theme: Theme) {
    let opacity = view.visual.text_opacity;
    if opacity <= 0.0 {
        return;
    }
    let behind = if view.phase == Phase::Running { theme.accent } else { theme.background };
    let style = Style::default().fg(fade(theme.text, behind, opacity)).add_modifier(Modifier::BOLD);

    let glyph = big_number(&view.remaining_seconds.to_string());
    let w = glyph[0].chars().count() as u16;
    let center = area.x as i32 + area.width as i32 / 2;
    let row = list_row(area);
    if let Some(rect) = clip(area, center - w as i32 / 2, row - 2, w, glyph.len() as u16) {
        let lines: Vec<Line> = glyph.into_iter().map(|l| Line::from(Span::styled(l, style))).collect();
        f.render_widget(Paragraph::new(lines), rect);
    }

    let caption = match (view.phase, app.finish_at) {
        (Phase::Running, Some(at)) => format!("ends at {}", at.format("%H:%M:%S")),
        (Phase::Finished, _) => "done!".to_string(),
        _ => String::new(),
    };
    if let Some(rect) = clip(area, area.x as i32, row + 4, area.width, 1) {
        f.render_widget(Paragraph::new(Span::styled(caption, style)).alignment(Alignment::Center), rect);
    }
}

fn render_button(f: &mut Frame, area: Rect, view: &FrameView, layout: &ProjectionLayout, theme: Theme) {
    let v = &view.visual;
    if v.button_opacity <= 0.0 {
        return;
    }
    let color = fade(theme.accent, theme.background, v.button_opacity);
    let (w, h) = (13u16, 3u16);
    let x = area.x as i32 + (area.width as i32 - w as i32) / 2;
    let y = area.y as i32 + area.height as i32 - 6 + to_rows(v.button_translate_y, layout, area);
    if let Some(rect) = clip(area, x, y, w, h) {
        f.render_widget(
            Paragraph::new(Span::styled("START", Style::default().fg(color).add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color)),
                ),
            rect,
        );
    }
}

fn render_controls(f: &mut Frame, area: Rect, view: &FrameView, theme: Theme) {
    let behind = match view.phase {
        Phase::Idle => theme.background,
        _ => theme.accent,
    };
    let key = Style::default().fg(fade(theme.text, behind, 0.9)).add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(fade(theme.hint, behind, 1.0));

    let spans = match view.phase {
        Phase::Idle | Phase::Finished => vec![
            Span::styled("←→", key), Span::styled(" Pick  •  ", hint),
            Span::styled("Space", key), Span::styled(" Start  •  ", hint),
            Span::styled("T", key), Span::styled(" Theme  •  ", hint),
            Span::styled("Q", key), Span::styled(" Quit", hint),
        ],
        Phase::Committing | Phase::Running => vec![
            Span::styled("N", key), Span::styled(" Skip  •  ", hint),
            Span::styled("Q", key), Span::styled(" Quit", hint),
        ],
    };
    if let Some(rect) = clip(area, area.x as i32, (area.y + area.height) as i32 - 1, area.width, 1) {
        f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), rect);
    }
}

// ============================================================================
// Big digits
// ============================================================================

const DIGITS: [[&str; 5]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" █ ", "██ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

/// Five rows of block glyphs; non-digits are skipped.
fn big_number(text: &str) -> Vec<String> {
    let digits: Vec<usize> = text.chars().filter_map(|c| c.to_digit(10)).map(|d| d as usize).collect();
    (0..5)
        .map(|row| digits.iter().map(|&d| DIGITS[d][row]).collect::<Vec<_>>().join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade((255, 255, 255), (0, 0, 0), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(fade((255, 255, 255), (0, 0, 0), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(fade((200, 100, 0), (0, 0, 0), 0.5), Color::Rgb(100, 50, 0));
    }

    #[test]
    fn test_clip() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(clip(area, -5, 0, 10, 1), Some(Rect::new(0, 0, 5, 1)));
        assert_eq!(clip(area, 0, 30, 10, 1), None);
        assert_eq!(clip(area, 75, 23, 10, 5), Some(Rect::new(75, 23, 5, 1)));
    }

    #[test]
    fn test_big_number() {
        let rows = big_number("15");
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], " █  ███");
        assert_eq!(rows[4], "███ ███");
    }
}
