//! Pure rendering: map a [`Ui`] to ratatui widgets.
//!
//! The prompt uses three fixed single-line regions: the word on the top
//! line, the candidate one third of the way down, the key legend on the
//! bottom line. Help and summary take the whole surface.
//!
//! Cursor visibility follows from the frame: only the prompt positions the
//! cursor, so ratatui hides it everywhere else.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};

use crate::export::save_filename;
use crate::types::{SaveFormat, Summary};

use super::state::Ui;
use super::theme;

/// Bottom-line legend while prompting.
pub const PROMPT_LEGEND: &str = "Shortlist word? (y/n/s/q/?)";

/// Arrow shown in front of the candidate.
const CANDIDATE_MARKER: &str = "⟹ ";

/// Key → description rows of the help panel.
const HELP_ROWS: [(&str, &str); 5] = [
    ("y", "yes, add this synonym to the shortlist"),
    ("n", "no, leave it out"),
    ("s", "skip the remaining candidates for this word"),
    ("q", "quit immediately without saving"),
    ("?", "toggle this help panel"),
];

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the given UI state to the terminal frame.
pub fn render(ui: &Ui<'_>, frame: &mut Frame) {
    let area = frame.area();

    match ui {
        Ui::Prompt {
            word,
            candidate,
            word_pos,
            candidate_pos,
        } => {
            render_prompt(word, candidate, *word_pos, *candidate_pos, frame, area);
        }
        Ui::Help => render_help(frame, area),
        Ui::Summary(summary) => render_summary(summary, frame, area),
    }
}

// ============================================================================
// REGIONS
// ============================================================================

/// Top line.
pub fn word_region(area: Rect) -> Rect {
    Rect::new(area.x, area.y, area.width, area.height.min(1))
}

/// One line, a third of the way down.
pub fn candidate_region(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 3, area.width, area.height.min(1))
}

/// Bottom line.
pub fn prompt_region(area: Rect) -> Rect {
    Rect::new(
        area.x,
        area.bottom().saturating_sub(1).max(area.y),
        area.width,
        area.height.min(1),
    )
}

/// Where the cursor waits while prompting: one column past the legend.
pub fn prompt_cursor(area: Rect) -> Position {
    let region = prompt_region(area);
    let x = region.x + PROMPT_LEGEND.len() as u16 + 1;
    Position::new(x.min(region.right().saturating_sub(1)), region.y)
}

// ============================================================================
// PROMPT
// ============================================================================

fn render_prompt(
    word: &str,
    candidate: &str,
    word_pos: (usize, usize),
    candidate_pos: (usize, usize),
    frame: &mut Frame,
    area: Rect,
) {
    let counter = Line::from(Span::styled(
        format!(
            "word {}/{} · candidate {}/{}",
            word_pos.0, word_pos.1, candidate_pos.0, candidate_pos.1
        ),
        theme::STYLE_DIM,
    ));
    let top = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(counter.width() as u16),
    ])
    .split(word_region(area));

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Synonym for "),
            Span::styled(word.to_string(), theme::STYLE_WORD),
        ])),
        top[0],
    );
    frame.render_widget(Paragraph::new(counter).alignment(Alignment::Right), top[1]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(CANDIDATE_MARKER),
            Span::styled(candidate.to_string(), theme::STYLE_CANDIDATE),
        ])),
        candidate_region(area),
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(PROMPT_LEGEND, theme::STYLE_KEY))),
        prompt_region(area),
    );

    frame.set_cursor_position(prompt_cursor(area));
}

// ============================================================================
// HELP OVERLAY
// ============================================================================

fn render_help(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("Help", theme::STYLE_TITLE)),
        Line::from(""),
    ];
    for (key, description) in HELP_ROWS {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(key, theme::STYLE_KEY),
            Span::raw("  "),
            Span::raw(description),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press ? to return to the current candidate.",
        theme::STYLE_DIM,
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

// ============================================================================
// SUMMARY & SAVE MENU
// ============================================================================

fn render_summary(summary: &Summary, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let chunks = Layout::vertical([
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    let mut lines = vec![
        Line::from(Span::styled("Shortlisting complete", theme::STYLE_TITLE)),
        Line::from(""),
        Line::from(vec![
            Span::raw("Candidates: "),
            Span::styled(summary.total_candidates.to_string(), theme::STYLE_IMPORTANT),
        ]),
        Line::from(vec![
            Span::raw("Accepted:   "),
            Span::styled(summary.total_accepted.to_string(), theme::STYLE_IMPORTANT),
        ]),
        Line::from(format!("Words:      {}", summary.words.join(", "))),
        Line::from(""),
    ];

    for (word, accepted) in &summary.accepted {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", word), theme::STYLE_WORD),
            Span::styled(accepted.join(", "), theme::STYLE_ACCEPTED),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Save shortlist as:"));
    lines.push(menu_line(1, &format!("text ({})", save_filename(SaveFormat::Text))));
    lines.push(menu_line(2, &format!("JSON ({})", save_filename(SaveFormat::Json))));
    lines.push(menu_line(3, "discard and exit"));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("[1-3] choose", theme::STYLE_DIM))),
        chunks[1],
    );
}

fn menu_line(key: u8, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("[{}]", key), theme::STYLE_KEY),
        Span::raw(format!(" {}", label)),
    ])
}

// ============================================================================
// TESTS
// ============================================================================
