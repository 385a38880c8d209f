//! Per-screen card rendering for the wizard.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::checkin::{FlowController, Screen};
use crate::ui::app::{InfoFocus, WizardInputs};
use crate::ui::text_input::TextInputState;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub(crate) fn draw(
    f: &mut Frame,
    flow: &FlowController,
    inputs: &WizardInputs,
    focus: InfoFocus,
    tick: u32,
) {
    let area = f.area();
    match flow.screen() {
        Screen::Welcome => draw_welcome(f, area),
        Screen::Privacy => draw_privacy(f, area),
        Screen::Consent => draw_consent(f, area, flow.awaiting_contact_ack()),
        Screen::Role => draw_role(f, area),
        Screen::Info => draw_info(f, area, flow, inputs, focus),
        Screen::Study => draw_study(f, area, flow, inputs, tick),
        Screen::Done => draw_done(f, area),
        Screen::NoCheckin => draw_no_checkin(f, area),
    }
}

/// Centered rect for a dialog card.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Clear and frame a centered card, returning its inner area.
fn draw_card(f: &mut Frame, area: Rect, title: &str, height: u16) -> Rect {
    let dialog = centered(area, 62, height);
    f.render_widget(Clear, dialog);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(dialog);
    f.render_widget(block, dialog);
    inner
}

fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let inner = draw_card(f, area, " TUBRIC Study Check-In ", 9);
    let text = [
        "",
        "  Welcome! This kiosk records your visit",
        "  for the TUBRIC study.",
        "",
        "  [Enter] Begin",
    ]
    .join("\n");
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_privacy(f: &mut Frame, area: Rect) {
    let inner = draw_card(f, area, " Privacy Notice ", 12);
    let text = [
        "",
        "  Your information is used only to record today's",
        "  visit. A staff member can answer any questions",
        "  before you continue.",
        "",
        "  [Y] I agree, continue",
        "  [N] No thanks",
        "",
        "  [Esc] Back",
    ]
    .join("\n");
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_consent(f: &mut Frame, area: Rect, awaiting_ack: bool) {
    let inner = draw_card(f, area, " Contact Consent ", 11);
    let text = [
        "",
        "  May the study team contact you about future",
        "  studies?",
        "",
        "  [Y] Yes, you may contact me",
        "  [N] No, please don't",
        "",
        "  [Esc] Back",
    ]
    .join("\n");
    f.render_widget(Paragraph::new(text), inner);

    if awaiting_ack {
        let overlay = draw_card(f, area, " Thank You ", 8);
        let text = [
            "",
            "  The study team may contact you using the",
            "  information you provide on the next screen.",
            "",
            "  [Enter] OK",
        ]
        .join("\n");
        f.render_widget(Paragraph::new(text), overlay);
    }
}

fn draw_role(f: &mut Frame, area: Rect) {
    let inner = draw_card(f, area, " Who is checking in? ", 10);
    let text = [
        "",
        "  [1] I am the participant",
        "  [2] I am a parent/guardian of the participant",
        "",
        "  [Esc] Back",
    ]
    .join("\n");
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_field(f: &mut Frame, row: Rect, label: &str, input: &TextInputState, focused: bool) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(1)])
        .split(row);

    let label_style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    f.render_widget(Paragraph::new(format!("  {label}:")).style(label_style), cols[0]);
    input.render(cols[1], f.buffer_mut(), Style::default(), focused);
}

fn draw_info(
    f: &mut Frame,
    area: Rect,
    flow: &FlowController,
    inputs: &WizardInputs,
    focus: InfoFocus,
) {
    let inner = draw_card(f, area, " Participant Information ", 16);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // subtitle
            Constraint::Length(1),
            Constraint::Length(1), // first name
            Constraint::Length(1), // last name
            Constraint::Length(1), // date of birth
            Constraint::Length(1), // email
            Constraint::Length(1), // phone
            Constraint::Length(1),
            Constraint::Length(1), // error
            Constraint::Min(1),    // hints
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(format!("  {}", flow.info_subtitle()))
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: false }),
        rows[0],
    );

    draw_field(f, rows[2], "First name", &inputs.first_name, focus == InfoFocus::FirstName);
    draw_field(f, rows[3], "Last name", &inputs.last_name, focus == InfoFocus::LastName);
    draw_field(f, rows[4], "DOB (MM-DD-YYYY)", &inputs.dob, focus == InfoFocus::Dob);
    draw_field(f, rows[5], "Email", &inputs.email, focus == InfoFocus::Email);
    draw_field(f, rows[6], "Phone", &inputs.phone, focus == InfoFocus::Phone);

    if let Some(error) = flow.error() {
        f.render_widget(
            Paragraph::new(format!("  {error}")).style(Style::default().fg(Color::Red)),
            rows[8],
        );
    }
    f.render_widget(
        Paragraph::new("  [Tab] Next field  [Enter] Continue  [Esc] Back").style(hint_style()),
        rows[9],
    );
}

fn draw_study(f: &mut Frame, area: Rect, flow: &FlowController, inputs: &WizardInputs, tick: u32) {
    let inner = draw_card(f, area, " Study Code ", 12);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(1),
            Constraint::Length(1), // input
            Constraint::Length(1),
            Constraint::Length(1), // error / progress
            Constraint::Min(1),    // hints
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new("  Enter the TUBRIC Study Code for today's visit."),
        rows[0],
    );
    draw_field(f, rows[2], "Study code", &inputs.study_code, !flow.is_submitting());

    if flow.is_submitting() {
        let frame = SPINNER_FRAMES[(tick / 6) as usize % SPINNER_FRAMES.len()];
        f.render_widget(
            Paragraph::new(format!("  {frame} Submitting...")).style(Style::default().fg(Color::Yellow)),
            rows[4],
        );
    } else if let Some(error) = flow.error() {
        f.render_widget(
            Paragraph::new(format!("  {error}")).style(Style::default().fg(Color::Red)),
            rows[4],
        );
    }
    f.render_widget(
        Paragraph::new("  [Enter] Finish  [Esc] Back").style(hint_style()),
        rows[5],
    );
}

fn draw_done(f: &mut Frame, area: Rect) {
    let inner = draw_card(f, area, " All Set ", 9);
    let text = [
        "",
        "  You're checked in. Thank you!",
        "  Please return the kiosk to the front desk.",
        "",
        "  [Enter] Done",
    ]
    .join("\n");
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_no_checkin(f: &mut Frame, area: Rect) {
    let inner = draw_card(f, area, " No Check-In ", 9);
    let text = [
        "",
        "  No problem, nothing was recorded.",
        "  Please see the front desk if you change your mind.",
        "",
        "  [Enter] Done",
    ]
    .join("\n");
    f.render_widget(Paragraph::new(text), inner);
}
