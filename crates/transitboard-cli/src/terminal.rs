//! Plain-text rendering of the dashboard.

use std::io::Write;

use transitboard_core::render::{NO_ALERTS_MESSAGE, NO_ALERTS_TITLE};
use transitboard_core::{AlertCard, CoreError, DashboardView, RenderTarget};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes each frame to `out`.
pub struct TerminalTarget<W: Write> {
    out: W,
    clear: bool,
}

impl<W: Write> TerminalTarget<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: false }
    }

    /// Wipe the screen before each frame.
    pub fn clear_between_frames(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }
}

impl<W: Write> RenderTarget for TerminalTarget<W> {
    fn render(&mut self, view: &DashboardView) -> Result<(), CoreError> {
        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        print_view(&mut self.out, view)?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn print_view<W: Write>(out: &mut W, view: &DashboardView) -> std::io::Result<()> {
    let s = &view.stats;
    writeln!(
        out,
        "Critical: {}  Warnings: {}  Service info: {}  Good service: {}  Rush hour: {}",
        s.critical, s.warning, s.info, s.good_service_lines, s.rush_hour
    )?;
    writeln!(out)?;

    if view.shows_placeholder() {
        writeln!(out, "{NO_ALERTS_TITLE}")?;
        writeln!(out, "{NO_ALERTS_MESSAGE}")?;
        return Ok(());
    }

    for card in &view.cards {
        print_card(out, card)?;
        writeln!(out)?;
    }
    Ok(())
}

fn print_card<W: Write>(out: &mut W, card: &AlertCard) -> std::io::Result<()> {
    let badges: Vec<String> = card.lines.iter().map(|b| format!("[{}]", b.line)).collect();
    let rush = if card.rush_hour { "  RUSH HOUR" } else { "" };
    writeln!(
        out,
        "{} {}  {}{}",
        badges.join(""),
        card.severity.as_str().to_uppercase(),
        card.title,
        rush
    )?;
    writeln!(out, "  {}", card.description)?;
    writeln!(out, "  Affected stations: {}", card.stations)?;
    writeln!(out, "  Service status: {}", card.reliability)?;
    if let Some(at) = &card.estimated_resolution {
        writeln!(out, "  Est. resolution: {at}")?;
    }
    writeln!(
        out,
        "  {} away · {} · Updated: {}",
        card.distance, card.borough, card.updated
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use transitboard_core::alert::sample_alerts;
    use transitboard_core::AlertStats;

    fn render_to_string(view: &DashboardView) -> String {
        let mut target = TerminalTarget::new(Vec::new());
        target.render(view).unwrap();
        String::from_utf8(target.out).unwrap()
    }

    #[test]
    fn cards_show_badges_and_details() {
        let now = Utc::now();
        let alerts = sample_alerts(now);
        let view = DashboardView::build(&alerts[..1], AlertStats::compute(&alerts), Vec::new(), now);
        let text = render_to_string(&view);
        assert!(text.starts_with("Critical: 1  Warnings: 3"));
        assert!(text.contains("[4][5][6] CRITICAL  Service Disruption on 4, 5, 6 Lines  RUSH HOUR"));
        assert!(text.contains("Service status: Fair"));
        assert!(text.contains("0.3 miles away"));
    }

    #[test]
    fn empty_view_prints_placeholder() {
        let view = DashboardView::build(&[], AlertStats::default(), Vec::new(), Utc::now());
        let text = render_to_string(&view);
        assert!(text.contains(NO_ALERTS_TITLE));
        assert!(!text.contains('['));
    }
}
