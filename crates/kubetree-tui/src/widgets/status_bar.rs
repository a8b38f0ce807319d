use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::theme::Theme;

/// One-line footer: key hints on the left, the latest log message (or the
/// kubeconfig path when there is none) on the right.
pub struct StatusBarWidget<'a> {
    pub hints: &'a [(String, String)],
    pub kubeconfig: &'a str,
    pub message: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let mut spans = Vec::new();

        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", t.text_dim));
            }
            spans.push(Span::styled(format!("<{key}>"), Style::default().fg(t.accent)));
            spans.push(Span::styled(format!(" {desc}"), Style::default().fg(t.fg)));
        }

        let right = Span::styled(format!(" {} ", self.message.unwrap_or(self.kubeconfig)), t.text_dim);
        let used = spans.iter().map(Span::width).sum::<usize>().saturating_add(right.width());
        let fill = usize::from(area.width).saturating_sub(used);

        if fill > 0 {
            spans.push(Span::raw(" ".repeat(fill)));
        }
        spans.push(right);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
