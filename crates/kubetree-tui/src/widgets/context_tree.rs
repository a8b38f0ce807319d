use kubetree_core::{ContextMarker, ContextNode, LoadState, NamespaceMarker, NodeRef, SelectionTree};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::theme::Theme;

pub const ROOT_LABEL: &str = "Contexts";

pub struct ContextTreeWidget<'a> {
    pub tree: &'a SelectionTree,
    pub theme: &'a Theme,
}

impl<'a> ContextTreeWidget<'a> {
    /// Text and style of every visible row, in display order.
    pub fn rows(&self) -> Vec<(String, Style)> {
        let t = self.theme;
        self.tree
            .visible()
            .into_iter()
            .map(|node| match node {
                NodeRef::Root => (ROOT_LABEL.to_string(), Style::default().fg(t.accent).bold()),
                NodeRef::Context(idx) => match self.tree.context(idx) {
                    Some(ctx) => {
                        let arrow = if self.tree.is_expanded(idx) { '▾' } else { '▸' };
                        (format!("  {arrow} {}", ctx.label()), self.context_style(ctx))
                    }
                    None => (String::new(), Style::default()),
                },
                NodeRef::Namespace { context, index } => match self.tree.namespace(context, index) {
                    Some(ns) => {
                        let style = match ns.marker() {
                            NamespaceMarker::Active => t.active,
                            NamespaceMarker::Normal => Style::default().fg(t.fg),
                        };
                        (format!("      {}", ns.name()), style)
                    }
                    None => (String::new(), Style::default()),
                },
            })
            .collect()
    }

    fn context_style(&self, ctx: &ContextNode) -> Style {
        let t = self.theme;
        match (ctx.marker(), ctx.load_state()) {
            (_, LoadState::Loading) => t.text_dim,
            (ContextMarker::Error(_), _) => t.error,
            (ContextMarker::Active, _) => t.active,
            (ContextMarker::Normal, LoadState::Loaded) => t.visited,
            (ContextMarker::Normal, _) => Style::default().fg(t.fg),
        }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let selected = self.tree.visible().iter().position(|n| *n == self.tree.highlighted());

        let items: Vec<ListItem> =
            self.rows().into_iter().map(|(text, style)| ListItem::new(text).style(style)).collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent))
            .title(" kubetree ")
            .title_style(Style::default().fg(t.accent).bold());

        let list = List::new(items).block(block).highlight_style(t.selection.add_modifier(Modifier::BOLD));
        let mut list_state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
