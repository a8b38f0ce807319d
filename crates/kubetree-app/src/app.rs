use std::path::Path;
use std::time::Duration;

use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::prelude::*;
use ratatui::Terminal;

use kubetree_config::AppConfig;
use kubetree_core::{NamespaceLister, NodeRef, SelectionTree, SessionOutcome};
use kubetree_tui::widgets::{ContextTreeWidget, StatusBarWidget};
use kubetree_tui::Theme;

use crate::app_log;
use crate::command::Command;
use crate::event::{AppEvent, EventHandler};
use crate::keybindings::KeybindingDispatcher;

/// Interactive session over one `SelectionTree`. Ends when the user quits or
/// picks a namespace; persisting the pick is left to the caller.
pub struct App<L> {
    tree: SelectionTree,
    lister: L,
    theme: Theme,
    dispatcher: KeybindingDispatcher,
    hints: Vec<(String, String)>,
    kubeconfig: String,
    tick_rate: Duration,
}

impl<L: NamespaceLister> App<L> {
    pub fn new(tree: SelectionTree, lister: L, config: &AppConfig, kubeconfig: &Path) -> Self {
        let dispatcher = KeybindingDispatcher::from_config(&config.keybindings);
        let hints = dispatcher.hints();
        Self {
            tree,
            lister,
            theme: Theme::from_config(&config.theme),
            dispatcher,
            hints,
            kubeconfig: kubeconfig.display().to_string(),
            tick_rate: config.tick_rate(),
        }
    }

    pub fn tree(&self) -> &SelectionTree {
        &self.tree
    }

    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<SessionOutcome> {
        let mut events = EventHandler::new(self.tick_rate);

        loop {
            self.draw(terminal)?;

            let outcome = match events.next().await? {
                AppEvent::Key(key) => self.handle_key(key, terminal).await?,
                AppEvent::Tick | AppEvent::Resize => SessionOutcome::Continue,
            };
            if outcome != SessionOutcome::Continue {
                return Ok(outcome);
            }
        }
    }

    fn draw(&self, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<()> {
        let message = app_log::latest();
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            ContextTreeWidget { tree: &self.tree, theme: &self.theme }.render(frame, chunks[0]);
            StatusBarWidget {
                hints: &self.hints,
                kubeconfig: &self.kubeconfig,
                message: message.as_deref(),
                theme: &self.theme,
            }
            .render(frame, chunks[1]);
        })?;
        Ok(())
    }

    async fn handle_key(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<impl Backend>,
    ) -> anyhow::Result<SessionOutcome> {
        if key.kind != KeyEventKind::Press {
            return Ok(SessionOutcome::Continue);
        }
        match self.dispatcher.dispatch(key) {
            Some(cmd) => self.handle_command(cmd, terminal).await,
            None => Ok(SessionOutcome::Continue),
        }
    }

    pub async fn handle_command(
        &mut self,
        cmd: Command,
        terminal: &mut Terminal<impl Backend>,
    ) -> anyhow::Result<SessionOutcome> {
        match cmd {
            Command::Quit => return Ok(SessionOutcome::Quit),
            Command::Up => self.tree.move_up(),
            Command::Down => self.tree.move_down(),
            Command::Top => self.tree.move_to_top(),
            Command::Bottom => self.tree.move_to_bottom(),
            Command::Collapse => self.tree.collapse_expanded(),
            Command::Toggle => {
                if let NodeRef::Context(idx) = self.tree.highlighted() {
                    self.expand(idx, terminal).await?;
                }
            }
            Command::Activate => match self.tree.highlighted() {
                NodeRef::Context(idx) => self.expand(idx, terminal).await?,
                node => return Ok(self.tree.select(node)),
            },
        }
        Ok(SessionOutcome::Continue)
    }

    // Redraws between the two halves so the "loading" label is visible while
    // the fetch blocks the loop.
    async fn expand(&mut self, idx: usize, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<()> {
        if let Some(context) = self.tree.begin_expand(idx) {
            self.draw(terminal)?;
            let result = self.lister.list(&context).await;
            self.tree.finish_expand(idx, result);
        }
        Ok(())
    }
}
