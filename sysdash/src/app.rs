//! App shell: terminal setup/teardown, quit keys, and the ratatui renderer the
//! scheduler draws through.

use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use crate::fetch::HttpFetcher;
use crate::scheduler::{CancelHandle, CycleStats, IntervalTrigger, Render, Scheduler};
use crate::ui::draw_dashboard;
use crate::widgets::Dashboard;

/// Draws the whole dashboard on every render call.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Render for TerminalRenderer<B> {
    fn render(&mut self, dashboard: &Dashboard) -> io::Result<()> {
        self.terminal.draw(|f| draw_dashboard(f, dashboard))?;
        Ok(())
    }
}

pub fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind == KeyEventKind::Release {
        return false;
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        // raw mode swallows SIGINT, so Ctrl-C arrives as a key
        KeyCode::Char('c') => k.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub struct App {
    url: String,
    period: Duration,
}

impl App {
    pub fn new(url: impl Into<String>, period: Duration) -> Self {
        Self {
            url: url.into(),
            period,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let fetcher = HttpFetcher::new(&self.url)?;
        info!(url = %fetcher.url(), period_ms = self.period.as_millis() as u64, "starting dashboard");

        // Terminal setup; the guard restores the terminal on every exit path
        enable_raw_mode()?;
        let _guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let mut renderer = TerminalRenderer::new(terminal);
        let stats = self.event_loop(&mut renderer, fetcher).await?;
        info!(
            cycles = stats.cycles,
            failed = stats.failed,
            "dashboard closed"
        );
        Ok(())
    }

    async fn event_loop<B: Backend>(
        &mut self,
        renderer: &mut TerminalRenderer<B>,
        fetcher: HttpFetcher,
    ) -> anyhow::Result<CycleStats> {
        let (mut scheduler, cancel) = Scheduler::new(fetcher, IntervalTrigger::new(self.period));
        let mut dashboard = Dashboard::new();

        // First frame before the first fetch resolves
        renderer.render(&dashboard)?;

        let stop_input = Arc::new(AtomicBool::new(false));
        let input = spawn_input_watcher(cancel.clone(), stop_input.clone());
        let ctrl_c = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            })
        };

        let res = scheduler.run(&mut dashboard, renderer).await;

        stop_input.store(true, Ordering::Relaxed);
        ctrl_c.abort();
        if input.join().is_err() {
            warn!("input watcher panicked");
        }
        Ok(res?)
    }
}

/// Leaves raw mode and the alternate screen when dropped.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("could not leave raw mode: {e}");
        }
        if let Err(e) = restore_screen(&mut io::stdout()) {
            warn!("could not restore the screen: {e}");
        }
    }
}

fn restore_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

// Input runs on its own thread since crossterm's poll blocks
fn spawn_input_watcher(cancel: CancelHandle, stop: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) && !cancel.is_cancelled() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(k)) if is_quit_key(&k) => {
                        cancel.cancel();
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("terminal input failed: {e}");
                        cancel.cancel();
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("terminal input failed: {e}");
                    cancel.cancel();
                    break;
                }
            }
        }
    })
}
