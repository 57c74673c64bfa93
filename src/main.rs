use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use herald::config::Config;
use herald::dispatch::{DispatchChain, DispatchCtx, KeyHandler};
use herald::event::{AppEvent, EventPump};
use herald::gamedata::GameData;
use herald::input::{Key, KeyInput};
use herald::overlays::trade_routes::{RouteDetailSource, TradeSource};
use herald::overlays::{
    ROUTE_DETAIL_PANEL, build_menu_panel, encyclopedia_panel, route_detail_panel,
    trade_routes_panel,
};
use herald::overlays::build_menu::BuildMenuSource;
use herald::overlays::encyclopedia::EncyclopediaSource;
use herald::panel::{ListPanel, PanelView};
use herald::speech::{Announcer, CaptionFeed};
use herald::ui::caption::CaptionArea;
use herald::ui::panel_view::PanelArea;

#[derive(Parser)]
#[command(
    name = "herald",
    version,
    about = "Caption simulator for the spoken menu-navigation engine"
)]
struct Cli {
    #[arg(short, long, help = "Embedded data set to load")]
    data: Option<String>,

    #[arg(long, help = "Drop the 'n of m' position suffix from announcements")]
    no_positions: bool,

    #[arg(long, help = "List embedded data sets and exit")]
    list_data: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OverlayId {
    Trade,
    Encyclopedia,
    Build,
}

/// Highest-priority handler: overlay hotkeys and quit, active regardless of
/// what is open.
struct GlobalHotkeys {
    open_request: Rc<Cell<Option<OverlayId>>>,
    quit: Rc<Cell<bool>>,
}

impl KeyHandler for GlobalHotkeys {
    fn is_active(&self) -> bool {
        true
    }

    fn process_key(&mut self, input: KeyInput, _ctx: &mut DispatchCtx<'_>) -> bool {
        if !input.modifiers.control {
            return false;
        }
        match input.key {
            Key::Char('c') | Key::Char('q') => {
                self.quit.set(true);
                true
            }
            Key::Char('t') => {
                self.open_request.set(Some(OverlayId::Trade));
                true
            }
            Key::Char('e') => {
                self.open_request.set(Some(OverlayId::Encyclopedia));
                true
            }
            Key::Char('b') => {
                self.open_request.set(Some(OverlayId::Build));
                true
            }
            _ => false,
        }
    }
}

/// Catch-all at the end of the chain: letters pressed with no overlay open
/// get a spoken hint instead of silence.
struct HintFallback {
    overlay_open: Rc<Cell<bool>>,
}

impl KeyHandler for HintFallback {
    fn is_active(&self) -> bool {
        !self.overlay_open.get()
    }

    fn process_key(&mut self, input: KeyInput, ctx: &mut DispatchCtx<'_>) -> bool {
        match input.key {
            Key::Char(_) | Key::Up | Key::Down | Key::Left | Key::Right | Key::Enter => {
                ctx.announcer.speak(&herald::hint_line());
                true
            }
            _ => false,
        }
    }
}

struct DemoApp {
    chain: DispatchChain,
    captions: CaptionFeed,
    trade: Rc<RefCell<ListPanel<TradeSource>>>,
    route_detail: Rc<RefCell<ListPanel<RouteDetailSource>>>,
    encyclopedia: Rc<RefCell<ListPanel<EncyclopediaSource>>>,
    build: Rc<RefCell<ListPanel<BuildMenuSource>>>,
    open_request: Rc<Cell<Option<OverlayId>>>,
    overlay_open: Rc<Cell<bool>>,
    quit: Rc<Cell<bool>>,
}

impl DemoApp {
    fn new(config: &Config, data: GameData) -> Self {
        let data = Rc::new(RefCell::new(data));
        let selected_route = Rc::new(Cell::new(0));
        let positions = config.announce_positions;

        let trade = Rc::new(RefCell::new(trade_routes_panel(
            &data,
            &selected_route,
            positions,
        )));
        let route_detail = Rc::new(RefCell::new(route_detail_panel(
            &data,
            &selected_route,
            positions,
        )));
        let encyclopedia = Rc::new(RefCell::new(encyclopedia_panel(&data, positions)));
        let build = Rc::new(RefCell::new(build_menu_panel(
            &data,
            config.cross_category_build,
            positions,
        )));

        let open_request = Rc::new(Cell::new(None));
        let overlay_open = Rc::new(Cell::new(false));
        let quit = Rc::new(Cell::new(false));

        let mut chain = DispatchChain::new();
        chain.register_global(GlobalHotkeys {
            open_request: Rc::clone(&open_request),
            quit: Rc::clone(&quit),
        });
        // Sub-panels before the overlays that spawn them; suspended parents
        // report inactive, so dispatch order only matters for mistakes.
        chain.register_overlay(Rc::clone(&route_detail));
        chain.register_overlay(Rc::clone(&trade));
        chain.register_overlay(Rc::clone(&encyclopedia));
        chain.register_overlay(Rc::clone(&build));
        chain.register_fallback(HintFallback {
            overlay_open: Rc::clone(&overlay_open),
        });

        Self {
            chain,
            captions: CaptionFeed::new(config.caption_history),
            trade,
            route_detail,
            encyclopedia,
            build,
            open_request,
            overlay_open,
            quit,
        }
    }

    fn handle_input(&mut self, input: KeyInput) {
        self.chain.dispatch(input, &mut self.captions);

        if let Some(id) = self.open_request.take() {
            self.open_overlay(id);
        }
        if let Some(request) = self.trade.borrow_mut().take_sub_request() {
            if request == ROUTE_DETAIL_PANEL {
                self.route_detail.borrow_mut().open(&mut self.captions);
            }
        }

        // Host-default cancel: one Escape closes the topmost layer unless a
        // handler latched the blocker for its own use of the key.
        if input.key == Key::Escape && !self.chain.take_input_block() {
            self.close_topmost();
        }

        self.overlay_open.set(self.any_overlay_open());
    }

    fn open_overlay(&mut self, id: OverlayId) {
        self.route_detail.borrow_mut().close();
        self.trade.borrow_mut().close();
        self.encyclopedia.borrow_mut().close();
        self.build.borrow_mut().close();
        match id {
            OverlayId::Trade => self.trade.borrow_mut().open(&mut self.captions),
            OverlayId::Encyclopedia => self.encyclopedia.borrow_mut().open(&mut self.captions),
            OverlayId::Build => self.build.borrow_mut().open(&mut self.captions),
        }
    }

    fn close_topmost(&mut self) {
        if self.route_detail.borrow().is_open() {
            self.route_detail.borrow_mut().close();
            self.trade.borrow_mut().resume(&mut self.captions);
        } else if self.any_overlay_open() {
            self.trade.borrow_mut().close();
            self.encyclopedia.borrow_mut().close();
            self.build.borrow_mut().close();
            self.captions.speak(&herald::overlay_closed_line());
        } else {
            self.quit.set(true);
        }
    }

    fn any_overlay_open(&self) -> bool {
        self.route_detail.borrow().is_open()
            || self.trade.borrow().is_open()
            || self.encyclopedia.borrow().is_open()
            || self.build.borrow().is_open()
    }

    fn active_view(&self) -> Option<PanelView> {
        // Topmost active layer first; suspended parents render nothing.
        self.panel_view(&self.route_detail)
            .or_else(|| self.panel_view(&self.trade))
            .or_else(|| self.panel_view(&self.encyclopedia))
            .or_else(|| self.panel_view(&self.build))
    }

    fn panel_view<S: herald::panel::PanelSource>(
        &self,
        panel: &Rc<RefCell<ListPanel<S>>>,
    ) -> Option<PanelView> {
        let panel = panel.borrow();
        if panel.is_open() && !panel.is_suspended() {
            Some(panel.view())
        } else {
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_data {
        for set in GameData::available_sets() {
            println!("{set}");
        }
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_default();
    if let Some(data_set) = cli.data {
        config.data_set = data_set;
    }
    if cli.no_positions {
        config.announce_positions = false;
    }

    let data = GameData::load_or_empty(&config.data_set);
    let mut app = DemoApp::new(&config, data);
    app.captions.speak(&herald::hint_line());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventPump::new(Duration::from_millis(100));
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DemoApp,
    events: &EventPump,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Input(input) => app.handle_input(input),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.quit.get() {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &DemoApp) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(CaptionArea::new(&app.captions), layout[0]);

    if let Some(view) = app.active_view() {
        frame.render_widget(PanelArea::new(&view), layout[1]);
    } else {
        let idle = Paragraph::new(Line::from(Span::styled(
            "  No overlay open.",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(idle, layout[1]);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Ctrl+T] Trade  [Ctrl+E] Encyclopedia  [Ctrl+B] Build  [Esc] Close  [Ctrl+Q] Quit ",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, layout[2]);
}
