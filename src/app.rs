use leptos::*;

use crate::{
    application::DashboardCoordinator,
    domain::{
        logging::{LogComponent, get_logger},
        market_data::{Market, MoversResponse, UpcomingEarningsResponse},
        state::{AppState, HomeState, ListState, MoversQuery, Page, SettingsForm, SettingsStore, UpcomingQuery},
    },
    i18n::{Lang, t},
    infrastructure::{ApiClient, ApiConfig},
    presentation::{HomePage, MoversPage, SettingsPage, UpcomingPage},
};

pub type Coordinator = DashboardCoordinator<ApiClient>;

/// Reactive handles shared by every page through Leptos context.
///
/// All fields are `Copy` signals, so the context itself is `Copy` and can be
/// moved into event handlers and `spawn_local` futures freely.
#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub app: RwSignal<AppState>,
    pub home: RwSignal<HomeState>,
    pub settings: RwSignal<SettingsStore>,
    pub movers: RwSignal<ListState<MoversResponse>>,
    pub upcoming: RwSignal<ListState<UpcomingEarningsResponse>>,
    pub lang: Memo<Lang>,
    coordinator: StoredValue<Coordinator>,
}

impl DashboardContext {
    pub fn new(coordinator: Coordinator) -> Self {
        let settings = create_rw_signal(SettingsStore::default());
        Self {
            app: create_rw_signal(AppState::default()),
            home: create_rw_signal(HomeState::default()),
            settings,
            movers: create_rw_signal(ListState::default()),
            upcoming: create_rw_signal(ListState::default()),
            lang: create_memo(move |_| settings.with(|store| store.lang())),
            coordinator: store_value(coordinator),
        }
    }

    /// Reactive translation of `key` in the current language.
    pub fn tr(self, key: &'static str) -> impl Fn() -> &'static str + Copy {
        move || t(self.lang.get(), key)
    }

    pub fn navigate(self, page: Page) {
        self.app.update(|app| *app = app.navigate(page));
    }

    pub fn search(self) {
        let (next, ticket) = self.home.get_untracked().begin_search();
        self.home.set(next);
        let Some(ticket) = ticket else {
            return;
        };
        let coordinator = self.coordinator.get_value();
        spawn_local(async move {
            let result = coordinator.fetch_search(&ticket).await;
            self.home
                .update(|home| *home = Coordinator::finish_search(std::mem::take(home), ticket.seq, result));
        });
    }

    pub fn analyze(self) {
        let (next, ticket) = self.home.get_untracked().begin_analysis();
        self.home.set(next);
        let Some(ticket) = ticket else {
            return;
        };
        let lang = self.lang.get_untracked();
        let coordinator = self.coordinator.get_value();
        spawn_local(async move {
            let result = coordinator.fetch_analysis(&ticket, lang).await;
            self.home
                .update(|home| *home = Coordinator::finish_analysis(std::mem::take(home), ticket.seq, result));
        });
    }

    /// Jump from a movers/calendar row to the home page and search it.
    pub fn open_symbol(self, listed_symbol: &str, market: Market) {
        self.home.update(|home| *home = std::mem::take(home).open_symbol(listed_symbol, market));
        self.navigate(Page::Home);
        self.search();
    }

    pub fn init_settings(self) {
        if !self.settings.with_untracked(|store| store.needs_init()) {
            return;
        }
        let coordinator = self.coordinator.get_value();
        spawn_local(async move {
            let result = coordinator.fetch_settings().await;
            self.settings
                .update(|store| *store = Coordinator::finish_init_settings(std::mem::take(store), result));
        });
    }

    pub fn save_settings(self, form: SettingsForm) {
        self.settings.update(|store| *store = std::mem::take(store).begin_save());
        let coordinator = self.coordinator.get_value();
        spawn_local(async move {
            let result = coordinator.fetch_save_settings(&form).await;
            self.settings
                .update(|store| *store = Coordinator::finish_save_settings(std::mem::take(store), result));
        });
    }

    pub fn load_movers(self, query: MoversQuery) {
        let (next, seq) = self.movers.get_untracked().begin();
        self.movers.set(next);
        let coordinator = self.coordinator.get_value();
        spawn_local(async move {
            let result = coordinator.fetch_movers(query).await;
            self.movers
                .update(|list| *list = crate::application::finish_list(std::mem::take(list), seq, result));
        });
    }

    pub fn load_upcoming(self, query: UpcomingQuery) {
        let (next, seq) = self.upcoming.get_untracked().begin();
        self.upcoming.set(next);
        let coordinator = self.coordinator.get_value();
        spawn_local(async move {
            let result = coordinator.fetch_upcoming(query).await;
            self.upcoming
                .update(|list| *list = crate::application::finish_list(std::mem::take(list), seq, result));
        });
    }
}

/// Context provided by [`App`]; every page component runs inside it.
pub fn use_dashboard() -> DashboardContext {
    expect_context::<DashboardContext>()
}

/// 📈 Dashboard shell: header navigation, current page, footer
#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::default();
    get_logger().info(
        LogComponent::Presentation("App"),
        &format!("🚀 Dashboard starting against {}", config.base_url),
    );
    let ctx = DashboardContext::new(Coordinator::new(ApiClient::new(config.clone()), config.history_days));
    provide_context(ctx);
    ctx.init_settings();

    let nav_button = move |page: Page| {
        view! {
            <button
                class=move || if ctx.app.with(|app| app.page == page) { "nav-btn active" } else { "nav-btn" }
                on:click=move |_| ctx.navigate(page)
            >
                {ctx.tr(page.label_key())}
            </button>
        }
    };

    view! {
        <style>{STYLES}</style>
        <div class="dashboard">
            <header class="header">
                <h1>"Stock MCPilot"</h1>
                <nav>
                    {nav_button(Page::Home)}
                    {nav_button(Page::Movers)}
                    {nav_button(Page::Upcoming)}
                    {nav_button(Page::Settings)}
                </nav>
            </header>
            <main class="content">
                {move || match ctx.app.with(|app| app.page) {
                    Page::Home => view! { <HomePage /> }.into_view(),
                    Page::Movers => view! { <MoversPage /> }.into_view(),
                    Page::Upcoming => view! { <UpcomingPage /> }.into_view(),
                    Page::Settings => view! { <SettingsPage /> }.into_view(),
                }}
            </main>
            <footer class="footer">{ctx.tr("footer.disclaimer")}</footer>
        </div>
    }
}

const STYLES: &str = r#"
.dashboard { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; min-height: 100vh; display: flex; flex-direction: column; background: #f5f6f8; color: #1f2937; }
.header { display: flex; justify-content: space-between; align-items: center; padding: 16px 24px; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,0.08); }
.header h1 { font-size: 18px; font-weight: 600; margin: 0; }
.nav-btn { background: none; border: none; margin-left: 16px; font-size: 14px; color: #4b5563; cursor: pointer; }
.nav-btn.active { color: #2563eb; font-weight: 500; }
.content { flex: 1; width: 100%; max-width: 1080px; margin: 0 auto; padding: 24px; box-sizing: border-box; }
.footer { text-align: center; font-size: 12px; color: #9ca3af; padding: 16px; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 6px; padding: 12px; box-shadow: 0 1px 2px rgba(0,0,0,0.04); }
.row { display: flex; gap: 8px; align-items: center; flex-wrap: wrap; }
.grid { display: grid; grid-template-columns: 2fr 1fr; gap: 16px; margin-top: 16px; }
.stack { display: flex; flex-direction: column; gap: 16px; }
.muted { color: #9ca3af; font-size: 13px; }
.error { color: #e11d48; font-size: 13px; margin-top: 8px; }
.metrics { display: grid; grid-template-columns: repeat(auto-fill, minmax(150px, 1fr)); gap: 12px; }
.metric-label { font-size: 11px; text-transform: uppercase; color: #6b7280; }
.metric-value { font-weight: 600; font-size: 14px; }
.metric-hint { font-size: 11px; color: #9ca3af; }
.tone-pos { color: #059669; }
.tone-neg { color: #e11d48; }
.tone-neutral { color: #1f2937; }
.chart-title { font-size: 12px; color: #6b7280; margin: 0 0 4px; }
.chart-svg { width: 100%; height: auto; display: block; }
.brush-svg { width: 100%; height: 36px; display: block; cursor: ew-resize; user-select: none; }
.tooltip { font-size: 12px; color: #374151; min-height: 16px; }
table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #f3f4f6; }
tr.clickable { cursor: pointer; }
tr.clickable:hover { background: #f9fafb; }
input, select { border: 1px solid #d1d5db; border-radius: 4px; padding: 6px 10px; font-size: 14px; }
button.primary { background: #2563eb; color: #fff; border: none; border-radius: 4px; padding: 7px 16px; cursor: pointer; }
button.primary:disabled { background: #d1d5db; cursor: default; }
button.link { background: none; border: none; color: #2563eb; cursor: pointer; font-size: 12px; }
.analysis { white-space: pre-wrap; line-height: 1.6; font-size: 14px; }
"#;
