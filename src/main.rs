// Entrypoint for the picker.
// - Keeps `main` small: read config, load operators, hand over to the UI loop.
// - Any startup failure is logged and ends the process with status 1 before
//   anything is drawn.

use siege_picker::api::{load_operators, ApiClient};
use siege_picker::cache::OperatorCache;
use siege_picker::config::Config;
use siege_picker::menu::MenuState;
use siege_picker::state::AppState;
use siege_picker::{logging, ui};
use tracing::{error, info};

fn run() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    let api = ApiClient::from_config(&cfg)?;
    let cache = OperatorCache::from_config(&cfg);

    let loaded = ui::with_spinner("Fetching operators...", || load_operators(&api, cache.as_ref()))?;
    // logged only once the spinner has cleared stderr
    info!(count = loaded.operators.len(), source = %loaded.source, "operators loaded");

    let menu = MenuState::default().with_navigation(cfg.navigation);
    let mut app = AppState::new(loaded.operators, menu);
    info!(navigation = %cfg.navigation, "starting menu");
    ui::run_menu(&mut app)
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}
