// Library root
// -----------
// The binary (`main.rs`) wires these modules together; keeping them in a
// library lets the tests drive each piece without a terminal.
//
// Module responsibilities:
// - `api`: operator data shapes, the blocking HTTP client and the
//   cache-aware loader.
// - `cache`: time-bounded on-disk copy of the operator download.
// - `config`: settings read from environment variables.
// - `logging`: tracing subscriber setup.
// - `menu`: cursor/key state machine and text rendering.
// - `state`: player/operator assignments and the whole app model.
// - `ui`: raw-mode terminal loop and the startup spinner.
pub mod api;
pub mod cache;
pub mod config;
pub mod logging;
pub mod menu;
pub mod state;
pub mod ui;
