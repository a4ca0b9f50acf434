// Library root
// -----------
// The `rise` binary (`main.rs`) parses the command line and dispatches to
// `commands`. Everything else lives here so it can be tested without a
// terminal.
//
// Module responsibilities:
// - `api`: HTTP calls to the rise API and the mapping of its error
//   responses to `error::ErrorKind`.
// - `commands`: one handler per CLI command.
// - `ui`: the output sink and prompt source handed to commands.
// - `config`, `credentials`: settings, `rise.json` and token persistence.
// - `bundle`: packing a site directory for deployment.
pub mod api;
pub mod bundle;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod ui;
