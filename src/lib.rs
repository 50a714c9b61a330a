// Module declarations shared by the binary and the integration tests

pub mod xsp_board; // board model: cells, mine placement, flood-fill reveal
pub mod xsp_color; // terminal color capability handling
pub mod xsp_config; // settings persistence and validation
pub mod xsp_lang; // localized UI strings
pub mod xsp_session; // game session state machine and timer
pub mod xsp_ui; // terminal UI rendering and event handling
