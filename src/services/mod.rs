// pwcheck services
// Services talk to the outside world: the strength service, the clipboard and the settings file.

pub mod clipboard;
pub mod settings_engine;
pub mod strength_client;
