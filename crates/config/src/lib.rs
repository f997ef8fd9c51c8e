// Configuration loading

mod settings;

pub use settings::{
    resolve_token, Settings, SettingsError, LEGISTAR_TOKEN_ENV, SHEETS_TOKEN_ENV,
};
