//! Command execution context
//!
//! Builds everything a command needs from the global options: config,
//! persisted session, API client, notifications, theme and the route
//! controller.

use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{Gateway, RequestScope, SkillBridgeClient};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventBus;
use crate::notifications::NotificationCenter;
use crate::output::{self, Formattable};
use crate::routes::RouteController;
use crate::session::{FileStore, KeyValueStore, SessionStore};
use crate::theme::{Palette, ThemePreference, terminal_prefers_dark};
use crate::views::ViewEnv;

/// Context for command execution.
pub struct CommandContext {
    /// Loaded configuration with overrides applied
    pub config: Config,
    /// Persisted session (token and cached profile)
    pub session: SessionStore,
    /// API client, shared with views
    pub client: Arc<SkillBridgeClient>,
    /// Local notifications
    pub notifications: Arc<NotificationCenter>,
    /// Dark/light preference
    pub theme: ThemePreference,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, open the storage file and build the client.
    ///
    /// Nothing here talks to the network.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = opts.load_config()?;
        let format = opts.resolve_format(&config);

        let storage_path = config.storage_path()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&storage_path)?);
        let session = SessionStore::new(Arc::clone(&store));
        let events = EventBus::new();

        let gateway = Gateway::new(
            &config.api_url(),
            config.request_timeout(),
            session.clone(),
            events.clone(),
        )?;
        let client = Arc::new(SkillBridgeClient::new(gateway, session.clone(), events.clone()));
        let notifications = Arc::new(NotificationCenter::load(Arc::clone(&store), events));

        let system_dark = config
            .prefers_dark
            .or_else(|| terminal_prefers_dark(std::env::var("COLORFGBG").ok().as_deref()))
            .unwrap_or(false);
        let theme = ThemePreference::load(store, system_dark);

        log::debug!(
            "Context ready: api={} storage={}",
            config.api_url(),
            storage_path.display()
        );

        Ok(Self {
            config,
            session,
            client,
            notifications,
            theme,
            format,
        })
    }

    /// Services handed to views
    pub fn view_env(&self) -> ViewEnv {
        ViewEnv::new(Arc::clone(&self.client), Arc::clone(&self.notifications))
    }

    pub fn controller(&self) -> RouteController {
        RouteController::new(self.session.clone())
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// A scope for one command's calls
    pub fn scope(&self) -> RequestScope {
        RequestScope::new()
    }

    /// Render `data` in the resolved format
    pub fn print<T: Formattable + ?Sized>(&self, data: &T) -> Result<()> {
        output::print(data, self.format, &self.palette())
    }
}
