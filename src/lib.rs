//! HTTP middleware that exposes an OAuth App over a fixed set of routes.
//!
//! The collaborator (anything implementing [`OAuthApp`]) does the OAuth work;
//! this crate wires it into actix-web, wraps it with tracing and lifecycle
//! events, and reads settings from [`Config`].

use actix::Actor;
use std::sync::Arc;

pub use oauth_app_actix::{unknown_route, OAuthAppMiddleware};
pub use oauth_app_config::Config;
pub use oauth_app_core::{
    AuthorizationUrlOptions, CreateTokenOptions, OAuthAppError, Route, RouteTable,
    TokenAuthentication, TokenInfo,
};
pub use oauth_app_events::{
    CallbackPlugin, EventFilter, EventPlugin, EventType, InMemoryEventLogger, OAuthEvent,
    TracingEventLogger,
};
pub use oauth_app_observability::{encode_prometheus_text, init_telemetry, Metrics};
pub use oauth_app_ports::{DynOAuthApp, OAuthApp};

use oauth_app_events::{event_actor::EventActor, ActixEventBus, EmittingApp, EventBusHandle};
use oauth_app_observability::ObservedApp;

/// Assembles an [`OAuthAppMiddleware`] from a collaborator and a [`Config`].
///
/// The collaborator is wrapped with [`ObservedApp`] (tracing) and, when events
/// are enabled, with [`EmittingApp`] publishing to an [`EventActor`].
/// `build` starts that actor, so with events enabled it must run inside an
/// actix system and returns an error otherwise.
pub struct MiddlewareBuilder {
    app: DynOAuthApp,
    config: Config,
    plugins: Vec<Arc<dyn EventPlugin>>,
    metrics: Option<Metrics>,
}

impl MiddlewareBuilder {
    pub fn new(app: DynOAuthApp) -> Self {
        Self {
            app,
            config: Config::default(),
            plugins: Vec::new(),
            metrics: None,
        }
    }

    /// Like [`MiddlewareBuilder::new`], with settings from `application.conf` or the environment.
    pub fn from_env(app: DynOAuthApp) -> Self {
        Self::new(app).with_config(Config::load())
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn EventPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> Result<OAuthAppMiddleware, String> {
        self.config.validate()?;

        let mut app: DynOAuthApp = Arc::new(ObservedApp::new(self.app));

        if self.config.events.enabled {
            if actix::System::try_current().is_none() {
                return Err(
                    "events are enabled but no actix system is running; \
                     build inside `#[actix_web::main]` or disable events"
                        .to_string(),
                );
            }

            let filter = EventFilter::from_config(
                &self.config.events.filter_mode,
                &self.config.events.event_types,
            )?;

            let mut plugins: Vec<Arc<dyn EventPlugin>> = vec![Arc::new(TracingEventLogger)];
            plugins.extend(self.plugins);

            let actor = EventActor::new(plugins, filter).start();
            let bus = EventBusHandle::new(Arc::new(ActixEventBus::new(actor)));
            app = Arc::new(EmittingApp::new(app, bus));
        } else if !self.plugins.is_empty() {
            tracing::warn!(
                plugins = self.plugins.len(),
                "events are disabled; registered event plugins will not be called"
            );
        }

        let mut middleware = OAuthAppMiddleware::new(app)
            .with_path_prefix(&self.config.middleware.path_prefix)
            .with_max_body_bytes(self.config.middleware.max_body_bytes);

        if let Some(metrics) = self.metrics {
            middleware = middleware.with_metrics(metrics);
        }

        tracing::info!(
            path_prefix = %self.config.middleware.path_prefix,
            events_enabled = self.config.events.enabled,
            "oauth app middleware assembled"
        );

        Ok(middleware)
    }
}
