#[macro_use]
mod common;

use actix_web::{http::header, test};
use std::sync::{Arc, Mutex};

use common::MockApp;
use oauth_app_middleware::{
    CallbackPlugin, Config, DynOAuthApp, EventType, InMemoryEventLogger, MiddlewareBuilder,
};

fn builder(mock: &Arc<MockApp>, logger: &Arc<InMemoryEventLogger>) -> MiddlewareBuilder {
    let app: DynOAuthApp = mock.clone();
    MiddlewareBuilder::new(app).with_plugin(logger.clone())
}

fn event_types(logger: &InMemoryEventLogger) -> Vec<EventType> {
    logger.get_events().iter().map(|e| e.event_type).collect()
}

fn delete_with_token(uri: &str) -> test::TestRequest {
    test::TestRequest::delete()
        .uri(uri)
        .insert_header((header::AUTHORIZATION, "token token123"))
}

#[actix_web::test]
async fn create_token_emits_token_created() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let app = init_app!(builder(&mock, &logger).build().unwrap());

    let req = test::TestRequest::post()
        .uri("/api/github/oauth/token")
        .set_payload(r#"{"code":"012345","state":"state123"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let events = logger.get_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::TokenCreated);
    assert_eq!(events[0].token, "token123");
    assert_eq!(events[0].name(), "token");
    assert_eq!(events[0].action(), "created");
}

#[actix_web::test]
async fn callback_emits_token_created_for_listeners() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    let plugin = CallbackPlugin::on([EventType::TokenCreated], move |event| {
        sink.lock()
            .unwrap()
            .push((event.token.clone(), event.scopes.clone()));
    });

    let app = init_app!(builder(&mock, &logger)
        .with_plugin(Arc::new(plugin))
        .build()
        .unwrap());

    let req = test::TestRequest::get()
        .uri("/api/github/oauth/callback?code=012345&state=state123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    assert_eq!(event_types(&logger), vec![EventType::TokenCreated]);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("token123".to_string(), Vec::<String>::new())]
    );
}

#[actix_web::test]
async fn reset_token_emits_new_token_and_scopes() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let app = init_app!(builder(&mock, &logger).build().unwrap());

    let req = test::TestRequest::patch()
        .uri("/api/github/oauth/token")
        .insert_header((header::AUTHORIZATION, "token token123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let events = logger.get_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::TokenReset);
    assert_eq!(events[0].token, "token456");
    assert_eq!(events[0].scopes, vec!["repo".to_string()]);
}

#[actix_web::test]
async fn check_token_emits_nothing() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let app = init_app!(builder(&mock, &logger).build().unwrap());

    let req = test::TestRequest::get()
        .uri("/api/github/oauth/token")
        .insert_header((header::AUTHORIZATION, "token token123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    assert!(logger.get_events().is_empty());
}

#[actix_web::test]
async fn delete_token_emits_before_deleted_then_deleted() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let app = init_app!(builder(&mock, &logger).build().unwrap());

    let req = delete_with_token("/api/github/oauth/token").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    assert_eq!(
        event_types(&logger),
        vec![EventType::TokenBeforeDeleted, EventType::TokenDeleted]
    );
    assert!(logger.get_events().iter().all(|e| e.token == "token123"));
}

#[actix_web::test]
async fn delete_grant_emits_authorization_events() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let app = init_app!(builder(&mock, &logger).build().unwrap());

    let req = delete_with_token("/api/github/oauth/grant").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    assert_eq!(
        event_types(&logger),
        vec![
            EventType::AuthorizationBeforeDeleted,
            EventType::AuthorizationDeleted
        ]
    );
}

#[actix_web::test]
async fn failed_delete_emits_only_before_deleted() {
    let mock = Arc::new(MockApp::failing("Bad credentials"));
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let app = init_app!(builder(&mock, &logger).build().unwrap());

    let req = delete_with_token("/api/github/oauth/token").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    assert_eq!(event_types(&logger), vec![EventType::TokenBeforeDeleted]);
}

#[actix_web::test]
async fn callback_plugin_sees_only_subscribed_events() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    let plugin = CallbackPlugin::on([EventType::TokenDeleted], move |event| {
        sink.lock().unwrap().push(event.token.clone());
    });

    let app = init_app!(builder(&mock, &logger)
        .with_plugin(Arc::new(plugin))
        .build()
        .unwrap());

    let req = delete_with_token("/api/github/oauth/token").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    assert_eq!(logger.get_events().len(), 2);
    assert_eq!(*seen.lock().unwrap(), vec!["token123".to_string()]);
}

#[actix_web::test]
async fn include_filter_limits_delivered_events() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));

    let mut config = Config::default();
    config.events.filter_mode = "include".to_string();
    config.events.event_types = vec!["token.deleted".to_string()];

    let app = init_app!(builder(&mock, &logger)
        .with_config(config)
        .build()
        .unwrap());

    let req = delete_with_token("/api/github/oauth/token").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    assert_eq!(event_types(&logger), vec![EventType::TokenDeleted]);
}

#[actix_web::test]
async fn disabled_events_are_not_delivered() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));

    let mut config = Config::default();
    config.events.enabled = false;

    let app = init_app!(builder(&mock, &logger)
        .with_config(config)
        .build()
        .unwrap());

    let req = delete_with_token("/api/github/oauth/token").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    assert!(logger.get_events().is_empty());
    assert_eq!(mock.calls().len(), 1);
}

#[actix_web::test]
async fn builder_applies_configured_prefix() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));

    let mut config = Config::default();
    config.middleware.path_prefix = "/oauth".to_string();

    let app = init_app!(builder(&mock, &logger)
        .with_config(config)
        .build()
        .unwrap());

    let req = test::TestRequest::get().uri("/oauth/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
}

#[actix_web::test]
async fn builder_rejects_invalid_config() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));

    let mut config = Config::default();
    config.middleware.path_prefix = "api/github/oauth".to_string();
    assert!(builder(&mock, &logger).with_config(config).build().is_err());

    let mut config = Config::default();
    config.events.filter_mode = "include".to_string();
    config.events.event_types = vec!["token.refreshed".to_string()];
    assert!(builder(&mock, &logger).with_config(config).build().is_err());
}

#[::core::prelude::v1::test]
fn builder_without_actix_system_reports_error() {
    let mock = Arc::new(MockApp::new());
    let logger = Arc::new(InMemoryEventLogger::new(16));

    let err = match builder(&mock, &logger).build() {
        Ok(_) => panic!("build should fail without an actix system"),
        Err(err) => err,
    };
    assert!(err.contains("no actix system"));

    let mut config = Config::default();
    config.events.enabled = false;
    assert!(builder(&mock, &logger).with_config(config).build().is_ok());
}
