use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{field, Instrument};

use oauth_app_core::{RouteTable, DEFAULT_PATH_PREFIX};
use oauth_app_observability::Metrics;
use oauth_app_ports::DynOAuthApp;

use crate::{handlers, request::ParsedRequest};

const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Serves the OAuth App routes and forwards everything else to the wrapped service.
///
/// ```ignore
/// App::new()
///     .wrap(OAuthAppMiddleware::new(app).with_path_prefix("/api/github/oauth"))
///     .default_service(web::to(oauth_app_actix::unknown_route))
/// ```
#[derive(Clone)]
pub struct OAuthAppMiddleware {
    app: DynOAuthApp,
    routes: RouteTable,
    max_body_bytes: usize,
    metrics: Option<Metrics>,
}

impl OAuthAppMiddleware {
    pub fn new(app: DynOAuthApp) -> Self {
        Self {
            app,
            routes: RouteTable::new(DEFAULT_PATH_PREFIX),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            metrics: None,
        }
    }

    pub fn with_path_prefix(mut self, path_prefix: &str) -> Self {
        self.routes = RouteTable::new(path_prefix);
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

impl<S, B> Transform<S, ServiceRequest> for OAuthAppMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OAuthAppMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OAuthAppMiddlewareService {
            service: Rc::new(service),
            state: Rc::new(self.clone()),
        }))
    }
}

pub struct OAuthAppMiddlewareService<S> {
    service: Rc<S>,
    state: Rc<OAuthAppMiddleware>,
}

impl<S, B> Service<ServiceRequest> for OAuthAppMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let matched = self
            .state
            .routes
            .match_request(req.method().as_str(), req.path());

        let Some(route) = matched else {
            if let Some(metrics) = &self.state.metrics {
                metrics.unhandled_requests_total.inc();
            }
            tracing::debug!(
                method = %req.method(),
                path = %req.path(),
                "no oauth app route matched; forwarding"
            );

            let fut = self.service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res.map_into_left_body())
            });
        };

        let state = self.state.clone();

        Box::pin(async move {
            let start = Instant::now();
            let method = req.method().as_str().to_string();
            let (http_req, mut payload) = req.into_parts();

            let span = tracing::info_span!(
                "oauth_app_route",
                route = %route,
                method = %method,
                status = field::Empty
            );

            let response = async {
                let parsed =
                    ParsedRequest::parse(route, &http_req, &mut payload, state.max_body_bytes)
                        .await;
                let result = match parsed {
                    Ok(parsed) => handlers::handle(route, state.app.as_ref(), parsed).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(resp) => resp,
                    Err(err) => {
                        tracing::info!(error = %err, "oauth app route failed");
                        err.error_response()
                    }
                }
            }
            .instrument(span.clone())
            .await;

            let status = response.status().as_u16();
            span.record("status", status);

            if let Some(metrics) = &state.metrics {
                metrics.observe_route(
                    &method,
                    route.name(),
                    status,
                    start.elapsed().as_secs_f64(),
                );
            }

            Ok(ServiceResponse::new(http_req, response).map_into_right_body())
        })
    }
}
