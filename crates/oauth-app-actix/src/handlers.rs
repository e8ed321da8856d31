use actix_web::{
    http::header::{self, ContentType, HeaderValue},
    HttpRequest, HttpResponse,
};

use oauth_app_core::{
    split_scopes, AuthorizationUrlOptions, CreateTokenOptions, OAuthAppError, Route,
};
use oauth_app_ports::OAuthApp;

use crate::request::ParsedRequest;

/// Dispatch a matched route to the collaborator.
pub async fn handle(
    route: Route,
    app: &dyn OAuthApp,
    request: ParsedRequest,
) -> Result<HttpResponse, OAuthAppError> {
    match route {
        Route::GetLogin => get_login(app, &request),
        Route::GetCallback => get_callback(app, &request).await,
        Route::CreateToken => create_token(app, &request).await,
        Route::GetToken => {
            let token = require_token(&request)?;
            let info = app.check_token(token).await?;
            Ok(no_store_headers(HttpResponse::Ok().json(info)))
        }
        Route::PatchToken => {
            let token = require_token(&request)?;
            let info = app.reset_token(token).await?;
            Ok(no_store_headers(HttpResponse::Ok().json(info)))
        }
        Route::DeleteToken => {
            let token = require_token(&request)?;
            app.delete_token(token).await?;
            Ok(HttpResponse::NoContent().finish())
        }
        Route::DeleteGrant => {
            let token = require_token(&request)?;
            app.delete_authorization(token).await?;
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

/// Fallback for apps with nothing else behind the middleware.
pub async fn unknown_route(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": format!("Unknown route: {} {}", req.method(), req.path())
    }))
}

fn get_login(app: &dyn OAuthApp, request: &ParsedRequest) -> Result<HttpResponse, OAuthAppError> {
    let allow_signup = match request.query_param("allowSignup") {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => return Err(OAuthAppError::invalid_allow_signup()),
    };

    let options = AuthorizationUrlOptions {
        state: request.query_param("state").map(str::to_string),
        scopes: request.query.get("scopes").map(|raw| split_scopes(raw)),
        allow_signup,
        redirect_url: request.query_param("redirectUrl").map(str::to_string),
    };

    let url = app.get_authorization_url(options)?;
    let location = HeaderValue::try_from(url).map_err(|err| {
        tracing::warn!(error = %err, "authorization URL is not a valid header value");
        OAuthAppError::invalid_authorization_url()
    })?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish())
}

async fn get_callback(
    app: &dyn OAuthApp,
    request: &ParsedRequest,
) -> Result<HttpResponse, OAuthAppError> {
    if let Some(error) = request.query_param("error") {
        return Err(OAuthAppError::callback_error(
            error,
            request.query_param("error_description"),
        ));
    }

    let (Some(state), Some(code)) = (request.query_param("state"), request.query_param("code"))
    else {
        return Err(OAuthAppError::missing_code_or_state());
    };

    let auth = app
        .create_token(CreateTokenOptions::new(state, code))
        .await?;

    Ok(no_store_headers(
        HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(token_created_page(&auth.token)),
    ))
}

async fn create_token(
    app: &dyn OAuthApp,
    request: &ParsedRequest,
) -> Result<HttpResponse, OAuthAppError> {
    let (Some(state), Some(code)) = (request.body_str("state"), request.body_str("code")) else {
        return Err(OAuthAppError::missing_code_or_state());
    };

    let mut options = CreateTokenOptions::new(state, code);
    if let Some(redirect_url) = request.body_str("redirectUrl") {
        options = options.with_redirect_url(redirect_url);
    }

    let auth = app.create_token(options).await?;

    Ok(no_store_headers(HttpResponse::Created().json(auth)))
}

fn require_token(request: &ParsedRequest) -> Result<&str, OAuthAppError> {
    request
        .token
        .as_deref()
        .ok_or_else(OAuthAppError::missing_authorization)
}

fn no_store_headers(mut resp: HttpResponse) -> HttpResponse {
    resp.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    resp.headers_mut()
        .insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    resp
}

fn token_created_page(token: &str) -> String {
    format!(
        "<h1>Token created successfully</h1>\n\n<p>Your token is: <strong>{}</strong>. \
         Copy it now as it cannot be shown again.</p>",
        escape_html(token)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
