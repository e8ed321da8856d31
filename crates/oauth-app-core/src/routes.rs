use std::fmt;

pub const DEFAULT_PATH_PREFIX: &str = "/api/github/oauth";

/// The fixed set of endpoints the adapter answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    GetLogin,
    GetCallback,
    CreateToken,
    GetToken,
    PatchToken,
    DeleteToken,
    DeleteGrant,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::GetLogin,
        Route::GetCallback,
        Route::CreateToken,
        Route::GetToken,
        Route::PatchToken,
        Route::DeleteToken,
        Route::DeleteGrant,
    ];

    pub fn method(&self) -> &'static str {
        match self {
            Route::GetLogin | Route::GetCallback | Route::GetToken => "GET",
            Route::CreateToken => "POST",
            Route::PatchToken => "PATCH",
            Route::DeleteToken | Route::DeleteGrant => "DELETE",
        }
    }

    /// Path relative to the configured prefix.
    pub fn suffix(&self) -> &'static str {
        match self {
            Route::GetLogin => "/login",
            Route::GetCallback => "/callback",
            Route::CreateToken | Route::GetToken | Route::PatchToken | Route::DeleteToken => {
                "/token"
            }
            Route::DeleteGrant => "/grant",
        }
    }

    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::GetLogin => "get_login",
            Route::GetCallback => "get_callback",
            Route::CreateToken => "create_token",
            Route::GetToken => "get_token",
            Route::PatchToken => "patch_token",
            Route::DeleteToken => "delete_token",
            Route::DeleteGrant => "delete_grant",
        }
    }

    /// Whether the route needs the token from the `Authorization` header.
    pub fn requires_authorization(&self) -> bool {
        matches!(
            self,
            Route::GetToken | Route::PatchToken | Route::DeleteToken | Route::DeleteGrant
        )
    }

    /// Whether the route reads a JSON request body.
    pub fn reads_body(&self) -> bool {
        matches!(self, Route::CreateToken)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps `(method, path)` pairs to routes under a path prefix.
///
/// Matching is exact: no trailing-slash normalisation and no percent-decoding.
/// `path` must not include the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    path_prefix: String,
}

impl RouteTable {
    pub fn new(path_prefix: &str) -> Self {
        Self {
            path_prefix: path_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Full path of a route, e.g. `/api/github/oauth/token`.
    pub fn path_of(&self, route: Route) -> String {
        format!("{}{}", self.path_prefix, route.suffix())
    }

    pub fn match_request(&self, method: &str, path: &str) -> Option<Route> {
        let suffix = path.strip_prefix(self.path_prefix.as_str())?;
        Route::ALL
            .into_iter()
            .find(|route| route.method() == method && route.suffix() == suffix)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_PREFIX)
    }
}
