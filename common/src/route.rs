//! Client-side routes and the guards that decide what a session may see.

/// Every view of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    TemplateUpload,
    DataUpload { template_id: String },
    Designer { template_id: String, step: Option<String> },
}

impl Route {
    /// Parses a location pathname and query string (`?a=b`, optional `?`).
    ///
    /// `/` maps to the dashboard; anything unknown is `None`.
    pub fn parse(path: &str, query: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] | ["dashboard"] => Route::Dashboard,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["templates", "upload"] => Route::TemplateUpload,
            ["data", "upload", id] => Route::DataUpload { template_id: id.to_string() },
            ["designer", id] => Route::Designer {
                template_id: id.to_string(),
                step: query_param(query, "step"),
            },
            _ => return None,
        };
        Some(route)
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::TemplateUpload => "/templates/upload".to_string(),
            Route::DataUpload { template_id } => format!("/data/upload/{template_id}"),
            Route::Designer { template_id, step: Some(step) } => {
                format!("/designer/{template_id}?step={step}")
            }
            Route::Designer { template_id, step: None } => format!("/designer/{template_id}"),
        }
    }

    pub fn designer(template_id: impl Into<String>) -> Route {
        Route::Designer { template_id: template_id.into(), step: None }
    }

    /// Views only meant for signed-out visitors.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

/// Coarse session state as far as routing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Initializing,
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The session check has not finished yet.
    Loading,
    Render(Route),
    Redirect(Route),
}

/// Applies the public/protected guards to a parsed location.
pub fn resolve(route: Option<Route>, phase: AuthPhase) -> Resolution {
    let Some(route) = route else {
        return Resolution::Redirect(Route::Dashboard);
    };
    match phase {
        AuthPhase::Initializing => Resolution::Loading,
        AuthPhase::Authenticated if route.is_public() => Resolution::Redirect(Route::Dashboard),
        AuthPhase::Anonymous if !route.is_public() => Resolution::Redirect(Route::Login),
        _ => Resolution::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn all_routes() -> Vec<Route> {
        vec![
            Route::Login,
            Route::Register,
            Route::Dashboard,
            Route::TemplateUpload,
            Route::DataUpload { template_id: "t1".into() },
            Route::designer("t1"),
            Route::Designer { template_id: "t1".into(), step: Some("mapping".into()) },
        ]
    }

    #[test]
    fn paths_round_trip() {
        for route in all_routes() {
            let path = route.to_path();
            let (pathname, query) = path.split_once('?').unwrap_or((&path, ""));
            assert_eq!(Route::parse(pathname, query), Some(route));
        }
    }

    #[test]
    fn root_and_unknown_paths() {
        assert_eq!(Route::parse("/", ""), Some(Route::Dashboard));
        assert_eq!(Route::parse("/designer", ""), None);
        assert_eq!(Route::parse("/designer/5/extra", ""), None);
        assert_eq!(resolve(None, AuthPhase::Anonymous), Resolution::Redirect(Route::Dashboard));
    }

    #[test]
    fn step_is_read_from_query() {
        assert_eq!(
            Route::parse("/designer/9", "?x=1&step=mapping"),
            Some(Route::Designer { template_id: "9".into(), step: Some("mapping".into()) })
        );
        assert_eq!(Route::parse("/designer/9", "step="), Some(Route::designer("9")));
    }

    #[test]
    fn guards() {
        let dash = Some(Route::Dashboard);
        let login = Some(Route::Login);
        assert_eq!(resolve(dash.clone(), AuthPhase::Initializing), Resolution::Loading);
        assert_eq!(resolve(dash.clone(), AuthPhase::Anonymous), Resolution::Redirect(Route::Login));
        assert_eq!(resolve(dash, AuthPhase::Authenticated), Resolution::Render(Route::Dashboard));
        assert_eq!(resolve(login.clone(), AuthPhase::Anonymous), Resolution::Render(Route::Login));
        assert_eq!(resolve(login, AuthPhase::Authenticated), Resolution::Redirect(Route::Dashboard));
    }
}
