use std::fmt;

/// Screens reachable in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Home,
    Dashboard,
    Predict(String),
    Contact,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".into(),
            Route::Signup => "/signup".into(),
            Route::Home => "/home".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Predict(ticker) => format!("/predict/{ticker}"),
            Route::Contact => "/contact".into(),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Login),
            "/signup" => Some(Route::Signup),
            "/home" => Some(Route::Home),
            "/dashboard" => Some(Route::Dashboard),
            "/contact" => Some(Route::Contact),
            other => other
                .strip_prefix("/predict/")
                .filter(|t| !t.is_empty() && !t.contains('/'))
                .map(|t| Route::Predict(t.to_uppercase())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
