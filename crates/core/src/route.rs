//! View routes of the browser UI
//!
//! The frontend uses history-mode navigation, so the server must recognise
//! which paths belong to a view and which should render the Not-Found page.
//!
//! | name       | path               |
//! |------------|--------------------|
//! | `Home`     | `/`                |
//! | `Objects`  | `/objects/:bucket` |
//! | `NotFound` | anything else      |

/// A navigation target of the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRoute {
    /// Connection form and bucket list
    Home,
    /// Object list of one bucket
    Objects { bucket: String },
    /// Catch-all page, keeps the path that did not match
    NotFound { path: String },
}

impl ViewRoute {
    /// Resolve a request path (query string and fragment are ignored)
    pub fn resolve(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_matches('/');

        if trimmed.is_empty() {
            return ViewRoute::Home;
        }

        let mut segments = trimmed.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("objects"), Some(bucket), None) if !bucket.is_empty() => ViewRoute::Objects {
                bucket: bucket.to_string(),
            },
            _ => ViewRoute::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// Route name as registered in the UI router
    pub fn name(&self) -> &'static str {
        match self {
            ViewRoute::Home => "Home",
            ViewRoute::Objects { .. } => "Objects",
            ViewRoute::NotFound { .. } => "NotFound",
        }
    }

    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            ViewRoute::Home => "/".to_string(),
            ViewRoute::Objects { bucket } => format!("/objects/{bucket}"),
            ViewRoute::NotFound { path } => path.clone(),
        }
    }

    /// Whether the path belongs to a real view
    pub fn is_found(&self) -> bool {
        !matches!(self, ViewRoute::NotFound { .. })
    }
}

impl std::fmt::Display for ViewRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.path())
    }
}
