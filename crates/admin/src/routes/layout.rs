//! Page chrome shared by every full page: navigation and toasts.

use tower_sessions::Session;

use crate::components::{Toast, toast};

/// Top navigation entry.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 4] = [
    ("/", "Inicio"),
    ("/sucursales", "Sucursales"),
    ("/personal", "Personal"),
    ("/horarios", "Horarios"),
];

/// Navigation with the entry for `current_path` marked active.
#[must_use]
pub fn nav(current_path: &str) -> Vec<NavItem> {
    NAV.iter()
        .map(|&(href, label)| NavItem {
            href,
            label,
            active: if href == "/" {
                current_path == "/"
            } else {
                current_path == href || current_path.starts_with(&format!("{href}/"))
            },
        })
        .collect()
}

/// Navigation plus the toasts to show on this render.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub nav: Vec<NavItem>,
    pub toasts: Vec<Toast>,
}

impl Chrome {
    /// Build the chrome, consuming the session's pending toasts.
    pub async fn load(session: &Session, current_path: &str) -> Self {
        Self {
            nav: nav(current_path),
            toasts: toast::take(session).await,
        }
    }

    /// Add a toast shown on this render only.
    #[must_use]
    pub fn with_toast(mut self, toast: Toast) -> Self {
        self.toasts.push(toast);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(path: &str) -> Vec<&'static str> {
        nav(path)
            .into_iter()
            .filter(|item| item.active)
            .map(|item| item.label)
            .collect()
    }

    #[test]
    fn test_active_item_follows_path() {
        assert_eq!(active("/"), vec!["Inicio"]);
        assert_eq!(active("/sucursales"), vec!["Sucursales"]);
        assert_eq!(active("/personal/12"), vec!["Personal"]);
        assert_eq!(active("/horarios/nuevo"), vec!["Horarios"]);
    }

    #[test]
    fn test_prefix_must_end_at_segment() {
        assert!(active("/horariosx").is_empty());
    }
}
