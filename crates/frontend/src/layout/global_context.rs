use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::BTreeMap;
use web_sys::window;

/// Query key carrying the id of the record whose edit form should open
pub const EDIT_MARKER_KEY: &str = "editar";

/// Content sections reachable from the navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Laboratories,
    Products,
    Batches,
    PointOfSale,
    Users,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Laboratories,
        Section::Products,
        Section::Batches,
        Section::PointOfSale,
        Section::Users,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Section::Laboratories => "/laboratorios",
            Section::Products => "/productos",
            Section::Batches => "/lotes",
            Section::PointOfSale => "/pos",
            Section::Users => "/usuarios",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Laboratories => "Laboratorios",
            Section::Products => "Productos",
            Section::Batches => "Lotes",
            Section::PointOfSale => "Punto de Venta",
            Section::Users => "Usuarios",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Laboratories => "laboratory",
            Section::Products => "product",
            Section::Batches => "batch",
            Section::PointOfSale => "cart",
            Section::Users => "users",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|s| s.path() == path)
    }
}

/// Section and edit marker encoded in a location
pub fn parse_location(pathname: &str, search: &str) -> (Option<Section>, Option<i64>) {
    let params: BTreeMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    let edit = params
        .get(EDIT_MARKER_KEY)
        .and_then(|v| v.trim().parse::<i64>().ok());
    (Section::from_path(pathname), edit)
}

/// Relative URL for a section, with the edit marker when present
pub fn build_location(section: Section, edit: Option<i64>) -> String {
    match edit {
        Some(id) => format!("{}?{}={}", section.path(), EDIT_MARKER_KEY, id),
        None => section.path().to_string(),
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub section: RwSignal<Section>,
    pub edit_marker: RwSignal<Option<i64>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            section: RwSignal::new(Section::Laboratories),
            edit_marker: RwSignal::new(None),
        }
    }

    /// Adopt the current location, then mirror state changes into it with
    /// `history.replaceState`
    pub fn init_router_integration(&self) {
        let (pathname, search) = window()
            .map(|w| {
                let location = w.location();
                (
                    location.pathname().unwrap_or_default(),
                    location.search().unwrap_or_default(),
                )
            })
            .unwrap_or_default();
        let (section, edit) = parse_location(&pathname, &search);
        if let Some(section) = section {
            self.section.set(section);
            self.edit_marker.set(edit);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = build_location(this.section.get(), this.edit_marker.get());

            let current = window()
                .map(|w| {
                    let location = w.location();
                    format!(
                        "{}{}",
                        location.pathname().unwrap_or_default(),
                        location.search().unwrap_or_default()
                    )
                })
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    /// Switch section; `edit` opens that record's form once the page is up
    pub fn navigate(&self, section: Section, edit: Option<i64>) {
        log::debug!("navigate: {:?} edit={:?}", section, edit);
        self.section.set(section);
        self.edit_marker.set(edit);
    }

    pub fn clear_edit(&self) {
        if self.edit_marker.get_untracked().is_some() {
            self.edit_marker.set(None);
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            parse_location("/productos/", "?editar=42"),
            (Some(Section::Products), Some(42))
        );
        assert_eq!(
            parse_location("/lotes", ""),
            (Some(Section::Batches), None)
        );
        assert_eq!(parse_location("/login", "?editar=x"), (None, None));
    }

    #[test]
    fn test_build_location_round_trips() {
        for section in Section::ALL {
            let url = build_location(section, Some(7));
            let (path, query) = url.split_once('?').unwrap();
            assert_eq!(parse_location(path, query), (Some(section), Some(7)));
        }
        assert_eq!(build_location(Section::PointOfSale, None), "/pos");
    }
}
