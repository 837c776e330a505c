//! Opening an edit form from the `editar` marker of the location

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::list_controller::ListController;
use crate::layout::global_context::{AppGlobalContext, Section};

/// Watch the marker while `section` is shown. A record already in the held
/// page opens directly; any other id is fetched first.
pub fn watch_edit_marker<T, D, F>(
    section: Section,
    ctl: ListController<T, D, F>,
    open: impl Fn(T) + Clone + 'static,
) where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    D: Serialize + 'static,
    F: Serialize + Clone + Send + Sync + 'static,
{
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    Effect::new(move |_| {
        let Some(id) = ctx.edit_marker.get() else {
            return;
        };
        if ctx.section.get_untracked() != section {
            return;
        }
        if let Some(item) = ctl.find_loaded(id) {
            open(item);
            return;
        }
        let open = open.clone();
        spawn_local(async move {
            match ctl.service().get_by_id(id).await {
                Ok(item) => open(item),
                Err(e) => {
                    log::warn!("Record {} from the edit marker not available: {}", id, e);
                    ctx.clear_edit();
                }
            }
        });
    });
}
