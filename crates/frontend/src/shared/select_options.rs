//! Options for form dropdowns, loaded from a `simple_list/` endpoint

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::resource::ResourceService;

pub struct SelectOptions<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl<T: Send + Sync + 'static> Clone for SelectOptions<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for SelectOptions<T> {}

impl<T> SelectOptions<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn load<D: Serialize + 'static>(service: ResourceService<T, D>) -> Self {
        let options = Self {
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        };
        options.reload(service);
        options
    }

    pub fn reload<D: Serialize + 'static>(&self, service: ResourceService<T, D>) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match service.get_all_no_pagination().await {
                Ok(items) => {
                    this.items.try_set(items);
                    this.error.try_set(None);
                }
                Err(e) => {
                    log::warn!("Loading options from {} failed: {}", service.path(), e);
                    this.error.try_set(Some(e.to_string()));
                }
            }
            this.loading.try_set(false);
        });
    }
}
