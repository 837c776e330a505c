use web_sys::window;

/// Display name of the logged-in user; the only state the client persists
const USERNAME_KEY: &str = "username";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_username(username: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(USERNAME_KEY, username);
    }
}

pub fn get_username() -> Option<String> {
    get_local_storage()?.get_item(USERNAME_KEY).ok()?
}

pub fn clear_username() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(USERNAME_KEY);
    }
}
