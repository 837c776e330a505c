use contracts::system::users::{CreateUserDto, UserProfile};

use crate::shared::list_controller::ListController;
use crate::shared::resource::ResourceService;

/// Accounts are created from the server CLI; the client only lists them
pub const SERVICE: ResourceService<UserProfile, CreateUserDto> =
    ResourceService::new("/usuarios/");

/// The endpoint takes no filters
pub type UserListController = ListController<UserProfile, CreateUserDto, ()>;
