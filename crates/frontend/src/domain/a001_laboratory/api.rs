use contracts::domain::a001_laboratory::aggregate::{Laboratory, LaboratoryDto};
use serde::Serialize;

use crate::shared::list_controller::ListController;
use crate::shared::resource::ResourceService;

pub const SERVICE: ResourceService<Laboratory, LaboratoryDto> =
    ResourceService::new("/laboratorios/");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaboratoryFilter {
    pub search: String,
}

pub type LaboratoryListController = ListController<Laboratory, LaboratoryDto, LaboratoryFilter>;
