use contracts::domain::a001_laboratory::aggregate::{Laboratory, LaboratoryDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_laboratory::api::LaboratoryListController;
use crate::shared::form_errors::FormErrors;

pub const FIELDS: &[&str] = &["nombre", "direccion", "telefono"];

/// Editable values of the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaboratoryForm {
    pub name: String,
    pub address: String,
    pub phone: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl LaboratoryForm {
    pub fn from_laboratory(lab: &Laboratory) -> Self {
        Self {
            name: lab.name.clone(),
            address: lab.address.clone().unwrap_or_default(),
            phone: lab.phone.clone().unwrap_or_default(),
        }
    }

    pub fn to_dto(&self) -> Result<LaboratoryDto, FormErrors> {
        let dto = LaboratoryDto {
            name: self.name.trim().to_string(),
            address: optional(&self.address),
            phone: optional(&self.phone),
        };
        dto.validate()
            .map_err(|errors| FormErrors::from_field_errors(&errors, FIELDS))?;
        Ok(dto)
    }
}

/// ViewModel for the laboratory form
#[derive(Clone, Copy)]
pub struct LaboratoryDetailsViewModel {
    pub id: Option<i64>,
    pub form: RwSignal<LaboratoryForm>,
    pub errors: RwSignal<FormErrors>,
    pub saving: RwSignal<bool>,
}

impl LaboratoryDetailsViewModel {
    pub fn new(existing: Option<&Laboratory>) -> Self {
        Self {
            id: existing.map(|lab| lab.id),
            form: RwSignal::new(existing.map(LaboratoryForm::from_laboratory).unwrap_or_default()),
            errors: RwSignal::new(FormErrors::new()),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn field_error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.field(field)))
    }

    pub fn save_command(&self, ctl: LaboratoryListController, on_saved: Callback<()>) {
        let dto = match self.form.with_untracked(LaboratoryForm::to_dto) {
            Ok(dto) => dto,
            Err(errors) => {
                self.errors.set(errors);
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            let result = match this.id {
                Some(id) => ctl.update(id, dto).await,
                None => ctl.create(dto).await,
            };
            this.saving.try_set(false);
            match result {
                Ok(lab) => {
                    log::info!("Laboratory {} saved", lab.id);
                    on_saved.run(());
                }
                Err(e) => {
                    this.errors.try_set(FormErrors::from_api_error(&e, FIELDS));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_optional_fields_become_none() {
        let form = LaboratoryForm {
            name: " Laboratorio Chile ".into(),
            address: "   ".into(),
            phone: "+56 2 2345 6789".into(),
        };
        let dto = form.to_dto().unwrap();
        assert_eq!(dto.name, "Laboratorio Chile");
        assert_eq!(dto.address, None);
        assert_eq!(dto.phone.as_deref(), Some("+56 2 2345 6789"));
    }

    #[test]
    fn test_missing_name_is_reported_on_its_field() {
        let errors = LaboratoryForm::default().to_dto().unwrap_err();
        assert!(errors.field("nombre").is_some());
        assert!(errors.banner().is_none());
    }
}
