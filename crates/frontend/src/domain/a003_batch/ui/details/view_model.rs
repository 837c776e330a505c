use chrono::NaiveDate;
use contracts::domain::a003_batch::aggregate::{Batch, BatchDto};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a003_batch::api::BatchListController;
use crate::shared::date_utils::{parse_input_value, to_input_value, today};
use crate::shared::form_errors::FormErrors;

pub const FIELDS: &[&str] = &[
    "producto",
    "codigo_lote",
    "fecha_creacion",
    "fecha_vencimiento",
    "cantidad",
    "defectuoso",
    "activo",
];

#[derive(Debug, Clone, PartialEq)]
pub struct BatchForm {
    pub product_id: Option<i64>,
    /// Shown in the picker once a product is chosen
    pub product_label: String,
    pub lot_code: String,
    pub created_on: String,
    pub expires_on: String,
    pub quantity: String,
    pub defective: bool,
    pub active: bool,
}

impl BatchForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            product_id: None,
            product_label: String::new(),
            lot_code: String::new(),
            created_on: to_input_value(today),
            expires_on: String::new(),
            quantity: String::new(),
            defective: false,
            active: true,
        }
    }

    pub fn from_batch(b: &Batch) -> Self {
        Self {
            product_id: Some(b.product_id),
            product_label: b.product_name.clone(),
            lot_code: b.lot_code.clone(),
            created_on: to_input_value(b.created_on),
            expires_on: to_input_value(b.expires_on),
            quantity: b.quantity.to_string(),
            defective: b.defective,
            active: b.active,
        }
    }

    /// Dates only need to parse; an expiry in the past is a valid entry.
    /// A new batch needs units, an existing one may be depleted.
    pub fn to_dto(&self, is_new: bool) -> Result<BatchDto, FormErrors> {
        let mut errors = FieldErrors::new();
        let mut date = |field: &str, value: &str| match parse_input_value(value) {
            Some(d) => d,
            None => {
                errors.add(field, "Ingrese una fecha válida.");
                NaiveDate::default()
            }
        };
        let created_on = date("fecha_creacion", &self.created_on);
        let expires_on = date("fecha_vencimiento", &self.expires_on);
        let quantity = match self.quantity.trim().parse::<u32>() {
            Ok(q) => q,
            Err(_) => {
                errors.add("cantidad", "Ingrese un número entero no negativo.");
                0
            }
        };

        let dto = BatchDto {
            product_id: self.product_id.unwrap_or(0),
            lot_code: self.lot_code.trim().to_string(),
            created_on,
            expires_on,
            quantity,
            defective: self.defective,
            active: self.active,
        }
        .normalized();

        let rules = if is_new {
            dto.validate_new()
        } else {
            dto.validate()
        };
        if let Err(rules) = rules {
            for (field, messages) in rules.0 {
                if !errors.contains(&field) {
                    for message in messages {
                        errors.add(&field, message);
                    }
                }
            }
        }
        if errors.is_empty() {
            Ok(dto)
        } else {
            Err(FormErrors::from_field_errors(&errors, FIELDS))
        }
    }
}

#[derive(Clone, Copy)]
pub struct BatchDetailsViewModel {
    pub id: Option<i64>,
    pub form: RwSignal<BatchForm>,
    pub errors: RwSignal<FormErrors>,
    pub saving: RwSignal<bool>,
}

impl BatchDetailsViewModel {
    pub fn new(existing: Option<&Batch>) -> Self {
        let form = match existing {
            Some(b) => BatchForm::from_batch(b),
            None => BatchForm::blank(today()),
        };
        Self {
            id: existing.map(|b| b.id),
            form: RwSignal::new(form),
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

    pub fn pick_product(&self, id: i64, label: String) {
        self.form.update(|f| {
            f.product_id = Some(id);
            f.product_label = label;
        });
    }

    pub fn save_command(&self, ctl: BatchListController, on_saved: Callback<()>) {
        let is_new = !self.is_edit_mode();
        let dto = match self.form.with_untracked(|f| f.to_dto(is_new)) {
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
                Ok(batch) => {
                    log::info!("Batch {} ({}) saved", batch.id, batch.lot_code);
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
    use contracts::domain::a003_batch::aggregate::ExpiryStatus;

    fn filled() -> BatchForm {
        BatchForm {
            product_id: Some(4),
            product_label: "Amoxicilina 500 mg".into(),
            lot_code: "L-2020-01".into(),
            created_on: "2020-01-01".into(),
            expires_on: "2021-01-01".into(),
            quantity: "25".into(),
            defective: false,
            active: true,
        }
    }

    #[test]
    fn test_past_expiry_is_accepted() {
        let dto = filled().to_dto(true).unwrap();
        assert_eq!(dto.quantity, 25);
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(
            ExpiryStatus::evaluate(dto.expires_on, today).label(),
            "VENCIDO"
        );
    }

    #[test]
    fn test_expiry_before_creation_is_not_rejected() {
        let form = BatchForm {
            created_on: "2024-05-01".into(),
            expires_on: "2024-04-01".into(),
            ..filled()
        };
        assert!(form.to_dto(true).is_ok());
    }

    #[test]
    fn test_missing_product_and_bad_date() {
        let form = BatchForm {
            product_id: None,
            expires_on: "".into(),
            ..filled()
        };
        let errors = form.to_dto(true).unwrap_err();
        assert!(errors.field("producto").is_some());
        assert!(errors.field("fecha_vencimiento").is_some());
        assert!(errors.field("codigo_lote").is_none());
    }

    #[test]
    fn test_zero_units_only_allowed_when_editing() {
        let form = BatchForm {
            quantity: "0".into(),
            active: false,
            ..filled()
        };
        let errors = form.to_dto(true).unwrap_err();
        assert!(errors.field("cantidad").is_some());

        let dto = form.to_dto(false).unwrap();
        assert_eq!(dto.quantity, 0);
        assert!(!dto.active);
    }

    #[test]
    fn test_defective_batch_is_saved_inactive() {
        let form = BatchForm {
            defective: true,
            ..filled()
        };
        let dto = form.to_dto(true).unwrap();
        assert!(!dto.active);
    }
}
