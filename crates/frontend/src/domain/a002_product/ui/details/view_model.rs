use contracts::domain::a002_product::aggregate::{Product, ProductDto};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_product::api::ProductListController;
use crate::shared::api_utils::selected_id;
use crate::shared::form_errors::FormErrors;

pub const FIELDS: &[&str] = &[
    "laboratorio",
    "nombre",
    "descripcion",
    "cantidad_mg",
    "cantidad_capsulas",
    "es_bioequivalente",
    "codigo_serie",
    "precio_venta",
    "activo",
];

/// Editable values; numbers stay text until saved
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub laboratory_id: String,
    pub name: String,
    pub description: String,
    pub dosage_mg: String,
    pub capsule_count: String,
    pub bioequivalent: bool,
    pub serial_code: String,
    pub sale_price: String,
    pub active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            laboratory_id: String::new(),
            name: String::new(),
            description: String::new(),
            dosage_mg: String::new(),
            capsule_count: "0".into(),
            bioequivalent: false,
            serial_code: String::new(),
            sale_price: "0".into(),
            active: true,
        }
    }
}

fn parse_number<N: std::str::FromStr + Default>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
) -> N {
    match value.trim().parse::<N>() {
        Ok(n) => n,
        Err(_) => {
            errors.add(field, "Ingrese un número entero no negativo.");
            N::default()
        }
    }
}

impl ProductForm {
    pub fn from_product(p: &Product) -> Self {
        Self {
            laboratory_id: p.laboratory_id.to_string(),
            name: p.name.clone(),
            description: p.description.clone(),
            dosage_mg: p.dosage_mg.to_string(),
            capsule_count: p.capsule_count.to_string(),
            bioequivalent: p.bioequivalent,
            serial_code: p.serial_code.clone(),
            sale_price: p.sale_price.to_string(),
            active: p.active,
        }
    }

    pub fn to_dto(&self) -> Result<ProductDto, FormErrors> {
        let mut errors = FieldErrors::new();
        let dto = ProductDto {
            laboratory_id: selected_id(&self.laboratory_id).unwrap_or(0),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            dosage_mg: parse_number(&mut errors, "cantidad_mg", &self.dosage_mg),
            capsule_count: parse_number(&mut errors, "cantidad_capsulas", &self.capsule_count),
            bioequivalent: self.bioequivalent,
            serial_code: self.serial_code.trim().to_string(),
            sale_price: parse_number(&mut errors, "precio_venta", &self.sale_price),
            active: self.active,
        };
        if let Err(rules) = dto.validate() {
            for (field, messages) in rules.0 {
                // a parse failure already explains the field
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

/// ViewModel for the product form
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub id: Option<i64>,
    pub form: RwSignal<ProductForm>,
    pub errors: RwSignal<FormErrors>,
    pub saving: RwSignal<bool>,
}

impl ProductDetailsViewModel {
    pub fn new(existing: Option<&Product>) -> Self {
        Self {
            id: existing.map(|p| p.id),
            form: RwSignal::new(existing.map(ProductForm::from_product).unwrap_or_default()),
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

    pub fn save_command(&self, ctl: ProductListController, on_saved: Callback<()>) {
        let dto = match self.form.with_untracked(ProductForm::to_dto) {
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
                Ok(product) => {
                    log::info!("Product {} saved", product.id);
                    on_saved.run(());
                }
                // field values stay as typed; only the messages change
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
    use crate::shared::api_error::ApiError;

    fn filled() -> ProductForm {
        ProductForm {
            laboratory_id: "3".into(),
            name: "Paracetamol".into(),
            description: "Analgésico".into(),
            dosage_mg: "500".into(),
            capsule_count: "16".into(),
            bioequivalent: true,
            serial_code: "7801234567890".into(),
            sale_price: "1290".into(),
            active: true,
        }
    }

    #[test]
    fn test_valid_form_builds_dto() {
        let dto = filled().to_dto().unwrap();
        assert_eq!(dto.laboratory_id, 3);
        assert_eq!(dto.dosage_mg, 500);
        assert_eq!(dto.sale_price, 1290);
    }

    #[test]
    fn test_bad_numbers_are_reported_per_field() {
        let form = ProductForm {
            dosage_mg: "quinientos".into(),
            sale_price: "-5".into(),
            ..filled()
        };
        let errors = form.to_dto().unwrap_err();
        assert!(errors.field("cantidad_mg").is_some());
        assert!(errors.field("precio_venta").is_some());
        assert!(errors.field("nombre").is_none());
    }

    #[test]
    fn test_server_required_name_keeps_other_values() {
        let form = filled();
        let err = ApiError::from_status(400, r#"{"nombre": ["required"]}"#);
        let errors = FormErrors::from_api_error(&err, FIELDS);
        assert_eq!(errors.field("nombre").as_deref(), Some("required"));
        assert!(errors.field("codigo_serie").is_none());
        // the form itself is untouched by error mapping
        assert_eq!(form, filled());
        assert!(form.to_dto().is_ok());
    }
}
