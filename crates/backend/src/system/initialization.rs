use anyhow::Result;
use chrono::{Duration, Utc};
use contracts::domain::a001_laboratory::aggregate::LaboratoryDto;
use contracts::domain::a002_product::aggregate::ProductDto;
use contracts::domain::a003_batch::aggregate::BatchDto;
use contracts::system::users::CreateUserDto;

use crate::domain::{a001_laboratory, a002_product, a003_batch};

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};

    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let admin = service::create(CreateUserDto {
        username: "admin".to_string(),
        password: "admin".to_string(),
        first_name: "Administrador".to_string(),
        ..Default::default()
    })
    .await?;

    tracing::warn!("Default admin user created (id {}): admin / admin", admin.id);
    tracing::warn!("Change this password before exposing the server");
    Ok(())
}

struct DemoProduct {
    lab: usize,
    name: &'static str,
    dosage_mg: u32,
    capsules: u32,
    bioequivalent: bool,
    serial: &'static str,
    price: u64,
}

const DEMO_LABS: &[(&str, &str, &str)] = &[
    ("Laboratorio Chile", "Av. Marathon 1315, Ñuñoa", "+56 2 2365 5000"),
    ("Recalcine", "Av. Pedro de Valdivia 295, Providencia", "+56 2 2362 3000"),
    ("Saval", "Av. Eduardo Frei Montalva 4600, Renca", "+56 2 2707 3000"),
];

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct { lab: 0, name: "Paracetamol", dosage_mg: 500, capsules: 16, bioequivalent: true, serial: "7800001000011", price: 1290 },
    DemoProduct { lab: 0, name: "Ibuprofeno", dosage_mg: 400, capsules: 20, bioequivalent: true, serial: "7800001000028", price: 1990 },
    DemoProduct { lab: 1, name: "Amoxicilina", dosage_mg: 500, capsules: 21, bioequivalent: false, serial: "7800002000017", price: 4590 },
    DemoProduct { lab: 1, name: "Loratadina", dosage_mg: 10, capsules: 30, bioequivalent: true, serial: "7800002000024", price: 2490 },
    DemoProduct { lab: 2, name: "Omeprazol", dosage_mg: 20, capsules: 28, bioequivalent: true, serial: "7800003000013", price: 3290 },
];

/// Fill an empty inventory with a few laboratories, products and batches.
/// One batch per product expires soon so the expiry badges show up.
pub async fn seed_demo_data() -> Result<()> {
    if a001_laboratory::repository::count(None).await? > 0 {
        return Ok(());
    }
    tracing::info!("Seeding demo inventory");

    let mut lab_ids = Vec::new();
    for (name, address, phone) in DEMO_LABS {
        let lab = a001_laboratory::service::create(LaboratoryDto {
            name: name.to_string(),
            address: Some(address.to_string()),
            phone: Some(phone.to_string()),
        })
        .await?;
        lab_ids.push(lab.id);
    }

    let today = Utc::now().date_naive();
    for (i, demo) in DEMO_PRODUCTS.iter().enumerate() {
        let product = a002_product::service::create(ProductDto {
            laboratory_id: lab_ids[demo.lab],
            name: demo.name.to_string(),
            description: format!("{} {} mg x {} comprimidos", demo.name, demo.dosage_mg, demo.capsules),
            dosage_mg: demo.dosage_mg,
            capsule_count: demo.capsules,
            bioequivalent: demo.bioequivalent,
            serial_code: demo.serial.to_string(),
            sale_price: demo.price,
            active: true,
        })
        .await?;

        let batches = [
            (format!("L{:03}-A", i + 1), Duration::days(20), 12),
            (format!("L{:03}-B", i + 1), Duration::days(365), 40),
        ];
        for (code, shelf_life, quantity) in batches {
            a003_batch::service::create(BatchDto {
                product_id: product.id,
                lot_code: code,
                created_on: today - Duration::days(30),
                expires_on: today + shelf_life,
                quantity,
                defective: false,
                active: true,
            })
            .await?;
        }
    }

    tracing::info!(
        "Demo inventory ready: {} laboratories, {} products",
        DEMO_LABS.len(),
        DEMO_PRODUCTS.len()
    );
    Ok(())
}
