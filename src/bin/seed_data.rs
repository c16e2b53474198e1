//! Seeds the database with a working set of users, catalog entries and a
//! couple of jobs for local development.

use config::Config;
use dotenvy::dotenv;
use rust_decimal::Decimal;

use paragon_jms::db::{DbPool, establish_connection_pool};
use paragon_jms::domain::catalog::{NewPaperSize, NewPaperType, NewProductType, PaperSeries};
use paragon_jms::domain::job::{JobType, NewJob};
use paragon_jms::domain::user::{NewUser, UserRole};
use paragon_jms::repository::catalog::DieselCatalogRepository;
use paragon_jms::repository::job::DieselJobRepository;
use paragon_jms::repository::user::DieselUserRepository;
use paragon_jms::repository::{CatalogWriter, JobWriter, UserReader, UserWriter};
use paragon_jms::services::auth::hash_password;

const USERS: &[(&str, &str, Option<UserRole>, bool)] = &[
    (
        "admin@paragon.example",
        "System Administrator",
        Some(UserRole::Superuser),
        true,
    ),
    (
        "designer@paragon.example",
        "John Designer",
        Some(UserRole::Designer),
        true,
    ),
    (
        "sales@paragon.example",
        "Jane Sales",
        Some(UserRole::SalesRepresentative),
        true,
    ),
    (
        "operator@paragon.example",
        "Mike Operator",
        Some(UserRole::Operator),
        true,
    ),
    (
        "clerk@paragon.example",
        "Sarah Clerk",
        Some(UserRole::Clerk),
        true,
    ),
    ("pending@paragon.example", "Pending User", None, false),
];

const PRODUCT_TYPES: &[&str] = &[
    "Business Cards",
    "Flyers",
    "Posters",
    "Booklets",
    "Banners",
];

const PAPER_TYPES: &[&str] = &["Gloss Art", "Matte Art", "Bond", "Card"];

const GSM: &[i32] = &[80, 115, 130, 170, 250, 300];

fn seed(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let users = DieselUserRepository::new(pool);
    let catalog = DieselCatalogRepository::new(pool);
    let jobs = DieselJobRepository::new(pool);

    if users.get_user_by_email("admin@paragon.example")?.is_some() {
        log::info!("Database already seeded, nothing to do");
        return Ok(());
    }

    // Users. The superuser approves everyone else.
    let admin = users.create_user(&NewUser::new(
        "System Administrator".to_string(),
        "admin@paragon.example".to_string(),
        hash_password("admin123")?,
    ))?;
    let admin = users.approve_user(admin.id, UserRole::Superuser, admin.id)?;

    for (email, full_name, role, approved) in USERS.iter().skip(1) {
        let user = users.create_user(&NewUser::new(
            (*full_name).to_string(),
            (*email).to_string(),
            hash_password("password123")?,
        ))?;
        if let (true, Some(role)) = (*approved, role) {
            users.approve_user(user.id, *role, admin.id)?;
        }
    }
    log::info!("Created {} users", USERS.len());

    // Catalog: product types, paper types, weights and A-series sizes.
    let mut product_type_ids = Vec::new();
    for name in PRODUCT_TYPES {
        let product_type = catalog.create_product_type(&NewProductType {
            name: (*name).to_string(),
            description: String::new(),
        })?;
        product_type_ids.push(product_type.id);
    }

    let mut paper_type_ids = Vec::new();
    for name in PAPER_TYPES {
        let paper_type = catalog.create_paper_type(&NewPaperType {
            name: (*name).to_string(),
            description: String::new(),
        })?;
        paper_type_ids.push(paper_type.id);
    }

    let mut weight_ids = Vec::new();
    for gsm in GSM {
        let weight = catalog.create_paper_weight(*gsm)?;
        weight_ids.push(weight.id);
        for paper_type_id in &paper_type_ids {
            catalog.link_weight_to_paper_type(weight.id, *paper_type_id)?;
        }
    }

    let sizes = [
        ("A3", PaperSeries::IsoA, 297, 420),
        ("A4", PaperSeries::IsoA, 210, 297),
        ("A5", PaperSeries::IsoA, 148, 210),
        ("Business Card", PaperSeries::Other, 90, 50),
    ];
    let mut size_ids = Vec::new();
    for (name, series, width, height) in sizes {
        let size = catalog.create_paper_size(&NewPaperSize {
            name: name.to_string(),
            series,
            width_mm: Decimal::from(width),
            height_mm: Decimal::from(height),
        })?;
        size_ids.push(size.id);
        for weight_id in &weight_ids {
            catalog.link_size_to_weight(size.id, *weight_id)?;
        }
    }

    for product_type_id in &product_type_ids {
        catalog.replace_product_specification(
            *product_type_id,
            &paper_type_ids,
            &weight_ids,
            &size_ids,
        )?;
    }
    log::info!(
        "Created {} product types, {} paper types, {} weights, {} sizes",
        product_type_ids.len(),
        paper_type_ids.len(),
        weight_ids.len(),
        size_ids.len()
    );

    // A couple of jobs so dashboards are not empty. The LOCAL one also
    // exercises docket assignment.
    jobs.create_job(&NewJob {
        branch: "BORROWDALE".to_string(),
        job_type: JobType::Local,
        docket_number: None,
        sales_rep: "Jane Sales".to_string(),
        order_taken_by: "Jane Sales".to_string(),
        customer: "Acme Trading".to_string(),
        contact_person: "Bob Smith".to_string(),
        mobile_number: "0771234567".to_string(),
        email_address: "bob@acme.example".to_string(),
        quantity: 500,
        description: "Double-sided business cards".to_string(),
        product_type_id: product_type_ids[0],
        paper_type_id: Some(paper_type_ids[3]),
        paper_weight_id: weight_ids.last().copied(),
        paper_size_id: size_ids.last().copied(),
        notes: String::new(),
        print_cost: Decimal::new(4500, 2),
        design_cost: Decimal::new(1500, 2),
    })?;

    jobs.create_job(&NewJob {
        branch: "EASTLEA".to_string(),
        job_type: JobType::Foreign,
        docket_number: Some("FOR-2201".to_string()),
        sales_rep: "Jane Sales".to_string(),
        order_taken_by: "System Administrator".to_string(),
        customer: "Harare Conference Centre".to_string(),
        contact_person: "Tariro M".to_string(),
        mobile_number: "0779876543".to_string(),
        email_address: "events@hcc.example".to_string(),
        quantity: 20,
        description: "A3 event posters".to_string(),
        product_type_id: product_type_ids[2],
        paper_type_id: Some(paper_type_ids[0]),
        paper_weight_id: weight_ids.get(3).copied(),
        paper_size_id: size_ids.first().copied(),
        notes: "Deliver before Friday".to_string(),
        print_cost: Decimal::new(12000, 2),
        design_cost: Decimal::ZERO,
    })?;
    log::info!("Created sample jobs");

    Ok(())
}

fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let settings = Config::builder()
        .set_default("database_url", "paragon_jms.db")
        .map_err(|e| std::io::Error::other(format!("Failed to set config defaults: {e}")))?
        .add_source(config::Environment::default())
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    let database_url: String = settings
        .get_string("database_url")
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))?;

    let pool = establish_connection_pool(&database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    seed(&pool).map_err(|e| std::io::Error::other(format!("Seeding failed: {e}")))
}
