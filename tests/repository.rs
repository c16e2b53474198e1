use rust_decimal::Decimal;

use paragon_jms::db::DbPool;
use paragon_jms::domain::catalog::{NewPaperSize, NewPaperType, NewProductType, PaperSeries};
use paragon_jms::domain::job::{JobStatus, JobType, NewJob, PaymentStatus, UpdateJob};
use paragon_jms::domain::user::{NewUser, UserRole};
use paragon_jms::repository::catalog::DieselCatalogRepository;
use paragon_jms::repository::job::DieselJobRepository;
use paragon_jms::repository::settings::DieselSettingsRepository;
use paragon_jms::repository::user::DieselUserRepository;
use paragon_jms::repository::{
    CatalogReader, CatalogWriter, JobListQuery, JobReader, JobWriter, SettingsReader,
    SettingsWriter, UserReader, UserWriter,
};

mod common;

fn seed_product_type(pool: &DbPool) -> i32 {
    let catalog = DieselCatalogRepository::new(pool);
    catalog
        .create_product_type(&NewProductType {
            name: "Flyers".to_string(),
            description: String::new(),
        })
        .unwrap()
        .id
}

fn new_job(job_type: JobType, docket: Option<&str>, product_type_id: i32) -> NewJob {
    NewJob {
        branch: "BORROWDALE".to_string(),
        job_type,
        docket_number: docket.map(str::to_string),
        sales_rep: "Jane Sales".to_string(),
        order_taken_by: "Jane Sales".to_string(),
        customer: "Acme".to_string(),
        contact_person: "Bob".to_string(),
        mobile_number: "0771234567".to_string(),
        email_address: "bob@acme.example".to_string(),
        quantity: 100,
        description: "Flyers for the fair".to_string(),
        product_type_id,
        paper_type_id: None,
        paper_weight_id: None,
        paper_size_id: None,
        notes: String::new(),
        print_cost: Decimal::new(1050, 2),
        design_cost: Decimal::new(525, 2),
    }
}

#[test]
fn test_local_docket_numbers_are_sequential_and_unique() {
    let test_db = common::TestDb::new("test_local_docket_numbers.db");
    let product_type_id = seed_product_type(test_db.pool());
    let job_repo = DieselJobRepository::new(test_db.pool());

    let first = job_repo
        .create_job(&new_job(JobType::Local, None, product_type_id))
        .unwrap();
    let second = job_repo
        .create_job(&new_job(JobType::Local, None, product_type_id))
        .unwrap();

    assert_eq!(first.job.docket_number, "LOC-1");
    assert_eq!(second.job.docket_number, "LOC-2");
    assert_eq!(first.job.status, JobStatus::Pending);
    assert_eq!(first.job.total_cost, Decimal::new(1575, 2));

    let counter = job_repo.docket_counter(JobType::Local).unwrap();
    assert_eq!(counter.current_number, 2);
}

#[test]
fn test_docket_counter_reconciles_with_existing_jobs() {
    use diesel::prelude::*;
    use paragon_jms::schema::jobs;

    let test_db = common::TestDb::new("test_docket_counter_reconciles.db");
    let product_type_id = seed_product_type(test_db.pool());
    let job_repo = DieselJobRepository::new(test_db.pool());

    job_repo
        .create_job(&new_job(JobType::Local, None, product_type_id))
        .unwrap(); // LOC-1

    // A job numbered out-of-band (e.g. imported) that the counter never saw.
    let mut conn = test_db.pool().get().unwrap();
    diesel::insert_into(jobs::table)
        .values((
            jobs::branch.eq("BORROWDALE"),
            jobs::job_type.eq("LOCAL"),
            jobs::docket_number.eq("LOC-7"),
            jobs::sales_rep.eq("Jane Sales"),
            jobs::order_taken_by.eq("Jane Sales"),
            jobs::customer.eq("Imported"),
            jobs::contact_person.eq("Bob"),
            jobs::mobile_number.eq("077"),
            jobs::email_address.eq("bob@acme.example"),
            jobs::quantity.eq(1),
            jobs::description.eq("Imported job"),
            jobs::product_type_id.eq(product_type_id),
            jobs::print_cost.eq("0"),
            jobs::design_cost.eq("0"),
            jobs::total_cost.eq("0"),
        ))
        .execute(&mut conn)
        .unwrap();
    drop(conn);

    let counter = job_repo.docket_counter(JobType::Local).unwrap();
    assert_eq!(counter.current_number, 7);

    let next = job_repo
        .create_job(&new_job(JobType::Local, None, product_type_id))
        .unwrap();
    assert_eq!(next.job.docket_number, "LOC-8");
}

#[test]
fn test_foreign_docket_uniqueness_is_enforced() {
    let test_db = common::TestDb::new("test_foreign_docket_unique.db");
    let product_type_id = seed_product_type(test_db.pool());
    let job_repo = DieselJobRepository::new(test_db.pool());

    job_repo
        .create_job(&new_job(JobType::Foreign, Some("FOR-A1"), product_type_id))
        .unwrap();
    let duplicate =
        job_repo.create_job(&new_job(JobType::Foreign, Some("FOR-A1"), product_type_id));
    assert!(duplicate.is_err());
}

#[test]
fn test_job_list_filters_and_search() {
    let test_db = common::TestDb::new("test_job_list_filters.db");
    let product_type_id = seed_product_type(test_db.pool());
    let job_repo = DieselJobRepository::new(test_db.pool());

    job_repo
        .create_job(&new_job(JobType::Local, None, product_type_id))
        .unwrap();
    let mut other = new_job(JobType::Foreign, Some("FOR-77"), product_type_id);
    other.customer = "Conference Centre".to_string();
    other.branch = "EASTLEA".to_string();
    job_repo.create_job(&other).unwrap();

    let (total, _) = job_repo.list_jobs(JobListQuery::new()).unwrap();
    assert_eq!(total, 2);

    let (total, items) = job_repo
        .list_jobs(JobListQuery::new().branch("EASTLEA"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].job.customer, "Conference Centre");

    let (total, items) = job_repo
        .list_jobs(JobListQuery::new().search("FOR-77"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].job.docket_number, "FOR-77");

    let (total, items) = job_repo
        .list_jobs(JobListQuery::new().job_type(JobType::Local).paginate(1, 1))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items.len(), 1);

    let branches = job_repo.list_job_branches().unwrap();
    assert_eq!(branches, vec!["BORROWDALE", "EASTLEA"]);
}

#[test]
fn test_status_and_payment_updates_stamp_fields() {
    let test_db = common::TestDb::new("test_status_payment_updates.db");
    let product_type_id = seed_product_type(test_db.pool());
    let job_repo = DieselJobRepository::new(test_db.pool());

    let created = job_repo
        .create_job(&new_job(JobType::Local, None, product_type_id))
        .unwrap();

    let printed = job_repo
        .set_job_status(created.job.id, JobStatus::Printed, "Mike Operator")
        .unwrap();
    assert_eq!(printed.job.status, JobStatus::Printed);
    assert_eq!(printed.job.printed_by.as_deref(), Some("Mike Operator"));
    assert!(printed.job.printed_at.is_some());

    let paid = job_repo
        .set_job_payment(created.job.id, PaymentStatus::Receipted, "REF123")
        .unwrap();
    assert_eq!(paid.job.payment_status, PaymentStatus::Receipted);
    assert_eq!(paid.job.payment_ref, "REF123");
}

#[test]
fn test_update_job_recomputes_total() {
    let test_db = common::TestDb::new("test_update_job_total.db");
    let product_type_id = seed_product_type(test_db.pool());
    let job_repo = DieselJobRepository::new(test_db.pool());

    let created = job_repo
        .create_job(&new_job(JobType::Local, None, product_type_id))
        .unwrap();

    let updates = UpdateJob {
        branch: "EASTLEA".to_string(),
        customer: "Acme".to_string(),
        contact_person: "Bob".to_string(),
        mobile_number: "0771234567".to_string(),
        email_address: "bob@acme.example".to_string(),
        quantity: 250,
        description: "Flyers, second run".to_string(),
        product_type_id,
        paper_type_id: None,
        paper_weight_id: None,
        paper_size_id: None,
        notes: String::new(),
        print_cost: Decimal::new(2000, 2),
        design_cost: Decimal::new(500, 2),
    };
    let updated = job_repo.update_job(created.job.id, &updates).unwrap();

    assert_eq!(updated.job.quantity, 250);
    assert_eq!(updated.job.total_cost, Decimal::new(2500, 2));
    assert_eq!(updated.job.docket_number, created.job.docket_number);
}

#[test]
fn test_custom_size_dedupes_rotated_dimensions() {
    let test_db = common::TestDb::new("test_custom_size_dedupe.db");
    let catalog = DieselCatalogRepository::new(test_db.pool());

    let weight = catalog.create_paper_weight(300).unwrap();

    let (first, created) = catalog
        .create_custom_paper_size(
            &NewPaperSize {
                name: String::new(),
                series: PaperSeries::Other,
                width_mm: Decimal::from(90),
                height_mm: Decimal::from(50),
            },
            weight.id,
        )
        .unwrap();
    assert!(created);
    assert_eq!(first.name, "Custom Size 1");

    // Same dimensions rotated are reused, not duplicated.
    let (second, created) = catalog
        .create_custom_paper_size(
            &NewPaperSize {
                name: String::new(),
                series: PaperSeries::Other,
                width_mm: Decimal::from(50),
                height_mm: Decimal::from(90),
            },
            weight.id,
        )
        .unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);

    let (third, created) = catalog
        .create_custom_paper_size(
            &NewPaperSize {
                name: String::new(),
                series: PaperSeries::Other,
                width_mm: Decimal::from(100),
                height_mm: Decimal::from(70),
            },
            weight.id,
        )
        .unwrap();
    assert!(created);
    assert_eq!(third.name, "Custom Size 2");

    let missing_weight = catalog.create_custom_paper_size(
        &NewPaperSize {
            name: String::new(),
            series: PaperSeries::Other,
            width_mm: Decimal::from(10),
            height_mm: Decimal::from(20),
        },
        9999,
    );
    assert!(missing_weight.is_err());
}

#[test]
fn test_compatible_weights_and_specifications() {
    let test_db = common::TestDb::new("test_compatible_weights.db");
    let catalog = DieselCatalogRepository::new(test_db.pool());

    let product_type = catalog
        .create_product_type(&NewProductType {
            name: "Posters".to_string(),
            description: String::new(),
        })
        .unwrap();
    let paper_type = catalog
        .create_paper_type(&NewPaperType {
            name: "Gloss Art".to_string(),
            description: String::new(),
        })
        .unwrap();
    let light = catalog.create_paper_weight(115).unwrap();
    let heavy = catalog.create_paper_weight(170).unwrap();

    catalog
        .link_weight_to_paper_type(heavy.id, paper_type.id)
        .unwrap();
    catalog
        .link_weight_to_paper_type(light.id, paper_type.id)
        .unwrap();

    let weights = catalog.compatible_weights(paper_type.id).unwrap();
    let gsm: Vec<i32> = weights.iter().map(|w| w.gsm).collect();
    assert_eq!(gsm, vec![115, 170]);

    // Unconfigured product type resolves to empty lists.
    let spec = catalog.product_specification(product_type.id).unwrap();
    assert!(spec.paper_types.is_empty());
    assert!(spec.paper_weights.is_empty());
    assert!(spec.paper_sizes.is_empty());

    catalog
        .replace_product_specification(product_type.id, &[paper_type.id], &[heavy.id], &[])
        .unwrap();
    let spec = catalog.product_specification(product_type.id).unwrap();
    assert_eq!(spec.paper_types.len(), 1);
    assert_eq!(spec.paper_weights.len(), 1);
}

#[test]
fn test_user_registration_and_approval() {
    let test_db = common::TestDb::new("test_user_approval.db");
    let users = DieselUserRepository::new(test_db.pool());

    let admin = users
        .create_user(&NewUser::new(
            "System Administrator".to_string(),
            "Admin@Paragon.example".to_string(),
            "hash-a".to_string(),
        ))
        .unwrap();
    let admin = users
        .approve_user(admin.id, UserRole::Superuser, admin.id)
        .unwrap();
    assert!(admin.approved);

    let pending = users
        .create_user(&NewUser::new(
            "New Designer".to_string(),
            "designer@paragon.example".to_string(),
            "hash-b".to_string(),
        ))
        .unwrap();
    assert!(!pending.approved);
    assert_eq!(pending.role, None);

    // Email lookups are case-insensitive via normalization.
    assert!(
        users
            .get_user_by_email("admin@paragon.example")
            .unwrap()
            .is_some()
    );

    assert_eq!(users.count_pending_users().unwrap(), 1);
    let listed = users.list_pending_users().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "designer@paragon.example");

    let approved = users
        .approve_user(pending.id, UserRole::Designer, admin.id)
        .unwrap();
    assert_eq!(approved.role, Some(UserRole::Designer));
    assert_eq!(approved.assigned_by, Some(admin.id));

    // Already-processed users cannot be approved or declined again.
    assert!(
        users
            .approve_user(pending.id, UserRole::Designer, admin.id)
            .is_err()
    );
    assert!(users.delete_pending_user(pending.id).is_err());
}

#[test]
fn test_settings_singleton_and_branches() {
    let test_db = common::TestDb::new("test_settings_singleton.db");
    let settings_repo = DieselSettingsRepository::new(test_db.pool());

    let settings = settings_repo.get_settings().unwrap();
    assert_eq!(settings.company_name, "Paragon Job Management");
    assert_eq!(settings.currency, "USD");
    assert_eq!(settings.tax_rate, Decimal::new(1500, 2));

    let branch = settings_repo
        .create_branch(&paragon_jms::domain::settings::NewBranch {
            name: "Borrowdale".to_string(),
            code: "BORROWDALE".to_string(),
            is_active: true,
        })
        .unwrap();

    let updates = paragon_jms::domain::settings::UpdateSystemSettings {
        company_name: Some("Paragon Printers".to_string()),
        default_branch_id: Some(Some(branch.id)),
        ..Default::default()
    };
    let updated = settings_repo.update_settings(&updates).unwrap();
    assert_eq!(updated.company_name, "Paragon Printers");
    assert_eq!(updated.default_branch_id, Some(branch.id));
    // Untouched fields keep their values.
    assert_eq!(updated.currency, "USD");

    let branches = settings_repo.list_branches().unwrap();
    assert_eq!(branches.len(), 1);

    settings_repo.delete_branch(branch.id).unwrap();
    assert!(settings_repo.delete_branch(branch.id).is_err());
}
