//! Seed data loaded into a fresh in-memory store.

use chrono::{DateTime, NaiveDate, Utc};

use crate::service_record::{Category, ServiceRecord, ServiceStatus};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn rec(
    id: u64,
    name: &str,
    category: Category,
    description: &str,
    status: ServiceStatus,
    created_at: DateTime<Utc>,
) -> ServiceRecord {
    ServiceRecord { id, name: name.into(), category, description: description.into(), status, created_at }
}

pub fn sample_services() -> Vec<ServiceRecord> {
    vec![
        rec(
            1,
            "Website Development",
            Category::Development,
            "Full stack website development with React and Node.js",
            ServiceStatus::Active,
            at(2025, 4, 10, 14, 30),
        ),
        rec(
            2,
            "Mobile App Design",
            Category::Design,
            "UI/UX design for iOS and Android mobile application",
            ServiceStatus::Pending,
            at(2025, 4, 15, 9, 45),
        ),
        rec(
            3,
            "SEO Optimization",
            Category::Marketing,
            "Search engine optimization for existing website",
            ServiceStatus::Completed,
            at(2025, 4, 5, 11, 20),
        ),
        rec(
            4,
            "Logo Design",
            Category::Design,
            "Professional logo design for new brand",
            ServiceStatus::Active,
            at(2025, 4, 12, 16, 15),
        ),
        rec(
            5,
            "Content Writing",
            Category::Content,
            "Blog posts and article writing for company website",
            ServiceStatus::Active,
            at(2025, 4, 18, 13, 10),
        ),
    ]
}
