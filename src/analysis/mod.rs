pub mod aging;
pub mod kpi;

pub use aging::{analyze_aging, bucket_for, ticket_age_days};
pub use kpi::calculate_kpis;
