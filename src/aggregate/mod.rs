// src/aggregate/mod.rs
pub mod capital;
pub mod categories;
pub mod district;
pub mod years;

pub use capital::{bucket_capital, CapitalBuckets, BUCKET_LABELS};
pub use categories::{top_categories_by_year, YearlyTopCategories};
pub use district::{count_by_district, top_districts, DistrictIndex};
pub use years::count_by_year;

/// Header names consumed from the company master registry.
pub const REGISTRATION_DATE: &str = "CompanyRegistrationdate_date";
pub const INDUSTRIAL_CLASSIFICATION: &str = "CompanyIndustrialClassification";
pub const AUTHORIZED_CAPITAL: &str = "AuthorizedCapital";
pub const OFFICE_ADDRESS: &str = "Registered_Office_Address";

/// Header names consumed from the postal-code lookup table.
pub const ZIP_CODE: &str = "ZipCode";
pub const DISTRICT: &str = "District";
