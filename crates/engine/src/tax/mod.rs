//! Tax reference tables.

pub mod federal_income_tax;
pub mod medicare;
pub mod social_security;
pub mod tax_withholding;

pub use federal_income_tax::FederalIncomeTaxes;
pub use medicare::MedicareRates;
pub use social_security::SocialSecurityRates;
pub use tax_withholding::TaxWithholdings;
