//! The admin console: registry, forms, changelist queries and persistence.

pub mod defaults;
pub mod fields;
pub mod formset;
pub mod query;
pub mod resource;
pub mod site;
pub mod store;

pub use defaults::{build_configuration_formset, ConfigurationFormset, ConfigurationRow};
pub use resource::{AdminResource, FormMode};
pub use site::{admin_site, AdminSite, ModelAdmin};
