//! Service layer: postal-code resolution and use-case orchestration.

pub mod registry;
pub mod resolver;

pub use registry::RegistryService;
pub use resolver::{PostalResolver, ResolveError, ResolvedAddress};
