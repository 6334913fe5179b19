//! Domain value types for the CareLink registry.

mod email;
mod id;
mod national_id;
mod postal_code;
mod role;

pub use email::{Email, EmailError};
pub use id::AddressId;
pub use national_id::{NationalId, NationalIdError};
pub use postal_code::{PostalCode, PostalCodeError};
pub use role::{PersonRole, RoleParseError};
