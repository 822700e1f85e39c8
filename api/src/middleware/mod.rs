pub mod scope;

pub use scope::{TenantScope, PRODUCT_HEADER, TRUSTOMER_HEADER};
