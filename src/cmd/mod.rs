pub mod capability;
pub mod validate;
