pub mod contact;
pub mod email;
pub mod field;
pub mod name;

pub use contact::Contact;
pub use email::Email;
pub use field::{Field, FieldError};
pub use name::Name;
