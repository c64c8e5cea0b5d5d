pub mod contact;
pub mod user;

pub use contact::{Contact, ContactPatch, ContactType, NewContact};
pub use user::{NewUser, User, UserProfile};
