// handlers/protected/contacts/mod.rs - Contact CRUD handlers
//
// Every route here sits behind the authentication guard, so handlers can rely
// on a `RequestContext` extension carrying the caller.

pub mod create; // POST   /api/v1/contacts
pub mod delete; // DELETE /api/v1/contacts/:id
pub mod list;   // GET    /api/v1/contacts
pub mod show;   // GET    /api/v1/contacts/:id
pub mod update; // PUT    /api/v1/contacts/:id

pub use create::contact_create;
pub use delete::contact_delete;
pub use list::contact_list;
pub use show::contact_show;
pub use update::contact_update;
