//! Database entities module

pub mod informe;
pub mod usuario;

pub use informe::Entity as Informe;
pub use usuario::Entity as Usuario;
