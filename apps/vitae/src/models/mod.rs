pub mod edit;
pub mod profile;

pub use profile::Profile;
