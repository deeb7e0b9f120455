// Resume wizard: six validation-gated steps over one form, finished by
// normalizing the data and handing it to the submission sink.

pub mod controller;
pub mod handlers;
pub mod session;
pub mod steps;

pub use session::{WizardRegistry, WizardView};
