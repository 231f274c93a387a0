mod dataset;
mod plotter;
mod request_form;

pub use dataset::DatasetHandler;
pub use plotter::{save_svg, Plotter};
pub use request_form::RequestForm;
