mod logic;
mod ui;

use app_core::frontend::UIParameter;

use crate::{app::DynRequestSender, backend_state::Dataset};

/// The table plot requests are answered from.
///
/// Loading and generating run on the backend. Until a new table arrives, the
/// previous one stays in use, and a failed load leaves it in place.
pub struct DatasetHandler {
    dataset: Dataset,
    incoming: UIParameter<Option<Result<Dataset, String>>>,
    last_error: Option<String>,
    request_tx: DynRequestSender,
}

impl DatasetHandler {
    pub fn new(request_tx: DynRequestSender) -> Self {
        Self {
            dataset: Dataset::default(),
            incoming: UIParameter::new(None),
            last_error: None,
            request_tx,
        }
    }
}
