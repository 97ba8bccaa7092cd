pub mod http_metrics;
pub mod request_id;
pub mod session;

pub use http_metrics::http_metrics_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use session::{require_report_author, require_session, CurrentUser, SessionToken};
