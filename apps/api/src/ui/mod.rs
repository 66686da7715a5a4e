// Upload UI: session state, cosmetic progress, and the HTTP transport.
// The browser form in static/index.html follows the same rules.

pub mod progress;
pub mod session;
pub mod transport;

pub use session::{SubmitStatus, UploadSession};
pub use transport::{HttpTransport, SelectedFile};
