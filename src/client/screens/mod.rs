pub mod contact;
pub mod dashboard;
pub mod login;
pub mod prediction;
pub mod signup;

use crate::client::route::Route;

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    /// Accepted; go to this screen.
    Navigate(Route),
    /// Local validation failed, nothing was sent.
    Invalid,
    /// The server refused or could not be reached.
    Failed,
}
