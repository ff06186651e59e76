// Application tracking: simulated applications with generated cover-letter openings.
// In-memory only; no real submission.

pub mod handlers;
pub mod ledger;
