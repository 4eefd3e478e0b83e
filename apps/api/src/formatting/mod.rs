// Display formatting for generated content.
// The normalizer is pure and synchronous; handlers only adapt it to HTTP.

pub mod handlers;
pub mod normalizer;
